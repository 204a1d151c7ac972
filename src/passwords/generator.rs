use rand::Rng;

pub const DEFAULT_LENGTH: usize = 16;

/// The 90 characters a generated password is drawn from.
pub const ALPHABET: &str = concat!(
    "abcdefghijklmnopqrstuvwxyz",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "0123456789",
    "!@#$%^&*()_+-=[]{}|;:,.<>?~`"
);

/// Generate `length` characters drawn uniformly from [`ALPHABET`].
///
/// Uses the thread-local PRNG. No character class is guaranteed to appear;
/// callers that need a minimum strength should run the result through
/// [`check_password_strength`](crate::passwords::check_password_strength).
pub fn generate_strong_password(length: usize) -> String {
    generate_with(&mut rand::thread_rng(), length)
}

pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    let alphabet = ALPHABET.as_bytes();
    (0..length)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn alphabet_has_ninety_unique_characters() {
        let mut seen = std::collections::HashSet::new();
        for c in ALPHABET.chars() {
            assert!(seen.insert(c), "duplicate {c:?} in alphabet");
        }
        assert_eq!(seen.len(), 90);
        assert_eq!(ALPHABET.chars().filter(|c| c.is_ascii_alphanumeric()).count(), 62);
    }

    #[test]
    fn default_length_is_sixteen_and_chars_in_alphabet() {
        for _ in 0..50 {
            let pw = generate_strong_password(DEFAULT_LENGTH);
            assert_eq!(pw.chars().count(), 16);
            assert!(pw.chars().all(|c| ALPHABET.contains(c)));
        }
    }

    #[test]
    fn zero_length_is_empty() {
        assert_eq!(generate_strong_password(0), "");
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let a = generate_with(&mut StdRng::seed_from_u64(7), 32);
        let b = generate_with(&mut StdRng::seed_from_u64(7), 32);
        let c = generate_with(&mut StdRng::seed_from_u64(8), 32);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
