use serde::Serialize;

/// Saves are refused below this score.
pub const MIN_ACCEPTABLE_SCORE: u8 = 3;

pub const MSG_WEAK: &str = "Password is weak";
pub const MSG_MODERATE: &str = "Password is moderate";
pub const MSG_STRONG: &str = "Password is strong";

const HINT_LENGTH: &str = "Password should be at least 8 characters long";
const HINT_UPPER: &str = "Add uppercase letters";
const HINT_LOWER: &str = "Add lowercase letters";
const HINT_DIGIT: &str = "Add numbers";
const HINT_SYMBOL: &str = "Add special characters";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLevel {
    Weak,
    Moderate,
    Strong,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    pub score: u8,
    /// Qualitative label first, then one hint per missing criterion.
    pub feedback: Vec<String>,
}

impl PasswordStrength {
    pub fn level(&self) -> StrengthLevel {
        level_for(self.score)
    }

    pub fn is_acceptable(&self) -> bool {
        self.score >= MIN_ACCEPTABLE_SCORE
    }
}

fn level_for(score: u8) -> StrengthLevel {
    if score < 3 {
        StrengthLevel::Weak
    } else if score < 5 {
        StrengthLevel::Moderate
    } else {
        StrengthLevel::Strong
    }
}

/// Score a password 0..=6 and explain what is missing.
///
/// One point each for: at least 8 characters, at least 12 characters, an
/// uppercase letter, a lowercase letter, a digit, a symbol. Classes are ASCII:
/// any character outside `[A-Za-z0-9]` counts as a symbol and nothing else.
/// Hints follow the order length, uppercase, lowercase, digit, symbol.
pub fn check_password_strength(password: &str) -> PasswordStrength {
    let len = password.chars().count();
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_ascii_alphanumeric());

    let mut score = 0u8;
    let mut hints: Vec<&str> = Vec::new();

    if len >= 8 {
        score += 1;
    } else {
        hints.push(HINT_LENGTH);
    }
    if len >= 12 {
        score += 1;
    }
    for (present, hint) in [
        (has_upper, HINT_UPPER),
        (has_lower, HINT_LOWER),
        (has_digit, HINT_DIGIT),
        (has_symbol, HINT_SYMBOL),
    ] {
        if present {
            score += 1;
        } else {
            hints.push(hint);
        }
    }

    let label = match level_for(score) {
        StrengthLevel::Weak => MSG_WEAK,
        StrengthLevel::Moderate => MSG_MODERATE,
        StrengthLevel::Strong => MSG_STRONG,
    };
    let mut feedback = Vec::with_capacity(hints.len() + 1);
    feedback.push(label.to_string());
    feedback.extend(hints.into_iter().map(str::to_string));

    PasswordStrength { score, feedback }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_password_gets_every_hint() {
        let s = check_password_strength("");
        assert_eq!(s.score, 0);
        assert_eq!(
            s.feedback,
            vec![MSG_WEAK, HINT_LENGTH, HINT_UPPER, HINT_LOWER, HINT_DIGIT, HINT_SYMBOL]
        );
        assert_eq!(s.level(), StrengthLevel::Weak);
    }

    #[test]
    fn single_lowercase_char() {
        let s = check_password_strength("a");
        assert_eq!(s.score, 1);
        assert_eq!(s.feedback[0], MSG_WEAK);
        assert_eq!(&s.feedback[1..], &[HINT_LENGTH, HINT_UPPER, HINT_DIGIT, HINT_SYMBOL]);
        assert!(!s.is_acceptable());
    }

    #[test]
    fn nine_char_mixed_is_strong_without_hints() {
        let s = check_password_strength("Abcdef12!");
        assert_eq!(s.score, 5);
        assert_eq!(s.feedback, vec![MSG_STRONG.to_string()]);
    }

    #[test]
    fn twelve_char_mixed_scores_six() {
        let s = check_password_strength("Abcdef12!xyz");
        assert_eq!(s.score, 6);
        assert_eq!(s.feedback, vec![MSG_STRONG.to_string()]);
    }

    #[test]
    fn moderate_band() {
        // length>=8, lower, digit
        let s = check_password_strength("abcdefg1");
        assert_eq!(s.score, 3);
        assert_eq!(s.level(), StrengthLevel::Moderate);
        assert_eq!(s.feedback, vec![MSG_MODERATE, HINT_UPPER, HINT_SYMBOL]);
        assert!(s.is_acceptable());
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        // 4 chars, 8+ bytes
        let s = check_password_strength("éééé");
        assert!(s.feedback.contains(&HINT_LENGTH.to_string()));
    }

    #[test]
    fn non_ascii_letters_count_only_as_symbols() {
        let s = check_password_strength("éééééééé");
        assert_eq!(s.score, 2);
        assert_eq!(s.feedback, vec![MSG_WEAK, HINT_UPPER, HINT_LOWER, HINT_DIGIT]);
        assert!(!s.is_acceptable());
    }
}
