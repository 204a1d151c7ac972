pub mod generator;
pub mod hashing;
pub mod strength;
pub mod serde_secret;

pub use generator::{generate_strong_password, DEFAULT_LENGTH};
pub use hashing::{hash_password, verify_password};
pub use strength::{check_password_strength, PasswordStrength, StrengthLevel, MIN_ACCEPTABLE_SCORE};
