pub mod flow;
pub mod memory;
pub mod persist;
pub mod provider;
pub mod rest;
pub mod session;

pub use flow::{AuthFlow, LoginForm, SignUpForm};
pub use provider::{AuthError, AuthProvider, OAuthProvider, SignUpOutcome};
pub use session::Session;
