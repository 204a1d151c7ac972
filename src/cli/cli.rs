use clap::{Parser, Subcommand, ValueEnum};

const PASSDECK_LONG_VERSION: &str = concat!(
"version: ", env!("CARGO_PKG_VERSION"), "\n",
"git sha: ", env!("PASSDECK_GIT_SHA"), "\n",
"build time (UTC): ", env!("PASSDECK_BUILD_TIME"), "\n",
"target: ", env!("PASSDECK_TARGET"), "\n",
"features: ", env!("PASSDECK_FEATURES")
);

#[derive(Parser)]
#[command(
    name = "passdeck",
    version = env!("CARGO_PKG_VERSION"),
    long_version = PASSDECK_LONG_VERSION,
    about = " 🗝️ Passdeck — credentials in your hosted backend"
)]
pub struct Cli {
    /// Use in-memory auth and storage instead of the hosted backend.
    /// Accounts and rows last for this process only, so it suits `tui` and
    /// the utility commands; credential commands will report no login.
    #[arg(long, global = true)]
    pub offline: bool,
    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// Backend base URL (overrides PASSDECK_URL and the config file)
    #[arg(long, global = true)]
    pub url: Option<String>,
    /// Public API key (overrides PASSDECK_ANON_KEY and the config file)
    #[arg(long, global = true)]
    pub anon_key: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account
    Signup {
        #[arg(long)]
        email: Option<String>,
    },
    /// Log in and cache the session
    Login {
        #[arg(long)]
        email: Option<String>,
    },
    /// Send a password reset email
    Reset {
        #[arg(long)]
        email: String,
    },
    /// Print the authorize URL for a third-party sign-in
    Oauth {
        #[arg(long, value_enum, default_value = "google")]
        provider: OAuthArg,
    },
    /// Log out and clear the cached session
    Logout,
    /// Show who is logged in
    Whoami,

    /// List your credentials
    List {
        /// Filter by platform, username or notes (case-insensitive)
        #[arg(long)]
        query: Option<String>,
        /// Output JSON array (machine-readable)
        #[arg(long)]
        json: bool,
        /// Include passwords in the output
        #[arg(long)]
        reveal: bool,
    },
    /// Add a credential
    Add {
        #[arg(long)]
        platform: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// Generate a password instead of prompting
        #[arg(long, conflicts_with = "password")]
        generate: bool,
        /// Password value (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Change fields of an existing credential
    Edit {
        id: String,
        #[arg(long)]
        platform: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long, conflicts_with = "generate")]
        password: Option<String>,
        /// Replace the password with a generated one
        #[arg(long)]
        generate: bool,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Remove a credential by id
    Rm {
        id: String,
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },

    /// Print a random password
    Generate {
        #[arg(long)]
        length: Option<usize>,
    },
    /// Score a password and print suggestions
    Strength { password: String },
    /// Print the Argon2id PHC hash of a password
    Hash { password: String },
    /// Launch the interactive Terminal UI
    Tui,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum OAuthArg {
    Google,
}
