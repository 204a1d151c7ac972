pub mod auth;
pub mod cli;
pub mod config;
pub mod context;
pub mod credentials;
pub mod dashboard;
pub mod filesystem;
pub mod logging;
pub mod passwords;
pub mod remote;
pub mod tui;
