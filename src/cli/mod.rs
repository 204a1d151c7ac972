#![allow(clippy::module_inception)]
use crate::cli::cli::{Cli, Commands, OAuthArg};
use crate::config::{Config, ConfigOverrides};
use crate::context::Services;
use crate::{logging, tui};
use clap::Parser;

pub mod cli;
mod handlers;

use handlers::{AddArgs, EditArgs, Handlers};

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let overrides = ConfigOverrides {
        backend_url: cli.url.clone(),
        anon_key: cli.anon_key.clone(),
        offline: cli.offline,
    };

    // Commands that need neither config nor backend
    match &cli.command {
        Commands::Generate { length } => {
            logging::init(cli.verbose);
            let length = match length {
                Some(n) => *n,
                None => Config::create(overrides)?.generator_length,
            };
            return handlers::handle_generate(length);
        }
        Commands::Strength { password } => {
            logging::init(cli.verbose);
            return handlers::handle_strength(password);
        }
        Commands::Hash { password } => {
            logging::init(cli.verbose);
            return handlers::handle_hash(password);
        }
        _ => {}
    }

    let config = Config::create(overrides)?;
    if matches!(cli.command, Commands::Tui) {
        let log_path = config.session_path.with_file_name("passdeck.log");
        logging::init_to_file(&log_path, cli.verbose)?;
        return tui::launch(&config).await;
    }
    logging::init(cli.verbose);

    let services = Services::from_config(&config)?;
    let h = Handlers::new(&config, services);

    match cli.command {
        Commands::Signup { email } => h.handle_signup(email).await?,
        Commands::Login { email } => h.handle_login(email).await?,
        Commands::Reset { email } => h.handle_reset(&email).await?,
        Commands::Oauth { provider } => match provider {
            OAuthArg::Google => h.handle_oauth()?,
        },
        Commands::Logout => h.handle_logout().await?,
        Commands::Whoami => h.handle_whoami().await?,
        Commands::List {
            query,
            json,
            reveal,
        } => h.handle_list(query, json, reveal).await?,
        Commands::Add {
            platform,
            username,
            url,
            notes,
            generate,
            password,
        } => {
            let args = AddArgs {
                platform,
                username,
                url,
                notes,
                generate,
                password,
            };
            h.handle_add(args).await?
        }
        Commands::Edit {
            id,
            platform,
            username,
            password,
            generate,
            url,
            notes,
        } => {
            let args = EditArgs {
                platform,
                username,
                password,
                generate,
                url,
                notes,
            };
            h.handle_edit(&id, args).await?
        }
        Commands::Rm { id, yes } => h.handle_rm(&id, yes).await?,
        Commands::Generate { .. } | Commands::Strength { .. } | Commands::Hash { .. } => {}
        Commands::Tui => {}
    }

    Ok(())
}
