use std::sync::Arc;

use clap::{Parser, Subcommand};
use mesa::catalog::fixtures;
use mesa_app::{
    api::{FileTokenStore, HttpApi},
    config::{AppConfig, LoggingConfig},
    store::Store,
};
use rusty_money::iso::Currency;

mod admin;
mod menu;
mod order;
mod session;

#[derive(Debug, Parser)]
#[command(name = "mesa", about = "Mesa restaurant ordering client", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the menu
    Menu(menu::MenuArgs),

    /// Build a cart and place an order
    Order(order::OrderArgs),

    /// Sign in as an admin
    Login(session::LoginArgs),

    /// Sign out
    Logout,

    /// Show the signed in admin
    Whoami,

    /// Manage the menu and orders
    Admin(admin::AdminCommand),
}

impl Cli {
    /// Parse arguments, reading `.env` first.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) fn logging(&self) -> &LoggingConfig {
        &self.config.logging
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        let context = Context::new(&self.config)?;

        match self.command {
            Commands::Menu(args) => menu::run(&context, args).await,
            Commands::Order(args) => order::run(&context, args).await,
            Commands::Login(args) => session::login(&context, args).await,
            Commands::Logout => {
                session::logout(&context);
                Ok(())
            }
            Commands::Whoami => session::whoami(&context).await,
            Commands::Admin(command) => admin::run(&context, command).await,
        }
    }
}

/// Store and display settings shared by every command.
pub(crate) struct Context {
    pub(crate) store: Store,
    pub(crate) currency: &'static Currency,
}

impl Context {
    fn new(config: &AppConfig) -> Result<Self, String> {
        let currency = config.currency().map_err(|error| error.to_string())?;

        let api = HttpApi::new(&config.api.api_url, config.api.timeout())
            .map_err(|error| format!("failed to build API client: {error}"))?;
        let tokens = FileTokenStore::new(&config.api.token_path);

        Ok(Self {
            store: Store::new(Arc::new(api), Arc::new(tokens), config.store_config()),
            currency,
        })
    }

    /// Fill the catalog from a menu file, or from the server when none is
    /// given.
    pub(crate) async fn load_catalog(&self, menu: Option<&std::path::Path>) -> Result<(), String> {
        match menu {
            Some(path) => {
                let catalog = fixtures::load(path)
                    .map_err(|error| format!("failed to load menu {}: {error}", path.display()))?;

                self.store.seed_catalog(catalog);
            }
            None => self.store.bootstrap().await,
        }

        Ok(())
    }

    /// Restore the stored session, failing if there is none.
    pub(crate) async fn require_session(&self) -> Result<(), String> {
        match self.store.verify_session().await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err("not logged in; run `mesa login` first".to_string()),
            Err(error) => Err(format!("failed to read session: {error}")),
        }
    }
}
