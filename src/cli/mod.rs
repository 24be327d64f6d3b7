//! `catalog` command-line front end.
//!
//! Each command opens a [`Session`], restores any stored login, dispatches
//! intents and prints what the store reports back.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

mod commands;
mod session;

pub use session::{Outcome, Session, SessionOptions};

#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(version)]
#[command(about = "Product catalog client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: <config dir>/catalog-client/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Backend base URL, overrides config and CATALOG_API_URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Directory for the stored session
    #[arg(long, global = true, value_name = "DIR")]
    pub storage_dir: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Log at info level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long = "confirm-password")]
        confirm_password: String,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Manage products
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },

    /// List product categories
    Categories,

    /// Resolve a route such as `/products?page=2` and show it
    Open {
        #[arg(value_name = "ROUTE")]
        route: String,
    },

    /// Interactive product list
    Browse,
}

#[derive(clap::Subcommand, Debug)]
pub enum ProductCommands {
    /// List one page of products
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one product
    Show {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Create a product
    Create {
        #[command(flatten)]
        fields: ProductFields,
    },

    /// Update a product; omitted fields keep their current value
    Update {
        #[arg(value_name = "ID")]
        id: String,
        #[command(flatten)]
        fields: ProductFields,
    },

    /// Delete a product after confirmation
    Delete {
        #[arg(value_name = "ID")]
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct ProductFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
    /// Existing category, or `nueva-categoria` together with --new-category
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long = "new-category")]
    pub new_category: Option<String>,
}

impl Cli {
    fn session_options(&self) -> SessionOptions {
        SessionOptions {
            config_path: self.config.clone(),
            api_url: self.api_url.clone(),
            storage_dir: self.storage_dir.clone(),
            ephemeral: self.ephemeral,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::logging::init_tracing(cli.verbose);

    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut session = Session::open(&cli.session_options()).await?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&mut session, email, password).await
        }
        Commands::Register {
            name,
            email,
            password,
            confirm_password,
        } => {
            commands::auth::register(&mut session, name, email, password, confirm_password).await
        }
        Commands::Logout => commands::auth::logout(&mut session).await,
        Commands::Whoami => commands::auth::whoami(&session),

        Commands::Products { command } => match command {
            ProductCommands::List {
                page,
                limit,
                category,
                search,
            } => commands::products::list(&mut session, page, limit, category, search).await,
            ProductCommands::Show { id } => commands::products::show(&mut session, &id).await,
            ProductCommands::Create { fields } => {
                commands::products::create(&mut session, fields).await
            }
            ProductCommands::Update { id, fields } => {
                commands::products::update(&mut session, &id, fields).await
            }
            ProductCommands::Delete { id, yes } => {
                commands::products::delete(&mut session, &id, yes).await
            }
        },

        Commands::Categories => commands::products::categories(&mut session).await,
        Commands::Open { route } => commands::products::open(&mut session, &route).await,
        Commands::Browse => commands::browse::run(&mut session).await,
    }
}
