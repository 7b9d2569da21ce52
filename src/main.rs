//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::commands::new::NewEntry;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Content engine for a portfolio and blog site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new entry
    New {
        /// Title of the new entry
        title: String,

        /// Collection to add the entry to
        #[arg(long, default_value = "posts")]
        collection: String,

        /// Author (defaults to the site author)
        #[arg(short, long)]
        author: Option<String>,

        /// Category
        #[arg(long)]
        category: Option<String>,
    },

    /// List entries, tags or categories of a collection
    #[command(alias = "ls")]
    List {
        /// Collection to list
        #[arg(default_value = "posts")]
        collection: String,

        /// What to list (entry, tag, category)
        #[arg(short, long, default_value = "entry")]
        r#type: String,
    },

    /// Show a single entry
    Show {
        /// Collection the entry belongs to
        collection: String,

        /// Entry identifier (file name without extension)
        id: String,

        /// Render the body to HTML
        #[arg(long)]
        html: bool,
    },

    /// Export collections as static JSON
    #[command(alias = "g")]
    Generate,

    /// Serve the read API
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to the configured address)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            folio::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New {
            title,
            collection,
            author,
            category,
        } => {
            let site = folio::Folio::new(&base_dir)?;
            tracing::info!("Creating new entry in {} with title: {}", collection, title);
            let options = NewEntry {
                author: author.as_deref(),
                category: category.as_deref(),
            };
            let path = folio::commands::new::create_entry(&site, &collection, &title, &options)?;
            println!("Created: {:?}", path);
        }

        Commands::List { collection, r#type } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::list::run(&site, &collection, &r#type)?;
        }

        Commands::Show {
            collection,
            id,
            html,
        } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::show::run(&site, &collection, &id, html)?;
        }

        Commands::Generate => {
            let site = folio::Folio::new(&base_dir)?;
            tracing::info!("Exporting collections...");
            site.generate()?;
            println!("Generated successfully!");
        }

        Commands::Serve { port, ip } => {
            let site = folio::Folio::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| site.config.server.ip.clone());
            let port = port.unwrap_or(site.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio::server::start(&site, &ip, port).await?;
        }

        Commands::Clean => {
            let site = folio::Folio::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
