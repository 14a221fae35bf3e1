use anyhow::Result;
use clap::{Parser, Subcommand};
use folio_core::AppConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "folio",
    about = "Backend API for a personal portfolio site: GitHub activity, blog, link metadata",
    version,
    author
)]
struct Cli {
    /// Path to config file (default: ~/.config/folio/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the GitHub account handle
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server (default)
    Serve {
        /// Bind host
        #[arg(long)]
        host: Option<String>,
        /// Bind port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Write the bundled sample blog posts into the content directory
    Seed,

    /// Show or manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Initialize default configuration file
    Init,
    /// Open config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up tracing.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| "folio=info,warn".into()))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Load config.
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // Apply CLI/env overrides.
    if let Some(user) = &cli.user {
        config.github.username = user.clone();
    }
    if config.github.token.is_none() {
        config.github.token = std::env::var("GITHUB_TOKEN").ok();
    }

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            serve(config, host, port).await?;
        }
        None => {
            serve(config, None, None).await?;
        }
        Some(Commands::Seed) => {
            let dir = config.blog_dir();
            let written = folio_blog::ensure_seeded(&dir)?;
            println!("Seeded {} sample post(s) into {}", written, dir.display());
        }
        Some(Commands::Config { action }) => {
            handle_config_command(action, &config)?;
        }
    }

    Ok(())
}

async fn serve(mut config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(h) = host {
        config.server.host = h;
    }
    if let Some(p) = port {
        config.server.port = p;
    }

    // Seeding is a setup-phase step: run once here, never on the read path.
    if config.blog.seed_samples {
        let written = folio_blog::ensure_seeded(&config.blog_dir())?;
        if written > 0 {
            tracing::info!("seeded {written} sample blog post(s)");
        }
    }

    folio_server::serve(config).await
}

fn handle_config_command(action: Option<ConfigAction>, config: &AppConfig) -> Result<()> {
    match action {
        Some(ConfigAction::Show) | None => {
            let toml_str = toml::to_string_pretty(config)?;
            println!("{}", toml_str);
        }
        Some(ConfigAction::Init) => {
            let path = AppConfig::default_path();
            if path.exists() {
                println!("Config already exists at: {}", path.display());
            } else {
                config.save()?;
                println!("Created default config at: {}", path.display());
            }
        }
        Some(ConfigAction::Path) => {
            println!("{}", AppConfig::default_path().display());
        }
    }
    Ok(())
}
