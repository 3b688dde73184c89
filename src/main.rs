use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utility_site::{check, config, export, output, server};

fn version_string() -> &'static str {
    let hash = env!("SITE_GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup
        Box::leak(format!("{}@{hash}", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "utility-site")]
#[command(about = "Company website for a heating utility: documents, gallery, contacts")]
#[command(long_about = "\
Company website for a heating utility: documents, gallery, contacts

Everything the site shows comes from one config file and two folders:

  site/
  ├── config.toml          # Company, theme, menu, contacts, documents, limits
  ├── documents/           # license1.pdf, license2.pdf, license3.pdf, tariff.pdf
  └── photos/              # Gallery images (.png, .jpg, .jpeg by default)

A missing or broken config.toml never takes the site down: the stock
defaults are used instead. Run 'utility-site check' to see what the site
will show, and 'utility-site gen-config' for a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site root; document and gallery folders resolve against it
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file, relative to the site root
    #[arg(long, default_value = config::CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the site over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8501")]
        addr: SocketAddr,
    },
    /// Write a static copy of every page
    Export {
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Report what the site would show without serving it
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(level)
        .init();

    let config_path = cli.root.join(&cli.config);

    match cli.command {
        Command::Serve { addr } => {
            let state = server::AppState::new(cli.root.clone(), config_path);
            tokio::runtime::Runtime::new()?.block_on(server::serve(addr, state))?;
        }
        Command::Export { output: out_dir } => {
            println!("==> Exporting {} → {}", cli.root.display(), out_dir.display());
            let summary = export::export(&cli.root, &config_path, &out_dir)?;
            output::print_export_summary(&summary);
        }
        Command::Check => {
            println!("==> Checking {}", cli.root.display());
            let report = check::inspect(&cli.root, &config_path);
            output::print_check_report(&report);
            if report.has_problems() {
                return Err("site has problems, see above".into());
            }
            println!("==> Site is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
