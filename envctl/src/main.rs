mod commands;

use clap::{Parser, Subcommand};
use commands::Case;
use registry::{CurrentEnvironment, Locale, SystemEnv};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "envctl")]
#[command(about = "Inspect how deployment environments are classified")]
struct Cli {
    /// TOML file describing the environments (defaults when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether an environment is defined and how it is classified
    Check {
        environment: String,
        #[arg(long)]
        json: bool,
    },
    /// List every defined environment
    List {
        #[arg(long)]
        json: bool,
    },
    /// Resolve the current environment from a process variable
    Current {
        /// Variable to read (defaults to the configured one)
        #[arg(short, long)]
        var: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print an environment name in another case
    Format {
        environment: String,
        #[arg(long, value_enum, default_value = "title")]
        case: Case,
        /// Language tag selecting casing rules, e.g. "tr"
        #[arg(long, default_value = "en")]
        locale: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let (config, registry) = commands::load(cli.config.as_deref())?;

    let output = match cli.command {
        Commands::Check { environment, json } => {
            commands::render_report(&commands::check(&registry, &environment), json)?
        }
        Commands::List { json } => commands::render_list(&commands::list(&registry), json)?,
        Commands::Current { var, json } => {
            let var = var.unwrap_or(config.variable);
            info!(%var, "resolving current environment");
            let report = commands::resolve_current(
                CurrentEnvironment::global(),
                &registry,
                &SystemEnv,
                &var,
            )
            .inspect_err(|e| error!("Failed to resolve current environment: {}", e))?;
            commands::render_report(&report, json)?
        }
        Commands::Format {
            environment,
            case,
            locale,
        } => commands::format(&environment, case, Locale::from_tag(&locale)),
    };

    println!("{output}");
    Ok(())
}
