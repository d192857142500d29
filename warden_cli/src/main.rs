use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use warden_cli::{commands, logging, CliError, Deployment, WardenConfig};

#[derive(Parser)]
#[command(
    name = "warden",
    version = env!("CARGO_PKG_VERSION"),
    about = "Answer authorization checks against a deployment file"
)]
struct Cli {
    /// Deployment file; defaults to the nearest Warden.toml
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (e.g. "info", "warden_engine=debug")
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether an actor may perform an ability
    Check {
        /// Actor name from the deployment file
        #[arg(long, value_name = "NAME")]
        actor: String,

        /// Ability (permission name) to check
        #[arg(long, value_name = "ABILITY")]
        ability: String,

        /// Entity key from the deployment file
        #[arg(long, value_name = "KEY")]
        entity: Option<String>,

        /// Scope the check applies to
        #[arg(long, value_name = "SCOPE")]
        scope: Option<String>,
    },
    /// List loaded permissions
    Permissions {
        /// Only list permissions for this resource kind
        #[arg(long, value_name = "KIND")]
        kind: Option<String>,
    },
    /// Load the deployment file and report problems
    Validate,
}

fn load(path: Option<PathBuf>) -> Result<Deployment, CliError> {
    let config = match path {
        Some(path) => WardenConfig::load(path)?,
        None => WardenConfig::from_project_root()?,
    };
    Deployment::build(config)
}

fn run(cli: Cli) -> Result<u8, CliError> {
    let deployment = load(cli.config)?;

    match cli.command {
        Commands::Check {
            actor,
            ability,
            entity,
            scope,
        } => {
            let result = commands::check(
                &deployment,
                &actor,
                &ability,
                entity.as_deref(),
                scope.as_deref(),
            );
            match &result {
                Ok(decision) => println!("{}", decision),
                Err(e) => eprintln!("Error: {}", e),
            }
            Ok(commands::check_status(&result))
        }
        Commands::Permissions { kind } => {
            for line in commands::permissions(&deployment, kind.as_deref()) {
                println!("{}", line);
            }
            Ok(commands::EXIT_ALLOW)
        }
        Commands::Validate => {
            println!("{}", commands::validate(&deployment));
            Ok(commands::EXIT_ALLOW)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.as_deref());

    match run(cli) {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(commands::EXIT_ERROR)
        }
    }
}
