use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use mediawiki_charm::{AppError, Settings};
use tracing::error;

#[derive(Parser)]
#[command(name = "mediawiki-charm")]
#[command(version)]
#[command(
    about = "Install MediaWiki and keep its settings in step with its relations",
    long_about = None
)]
struct Cli {
    /// Directory holding LocalSettings.php and the rendered settings files
    #[arg(long, global = true, env = "MEDIAWIKI_CONFIG_DIR", default_value = "/etc/mediawiki")]
    config_dir: PathBuf,
    /// Unpacked charm directory; unit state is kept beneath it
    #[arg(long, global = true, env = "JUJU_CHARM_DIR", default_value = ".")]
    charm_dir: PathBuf,
    /// Directory with the MediaWiki maintenance scripts
    #[arg(
        long,
        global = true,
        env = "MEDIAWIKI_MAINTENANCE_DIR",
        default_value = "/usr/share/mediawiki/maintenance"
    )]
    maintenance_dir: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle the hook named by JUJU_DISPATCH_PATH
    Dispatch,
    /// Handle a hook by name
    Hook {
        /// Hook name, e.g. db-relation-changed
        name: String,
    },
    /// Render a settings template to stdout
    Render {
        /// Template file name: config.php, db.php or memcached.php
        template: String,
        /// JSON object with the template values
        #[arg(short, long)]
        input: String,
    },
}

fn main() {
    let cli = Cli::parse();
    mediawiki_charm::init_logging();
    let settings = Settings::new(cli.config_dir, cli.charm_dir, cli.maintenance_dir);

    let result: Result<(), AppError> = match cli.command {
        Commands::Dispatch => mediawiki_charm::dispatch(settings).map(|_| ()),
        Commands::Hook { name } => mediawiki_charm::run_hook(&name, settings).map(|_| ()),
        Commands::Render { template, input } => {
            match mediawiki_charm::render(&template, &input) {
                Ok(out) => print!("{}", out),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            }
            Ok(())
        }
    };

    // Workload failures are already reported through the unit status.
    if let Err(e) = result {
        error!(error = %e, "Hook failed");
        if is_usage_error(&e) {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Errors caused by how the binary was invoked rather than by the workload.
fn is_usage_error(err: &AppError) -> bool {
    matches!(err, AppError::MissingEnv(_))
}
