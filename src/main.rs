use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use wp_tasks::config::TasksConfig;
use wp_tasks::logging;
use wp_tasks::tasks::{InstallOutcome, Services, Tasks, UpdateOutcome};

#[derive(Parser)]
#[command(name = "wp-tasks")]
#[command(version, about = "Build tasks for bootstrapping and upgrading WordPress")]
struct Cli {
    /// WordPress project root
    #[arg(long, global = true, default_value = ".")]
    path: PathBuf,

    /// Config file (defaults to <path>/wp-tasks.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also write JSON logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download WordPress core files unless already installed
    Install {
        /// Version constraint, e.g. `*`, `v4.*`, `4.9.8`, `^5.0`
        #[arg(default_value = "*")]
        constraint: String,
    },
    /// Replace the installed core files with the release matching the constraint
    Update {
        /// Version constraint, e.g. `*`, `v4.*`, `4.9.8`, `^5.0`
        #[arg(default_value = "*")]
        constraint: String,
    },
    /// Write a fresh set of security salts
    #[command(alias = "generate-salts")]
    Salts,
    /// Create writable directories such as wp-content/uploads
    #[command(alias = "fix-permissions")]
    Permissions,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _guard = logging::init(
        logging::default_directive(cli.verbose, cli.quiet),
        cli.log_file.as_deref(),
    )?;

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = TasksConfig::load(&cli.path, cli.config.as_deref())?;
    let services = Services::from_config(&config, &cli.path)?;
    let tasks = Tasks::new(cli.path, config, services);

    match cli.command {
        Command::Install { constraint } => match tasks.install(&constraint).await? {
            InstallOutcome::AlreadyInstalled => info!("Nothing to install"),
            InstallOutcome::Installed { version } => info!("WordPress {} installed", version),
        },
        Command::Update { constraint } => match tasks.update(&constraint).await? {
            UpdateOutcome::Installed { version } => info!("WordPress {} installed", version),
            UpdateOutcome::UpToDate { version } => info!("WordPress {} is up to date", version),
            UpdateOutcome::Updated { from, to, removed } => {
                info!("WordPress updated {} -> {} ({} stock paths replaced)", from, to, removed)
            }
        },
        Command::Salts => {
            let path = tasks.generate_salts().await?;
            info!("Salts written to {}", path.display());
        }
        Command::Permissions => {
            let dirs = tasks.fix_permissions()?;
            info!("{} writable directories in place", dirs.len());
        }
    }

    Ok(())
}
