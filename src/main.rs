use clap::Parser;
use pmvault::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `PM_LOG=debug`.
const LOG_ENV: &str = "PM_LOG";

fn main() {
    // Diagnostics go to stderr so stdout stays clean for `pm generate | ...`.
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => pmvault::cli::commands::init::execute(&cli),
        Commands::Add {
            ref title,
            generate,
            length,
        } => pmvault::cli::commands::add::execute(&cli, title, generate, length),
        Commands::Get { ref title, show } => pmvault::cli::commands::get::execute(&cli, title, show),
        Commands::List => pmvault::cli::commands::list::execute(&cli),
        Commands::Update { ref title } => pmvault::cli::commands::update::execute(&cli, title),
        Commands::Delete { ref title, force } => {
            pmvault::cli::commands::delete::execute(&cli, title, force)
        }
        Commands::Generate { length } => pmvault::cli::commands::generate::execute(&cli, length),
        Commands::Version => pmvault::cli::commands::version::execute(),
        Commands::Completions { shell } => pmvault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        pmvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
