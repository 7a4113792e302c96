use crate::report::{run_init_db, run_list, run_stats, ListArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use job_tracker::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Job Application Tracker",
    about = "Track job applications from the browser or the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Create the applications table if it does not exist yet
    InitDb(DatabaseArgs),
    /// Print total and per-status application counts
    Stats(DatabaseArgs),
    /// Print every application, most recent first
    List(ListArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) database: DatabaseArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DatabaseArgs {
    /// Override the configured database URL (`memory` for a throwaway store)
    #[arg(long)]
    pub(crate) database_url: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::InitDb(args) => run_init_db(args).await,
        Command::Stats(args) => run_stats(args).await,
        Command::List(args) => run_list(args).await,
    }
}
