use crate::commands::{run_ask, run_assess, run_extract, AskArgs, AssessArgs, ExtractArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use leave_intel::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Leave Intelligence Engine",
    about = "Extract, assess and answer leave requests from the command line or over HTTP",
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
    /// Extract a structured leave request from correspondence
    Extract(ExtractArgs),
    /// Score the likely outcome of a draft stored as JSON
    Assess(AssessArgs),
    /// Ask the HR assistant a question
    Ask(AskArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Extract(args) => run_extract(args).await,
        Command::Assess(args) => run_assess(args).await,
        Command::Ask(args) => run_ask(args).await,
    }
}
