use crate::demo::{run_demo, run_profile, run_search, DemoArgs, ProfileArgs, SearchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use foundyou::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "FoundYou",
    about = "Run the FoundYou talent marketplace API or explore it from the command line",
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
    /// Search the talent listing and print one page of cards
    Search(SearchArgs),
    /// Print an engineer profile
    Profile(ProfileArgs),
    /// Walk through search, onboarding, and signup end to end
    Demo(DemoArgs),
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
        Command::Search(args) => run_search(args).await,
        Command::Profile(args) => run_profile(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}
