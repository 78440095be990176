use crate::demo::{run_demo, run_leads_report, DemoArgs, LeadsReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use prospect_engine::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Prospecting Intelligence Engine",
    about = "Demonstrate and run the prospecting intelligence engine from the command line",
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
    /// Market intelligence reports for sales planning
    Market {
        #[command(subcommand)]
        command: MarketCommand,
    },
    /// Run an end-to-end CLI demo covering statistics, leads, and ingestion
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum MarketCommand {
    /// Generate scored leads for a municipality and an optional visit route
    Leads(LeadsReportArgs),
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
        Command::Market {
            command: MarketCommand::Leads(args),
        } => run_leads_report(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
