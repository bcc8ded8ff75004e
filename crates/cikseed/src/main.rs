mod cli;
mod config;
mod seed;

// remote imports
use clap::Parser;
use cli::{Cli, TraceLevel};
use colored::Colorize;
use config::Settings;
use tracing::{error, subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

////////////////////////////////////////////////////////////////////////////

// preprocess the trace level
fn preprocess(trace_level: Level) {
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .finish();
    subscriber::set_global_default(my_subscriber).expect("Set subscriber");
}

////////////////////////////////////////////////////////////////////////////

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // set the trace level
    if let Some(trace_level) = cli.trace {
        preprocess(match trace_level {
            TraceLevel::DEBUG => Level::DEBUG,
            TraceLevel::ERROR => Level::ERROR,
            TraceLevel::INFO => Level::INFO,
            TraceLevel::TRACE => Level::TRACE,
            TraceLevel::WARN => Level::WARN,
        });
    }
    trace!("command line input recorded: {cli:?}");

    // if no trace level provided, use tui
    let tui = cli.trace.is_none();

    let settings = Settings::from_env().map_err(|err| {
        error!("failed to read settings, error({err})");
        err
    })?;
    trace!("settings loaded: {settings:?}");

    // read cli inputs
    use cli::Commands::*;
    let outcome = match &cli.command {
        // `cikseed seed [--source <SOURCE>]`: schema, then every company
        Seed(args) => seed::run(&settings, args, true, tui).await,

        // `cikseed ingest [--source <SOURCE>]`: companies only
        Ingest(args) => seed::run(&settings, args, false, tui).await,

        // `cikseed schema`: schema and headers only
        Schema => seed::schema(&settings, tui).await,
    };

    if tui {
        match &outcome {
            Ok(()) => println!("{}", "cikseed finished".green()),
            Err(err) => eprintln!("{} {err:#}", "cikseed failed:".red()),
        }
    }

    outcome
}
