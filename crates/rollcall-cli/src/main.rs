mod count;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "rollcall")]
#[command(about = "Count recently active CRM users by product line, tier, and fee waiver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Count users seen within the last RECENCY_DAYS days
    Count {
        /// Window length in days (at least 1)
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        recency_days: u32,
        /// Use built-in sample data instead of querying Intercom
        #[arg(long)]
        test: bool,
        /// Tag the 7S1-only profiles in Intercom
        #[arg(long)]
        tag: bool,
        /// Fixed seed for email sampling
        #[arg(long)]
        seed: Option<u64>,
        /// Print results without posting them to Coda
        #[arg(long)]
        no_report: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = rollcall_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Count {
            recency_days,
            test,
            tag,
            seed,
            no_report,
        } => {
            let options = count::CountOptions {
                recency_days,
                test_mode: test,
                tag,
                seed,
                report: !no_report,
            };
            count::run_count(&config, &options).await
        }
    }
}
