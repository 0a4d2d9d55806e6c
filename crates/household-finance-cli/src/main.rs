mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::history::{TerritoryArgs, TreatiesArgs};
use commands::mortgage::{BreakdownArgs, CgtArgs, ExpectedRateArgs, MortgageArgs, PayoffArgs, RepaymentArgs};
use commands::vehicle::LeaseArgs;

/// Household finance calculations: novated lease vs ownership, mortgages, CGT
#[derive(Parser)]
#[command(
    name = "hfc",
    version,
    about = "Household finance calculations",
    long_about = "A CLI for the car ownership vs. novated lease comparison and the \
                  mortgage repayment and sale projection, computed with decimal \
                  precision. Also browses the treaty table and territorial timeline."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// JSON or YAML file overriding the model assumptions
    #[arg(long, global = true)]
    assumptions: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare keeping the current car with a novated lease on a new one
    Lease(LeaseArgs),
    /// Full mortgage repayment, sale and savings report
    Mortgage(MortgageArgs),
    /// Monthly repayment for a fixed-rate loan
    Repayment(RepaymentArgs),
    /// Yearly principal/interest split of a loan
    Breakdown(BreakdownArgs),
    /// Loan term when paying extra each month
    Payoff(PayoffArgs),
    /// Capital gains tax on a property sale
    Cgt(CgtArgs),
    /// Expected loan rate from long and short term rates
    ExpectedRate(ExpectedRateArgs),
    /// Browse the treaty table
    Treaties(TreatiesArgs),
    /// Territorial status for a year, or the whole timeline
    Territory(TerritoryArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let model = match input::assumptions::load(cli.assumptions.as_deref()) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Lease(args) => commands::vehicle::run_lease(args, &model),
        Commands::Mortgage(args) => commands::mortgage::run_mortgage(args, &model),
        Commands::Repayment(args) => commands::mortgage::run_repayment(args),
        Commands::Breakdown(args) => commands::mortgage::run_breakdown(args),
        Commands::Payoff(args) => commands::mortgage::run_payoff(args),
        Commands::Cgt(args) => commands::mortgage::run_cgt(args, &model),
        Commands::ExpectedRate(args) => commands::mortgage::run_expected_rate(args),
        Commands::Treaties(args) => commands::history::run_treaties(args),
        Commands::Territory(args) => commands::history::run_territory(args),
        Commands::Version => {
            println!("hfc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
