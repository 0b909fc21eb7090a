mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::credit_building::{RoadmapArgs, SimulateArgs};
use commands::credit_health::{HealthReportArgs, ScoreTrendArgs};
use commands::loans::{CompareLoansArgs, EligibilityArgs, EmiArgs, TrueCostArgs};
use commands::planning::GrowthArgs;
use commands::readiness::ReadinessArgs;

/// Loan, savings-growth and credit-readiness calculations
#[derive(Parser)]
#[command(
    name = "anchor",
    version,
    about = "Loan, savings-growth and credit-readiness calculations",
    long_about = "A CLI for personal-finance calculations with decimal precision: \
                  EMI and true loan cost, compound growth with inflation, \
                  credit-readiness scoring, what-if score simulation and \
                  credit health tracking."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Equated monthly installment for a loan
    Emi(EmiArgs),
    /// Loan cost including interest and one-time fees
    TrueCost(TrueCostArgs),
    /// Compound growth with inflation-adjusted value and CAGR
    Growth(GrowthArgs),
    /// Heuristic 0-100 credit-readiness score
    Readiness(ReadinessArgs),
    /// What-if simulation on a bureau score
    Simulate(SimulateArgs),
    /// Credit-building roadmap progress
    Roadmap(RoadmapArgs),
    /// Loan eligibility from disposable income
    Eligibility(EligibilityArgs),
    /// Rank loan offers by total repayment
    CompareLoans(CompareLoansArgs),
    /// Debt, savings and expense ratios with recommendations
    HealthReport(HealthReportArgs),
    /// Summarise a credit score history
    ScoreTrend(ScoreTrendArgs),
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

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }

    let result = match cli.command {
        Commands::Emi(args) => commands::loans::run_emi(args),
        Commands::TrueCost(args) => commands::loans::run_true_cost(args),
        Commands::Growth(args) => commands::planning::run_growth(args),
        Commands::Readiness(args) => commands::readiness::run_readiness(args),
        Commands::Simulate(args) => commands::credit_building::run_simulate(args),
        Commands::Roadmap(args) => commands::credit_building::run_roadmap(args),
        Commands::Eligibility(args) => commands::loans::run_eligibility(args),
        Commands::CompareLoans(args) => commands::loans::run_compare_loans(args),
        Commands::HealthReport(args) => commands::credit_health::run_health_report(args),
        Commands::ScoreTrend(args) => commands::credit_health::run_score_trend(args),
        Commands::Version => {
            println!("anchor {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => output::format_output(&cli.output, &value),
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
