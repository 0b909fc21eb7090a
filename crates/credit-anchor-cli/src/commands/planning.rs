use clap::{Args, ValueEnum};
use rust_decimal::Decimal;

use credit_anchor_core::planning::growth::{self, GrowthInput, GrowthMode};

use super::{emit, CommandResult};
use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Principal compounded annually; periods are years
    LumpSum,
    /// EMI loan; periods are months
    Amortizing,
}

impl From<ModeArg> for GrowthMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::LumpSum => GrowthMode::LumpSum,
            ModeArg::Amortizing => GrowthMode::Amortizing,
        }
    }
}

/// Arguments for the compound-growth planner
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct GrowthArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long, value_enum, default_value = "lump-sum")]
    pub mode: ModeArg,

    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Years (lump-sum) or months (amortizing)
    #[arg(long)]
    pub periods: Option<u32>,

    /// Annual inflation in percent
    #[arg(long, default_value = "0")]
    pub inflation: Decimal,
}

pub fn run_growth(args: GrowthArgs) -> CommandResult {
    tracing::debug!(mode = ?args.mode, from_file = args.input.is_some(), "growth");
    let request = match input::read_payload::<GrowthInput>(args.input.as_deref())? {
        Some(request) => request,
        None => GrowthInput {
            mode: args.mode.into(),
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_pct: args.rate.ok_or("--rate is required (or provide --input)")?,
            periods: args
                .periods
                .ok_or("--periods is required (or provide --input)")?,
            inflation_rate_pct: args.inflation,
        },
    };
    emit("growth", &growth::compute_growth(&request)?)
}
