use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use credit_anchor_core::loans::amortization::{self, EmiInput};
use credit_anchor_core::loans::comparison::{self, ComparisonInput, LoanOffer};
use credit_anchor_core::loans::eligibility::{self, EligibilityInput};
use credit_anchor_core::loans::true_cost::{self, LoanTerms};

use super::{emit, CommandResult};
use crate::input;

/// Arguments for the EMI calculator
#[derive(Args)]
pub struct EmiArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount; separators like 2,50,000 are accepted
    #[arg(long)]
    pub principal: Option<String>,

    /// Annual interest rate in percent (12 = 12%)
    #[arg(long)]
    pub rate: Option<String>,

    /// Tenure in months
    #[arg(long)]
    pub months: Option<String>,
}

/// Arguments for the true-cost breakdown
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct TrueCostArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in years
    #[arg(long)]
    pub years: Option<u32>,

    #[arg(long)]
    pub processing_fee: Option<Decimal>,

    #[arg(long)]
    pub insurance: Option<Decimal>,

    #[arg(long)]
    pub prepayment_charge: Option<Decimal>,

    #[arg(long)]
    pub other_charges: Option<Decimal>,
}

/// Arguments for the loan eligibility check
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct EligibilityArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long)]
    pub monthly_income: Option<Decimal>,

    /// Annual income, used when --monthly-income is absent
    #[arg(long, conflicts_with = "monthly_income")]
    pub annual_income: Option<Decimal>,

    #[arg(long)]
    pub monthly_expenses: Option<Decimal>,

    /// Requested loan amount
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in years
    #[arg(long)]
    pub years: Option<u32>,
}

/// Arguments for ranking loan offers
#[derive(Args)]
pub struct CompareLoansArgs {
    /// Path to JSON input file: {"offers": [...]} or a bare array
    #[arg(long)]
    pub input: Option<String>,

    /// Offer as LENDER:RATE:EMI:MONTHS, repeatable
    #[arg(long = "offer", value_parser = parse_offer)]
    pub offers: Vec<LoanOffer>,
}

pub fn run_emi(args: EmiArgs) -> CommandResult {
    tracing::debug!(from_file = args.input.is_some(), "emi");
    let result = match input::read_payload::<EmiInput>(args.input.as_deref())? {
        Some(request) => request.compute()?,
        None => amortization::compute_emi_from_strings(
            args.principal
                .as_deref()
                .ok_or("--principal is required (or provide --input)")?,
            args.rate
                .as_deref()
                .ok_or("--rate is required (or provide --input)")?,
            args.months
                .as_deref()
                .ok_or("--months is required (or provide --input)")?,
        )?,
    };
    Ok(serde_json::to_value(result)?)
}

pub fn run_true_cost(args: TrueCostArgs) -> CommandResult {
    tracing::debug!(from_file = args.input.is_some(), "true-cost");
    let terms = match input::read_payload::<LoanTerms>(args.input.as_deref())? {
        Some(terms) => terms,
        None => LoanTerms {
            principal: args.principal.unwrap_or_default(),
            annual_rate_pct: args.rate.unwrap_or_default(),
            tenure_years: args.years.unwrap_or_default(),
            processing_fee: args.processing_fee.unwrap_or_default(),
            insurance: args.insurance.unwrap_or_default(),
            prepayment_charge: args.prepayment_charge.unwrap_or_default(),
            other_charges: args.other_charges.unwrap_or_default(),
        },
    };
    emit("true-cost", &true_cost::compute_true_cost(&terms))
}

pub fn run_eligibility(args: EligibilityArgs) -> CommandResult {
    tracing::debug!(from_file = args.input.is_some(), "eligibility");
    let request = match input::read_payload::<EligibilityInput>(args.input.as_deref())? {
        Some(request) => request,
        None => {
            let monthly_income = args
                .monthly_income
                .or_else(|| args.annual_income.map(|annual| annual / dec!(12)))
                .ok_or("--monthly-income or --annual-income is required (or provide --input)")?;
            EligibilityInput {
                loan_amount: args.loan_amount.unwrap_or_default(),
                annual_rate_pct: args.rate.unwrap_or_default(),
                tenure_years: args.years.unwrap_or_default(),
                monthly_income,
                monthly_expenses: args
                    .monthly_expenses
                    .ok_or("--monthly-expenses is required (or provide --input)")?,
            }
        }
    };
    emit("eligibility", &eligibility::assess_eligibility(&request)?)
}

pub fn run_compare_loans(args: CompareLoansArgs) -> CommandResult {
    tracing::debug!(flag_offers = args.offers.len(), "compare-loans");
    let request = if !args.offers.is_empty() && args.input.is_none() {
        ComparisonInput {
            offers: args.offers,
        }
    } else {
        let payload: Value = input::require_payload(args.input.as_deref(), "compare-loans")?;
        comparison_from_value(payload)?
    };
    emit("compare-loans", &comparison::compare_loans(&request)?)
}

fn comparison_from_value(payload: Value) -> Result<ComparisonInput, serde_json::Error> {
    match payload {
        Value::Array(_) => Ok(ComparisonInput {
            offers: serde_json::from_value(payload)?,
        }),
        other => serde_json::from_value(other),
    }
}

fn parse_offer(raw: &str) -> Result<LoanOffer, String> {
    let parts: Vec<&str> = raw.rsplitn(4, ':').collect();
    let [months, emi, rate, lender] = parts.as_slice() else {
        return Err(format!("expected LENDER:RATE:EMI:MONTHS, got '{raw}'"));
    };
    Ok(LoanOffer {
        lender: lender.trim().to_string(),
        annual_rate_pct: rate
            .trim()
            .parse::<Decimal>()
            .map_err(|e| format!("bad rate '{rate}': {e}"))?,
        emi: emi
            .trim()
            .parse::<Decimal>()
            .map_err(|e| format!("bad EMI '{emi}': {e}"))?,
        tenure_months: months
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("bad tenure '{months}': {e}"))?,
    })
}
