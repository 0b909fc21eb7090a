use clap::Args;

use credit_anchor_core::readiness::profile::ProfileForm;
use credit_anchor_core::readiness::scorer;

use super::{emit, CommandResult};
use crate::input;

/// Arguments for the credit-readiness score.
///
/// Every flag is taken as typed; blanks and non-numbers score as zero.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ReadinessArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long, default_value = "")]
    pub income: String,

    #[arg(long, default_value = "")]
    pub expenses: String,

    #[arg(long, default_value = "")]
    pub savings: String,

    /// government, salaried, self-employed, business-owner, student, ...
    #[arg(long, default_value = "")]
    pub employment: String,

    #[arg(long, default_value = "")]
    pub dependents: String,

    /// owned, rented, with-family
    #[arg(long, default_value = "")]
    pub residence: String,

    /// post-graduate, graduate, under-graduate, high-school
    #[arg(long, default_value = "")]
    pub education: String,

    #[arg(long, default_value = "")]
    pub age: String,
}

impl From<ReadinessArgs> for ProfileForm {
    fn from(args: ReadinessArgs) -> Self {
        ProfileForm {
            monthly_income: args.income,
            monthly_expenses: args.expenses,
            savings_amount: args.savings,
            employment_type: args.employment,
            dependents: args.dependents,
            residence_type: args.residence,
            education_level: args.education,
            age: args.age,
        }
    }
}

pub fn run_readiness(args: ReadinessArgs) -> CommandResult {
    tracing::debug!(from_file = args.input.is_some(), "readiness");
    let form = match input::read_payload::<ProfileForm>(args.input.as_deref())? {
        Some(form) => form,
        None => ProfileForm::from(args),
    };
    emit("readiness", &scorer::score_form(&form))
}
