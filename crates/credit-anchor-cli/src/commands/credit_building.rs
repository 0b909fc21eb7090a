use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;

use credit_anchor_core::credit_building::roadmap::{self, TaskId};
use credit_anchor_core::credit_building::what_if::{self, WhatIfInput, DEFAULT_BASELINE_SCORE};

use super::CommandResult;
use crate::input;

/// Arguments for the what-if score simulator
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Starting bureau score (300-900)
    #[arg(long, default_value_t = DEFAULT_BASELINE_SCORE)]
    pub baseline: u32,

    /// Debt paid off
    #[arg(long, default_value = "0")]
    pub payoff: Decimal,

    /// Simulate a missed payment
    #[arg(long)]
    pub missed_payment: bool,

    /// Simulate a new loan application
    #[arg(long)]
    pub new_loan: bool,
}

/// Arguments for roadmap progress
#[derive(Args)]
pub struct RoadmapArgs {
    /// JSON file with completed task ids: [1, 3] or {"completed": [1, 3]}
    #[arg(long)]
    pub input: Option<String>,

    /// Completed task id, repeatable
    #[arg(long = "complete")]
    pub completed: Vec<TaskId>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CompletedIds {
    Bare(Vec<TaskId>),
    Wrapped { completed: Vec<TaskId> },
}

impl CompletedIds {
    fn into_ids(self) -> Vec<TaskId> {
        match self {
            CompletedIds::Bare(ids) | CompletedIds::Wrapped { completed: ids } => ids,
        }
    }
}

pub fn run_simulate(args: SimulateArgs) -> CommandResult {
    let request = match input::read_payload::<WhatIfInput>(args.input.as_deref())? {
        Some(request) => request,
        None => WhatIfInput {
            baseline_score: args.baseline,
            payoff_amount: args.payoff,
            missed_payment: args.missed_payment,
            new_loan: args.new_loan,
        },
    };
    tracing::debug!(baseline = request.baseline_score, "simulate");
    let delta = what_if::simulate(&request);
    Ok(serde_json::to_value(delta)?)
}

pub fn run_roadmap(args: RoadmapArgs) -> CommandResult {
    let mut ids = args.completed;
    if args.input.is_some() || ids.is_empty() {
        if let Some(payload) = input::read_payload::<CompletedIds>(args.input.as_deref())? {
            ids.extend(payload.into_ids());
        }
    }
    tracing::debug!(completed = ids.len(), "roadmap");
    let progress = roadmap::replay(&ids)?.snapshot();
    Ok(serde_json::to_value(progress)?)
}
