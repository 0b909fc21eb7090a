pub mod credit_building;
pub mod credit_health;
pub mod loans;
pub mod planning;
pub mod readiness;

use serde::Serialize;
use serde_json::Value;

use credit_anchor_core::ComputationOutput;

pub type CommandResult = Result<Value, Box<dyn std::error::Error>>;

/// Surface envelope warnings in the log and serialise the envelope.
pub(crate) fn emit<T: Serialize>(command: &str, output: &ComputationOutput<T>) -> CommandResult {
    for warning in &output.warnings {
        tracing::warn!(command, "{warning}");
    }
    tracing::debug!(
        command,
        elapsed_us = output.metadata.computation_time_us,
        "computation finished"
    );
    Ok(serde_json::to_value(output)?)
}
