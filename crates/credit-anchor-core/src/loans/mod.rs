pub mod amortization;
pub mod comparison;
pub mod eligibility;
pub mod true_cost;
