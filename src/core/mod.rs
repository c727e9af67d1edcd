// Core algorithm exports
pub mod filters;
pub mod lifecycle;
pub mod matcher;
pub mod reasons;
pub mod scoring;
pub mod tables;

pub use filters::{is_eligible_mentee, is_eligible_mentor};
pub use matcher::{CompatibilityEngine, RankingOptions};
pub use reasons::match_reasons;
pub use scoring::{calculate_breakdown, calculate_compatibility};
