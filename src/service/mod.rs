pub mod analyzer;
pub mod assistant;
pub mod insights;
pub mod recurrence;
pub mod routing;
