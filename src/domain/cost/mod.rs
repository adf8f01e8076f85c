pub mod cost_record;
pub mod estimator;
pub mod report;
