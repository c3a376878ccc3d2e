pub mod clock;
pub mod log;
pub mod period;
pub mod plan;
pub mod report;
pub mod tracker;
