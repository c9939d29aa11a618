mod alert;
mod runner;
mod schedule;

pub use runner::{run_sweep, SweepOptions, SweepReport};
pub use schedule::{cycle_period, window_offset};
