pub mod config;
pub mod error;
pub mod mail;
pub mod storage;
pub mod sweep;
pub mod video;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use sweep::{run_sweep, SweepOptions, SweepReport};
