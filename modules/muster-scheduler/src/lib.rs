pub mod notify;
pub mod scheduler;

pub use scheduler::{LifecycleScheduler, SweepStats};
