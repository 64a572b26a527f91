//! Temporal value types

pub mod cron;
pub mod duration;
pub mod relative;

pub use cron::{CronExpression, CronSchedule};
pub use duration::Duration;
pub use relative::RelativeOffset;
