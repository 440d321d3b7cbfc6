pub mod cycle;
pub mod dispatch;
pub mod schedule;
