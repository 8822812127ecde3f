pub mod calendar;
pub mod daily;
pub mod dashboard;

pub use calendar::{month_bounds, month_pnl, CalendarDay};
pub use daily::{daily_context, DailyContext};
pub use dashboard::DashboardStats;

pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
