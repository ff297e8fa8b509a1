pub mod daily_log;
pub mod day_summary;
pub mod driver;
pub mod duty_event;
pub mod duty_status;
pub mod hourly_sample;
pub mod log_view;
