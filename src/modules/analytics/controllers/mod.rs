pub mod analytics_controller;
pub mod period_query;

pub use analytics_controller::configure;
pub use period_query::PeriodQuery;
