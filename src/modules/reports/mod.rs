pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use controllers::configure;
pub use models::{Report, ReportStatus, ReportType};
pub use repositories::ReportStore;
pub use services::ReportService;
