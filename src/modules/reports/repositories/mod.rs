pub mod memory_report_store;
pub mod mysql_report_store;
pub mod report_store;

pub use memory_report_store::InMemoryReportStore;
pub use mysql_report_store::MySqlReportStore;
pub use report_store::ReportStore;
