pub mod payload;
pub mod report;

pub use payload::{
    CustomerPayload, FinancialPayload, InventoryPayload, PayloadEnvelope, ReportPayload,
    ServicePayload, WorkerPayload, PAYLOAD_VERSION,
};
pub use report::{Report, ReportFailure, ReportStatus, ReportType};
