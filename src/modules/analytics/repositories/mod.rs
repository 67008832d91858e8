pub mod memory_record_repository;
pub mod mysql_record_repository;
pub mod record_repository;

pub use memory_record_repository::{InMemoryRecordRepository, RecordSet};
pub use mysql_record_repository::MySqlRecordRepository;
pub use record_repository::{
    BookingFilter, CustomerFilter, FinanceFilter, RecordRepository, ServiceFilter, WorkerFilter,
};
