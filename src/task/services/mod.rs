//! Application services for the task pipeline.

mod intake;
mod processing;
mod worker;

pub use intake::{CreateTaskReceipt, IntakeError, IntakeResult, IntakeService};
pub use processing::{ProcessOutcome, ProcessingError, ProcessingResult, ProcessingService};
pub use worker::ProcessingWorker;
