//! The batch engine: execute validated records and report the results.

pub mod executor;
pub mod outcome;
pub mod report;

pub use executor::{
    execute, parse_reference, BatchObserver, ExecuteOptions, Progress, SilentObserver,
};
pub use outcome::{OperationOutcome, OutcomeStatus, DRY_RUN_NUMBER, DRY_RUN_URL};
pub use report::{format_summary, persist, summarize, BatchSummary};
