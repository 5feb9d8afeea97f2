//! The CI provider operations the monitor performs, as a trait.
//!
//! Mirrors the GitHub seam: the log pipeline is written against this
//! trait so the empty-log edge cases can be tested with a fake.

use std::future::Future;

use super::build::{Build, BuildRef, LogEntry};
use super::error::CiApiError;

/// CI REST operations used by one monitor invocation.
pub trait BuildApi {
    /// Fetches build metadata for the given build reference.
    fn build(&self, build: &BuildRef) -> impl Future<Output = Result<Build, CiApiError>> + Send;

    /// Fetches an action's raw output from its output URL.
    fn action_output(
        &self,
        output_url: &str,
    ) -> impl Future<Output = Result<Vec<LogEntry>, CiApiError>> + Send;
}
