pub mod connection_service;
pub mod publish_service;
pub mod push_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use connection_service::ConnectionService;
pub use publish_service::PublishService;
pub use push_service::PushService;

use crate::domain::ExecutionFailure;
use crate::host::HostCallbacks;

/// Writes the single fatal line of a failed call and tells the host, once
pub(crate) fn report_failure(
    host: HostCallbacks<'_>, operation: &'static str, line: &str, failure: ExecutionFailure,
) -> ExecutionFailure {
    tracing::error!(
        operation,
        kind = %failure.kind(),
        error = %failure,
        "Artifactz call failed"
    );
    host.sink.fatal(line);
    host.failure.signal_failure(failure.message());
    failure
}
