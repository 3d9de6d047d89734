use std::future::Future;
use std::time::Instant;

pub const OPERATIONS_TOTAL: &str = "cipher_operations_total";
pub const OPERATION_DURATION_SECONDS: &str = "cipher_operation_duration_seconds";

fn record(operation: &'static str, success: bool, start: Instant) {
    let latency = start.elapsed().as_secs_f64();
    let labels = [
        ("operation", operation),
        ("status", if success { "success" } else { "failure" }),
    ];

    metrics::counter!(OPERATIONS_TOTAL, &labels).increment(1);
    metrics::histogram!(OPERATION_DURATION_SECONDS, &labels).record(latency);
}

/// Runs a synchronous cipher operation and records its outcome and latency.
pub fn measure<T, E>(operation: &'static str, op: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
    let start = Instant::now();
    let result = op();
    record(operation, result.is_ok(), start);
    result
}

pub async fn measure_async<T, E, F>(operation: &'static str, fut: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    let start = Instant::now();
    let result = fut.await;
    record(operation, result.is_ok(), start);
    result
}
