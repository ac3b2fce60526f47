use std::time::Instant;

use tracing::debug;

pub fn run_blocking<F, T>(action: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let started = Instant::now();
    let result = f();
    debug!(action, elapsed_ms = started.elapsed().as_millis() as u64, "blocking action finished");
    result
}
