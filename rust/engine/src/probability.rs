use tracing::debug;

/// Runs `scenario` exactly `iterations` times and returns the percentage of
/// runs that reported success. Zero iterations yield `0.0`.
///
/// ```
/// use cardlang_engine::probability::run_probability_test;
///
/// assert_eq!(run_probability_test(5, || true), 100.0);
/// assert_eq!(run_probability_test(5, || false), 0.0);
/// ```
pub fn run_probability_test<F>(iterations: usize, mut scenario: F) -> f64
where
    F: FnMut() -> bool,
{
    let successes = (0..iterations).filter(|_| scenario()).count();
    debug!(iterations, successes, "probability test finished");
    percentage(successes, iterations)
}

/// Like [`run_probability_test`], but the first failing run aborts the whole
/// batch and its error is returned.
pub fn try_run_probability_test<F, E>(iterations: usize, mut scenario: F) -> Result<f64, E>
where
    F: FnMut() -> Result<bool, E>,
{
    let mut successes = 0usize;
    for _ in 0..iterations {
        if scenario()? {
            successes += 1;
        }
    }
    debug!(iterations, successes, "probability test finished");
    Ok(percentage(successes, iterations))
}

pub fn percentage(successes: usize, iterations: usize) -> f64 {
    if iterations == 0 {
        return 0.0;
    }
    successes as f64 / iterations as f64 * 100.0
}
