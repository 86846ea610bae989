use crate::share::{ErrorLog, ShareAction, ShareError};
use tracing::Level;

/// Route `tracing` output to the browser console on web and stderr on desktop.
pub fn init_logging(level: Level) {
    if let Err(err) = dioxus::logger::init(level) {
        eprintln!("[logging] subscriber already installed: {err}");
    }
}

/// Wall-clock start point that works on wasm, where `Instant` is unavailable.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct PerfTimer(std::time::Instant);

#[cfg(not(target_arch = "wasm32"))]
impl PerfTimer {
    pub fn start() -> Self {
        Self(std::time::Instant::now())
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.0.elapsed().as_millis()
    }
}

#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy)]
pub struct PerfTimer(f64);

#[cfg(target_arch = "wasm32")]
fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
        .unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
impl PerfTimer {
    pub fn start() -> Self {
        Self(performance_now())
    }

    pub fn elapsed_ms(&self) -> u128 {
        (performance_now() - self.0).max(0.0) as u128
    }
}

fn perf_line(scope: &str, elapsed_ms: u128, details: &str) -> String {
    if details.trim().is_empty() {
        format!("[perf] {scope} took {elapsed_ms}ms")
    } else {
        format!("[perf] {scope} took {elapsed_ms}ms | {details}")
    }
}

#[inline]
pub fn log_perf(scope: &str, started_at: PerfTimer, details: &str) {
    tracing::debug!("{}", perf_line(scope, started_at.elapsed_ms(), details));
}

/// Default error sink for share actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorLog;

impl ErrorLog for TracingErrorLog {
    fn log_error(&self, action: ShareAction, error: &ShareError) {
        tracing::error!(action = action.as_str(), error = %error, "share action failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perf_line_appends_details_when_present() {
        assert_eq!(
            perf_line("share.copy_link", 12, "dashboard=42 outcome=ok"),
            "[perf] share.copy_link took 12ms | dashboard=42 outcome=ok"
        );
        assert_eq!(perf_line("share.copy_link", 3, "  "), "[perf] share.copy_link took 3ms");
    }

    #[test]
    fn timer_measures_elapsed_time() {
        let started_at = PerfTimer::start();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(started_at.elapsed_ms() >= 5);
        log_perf("share.test", started_at, "");
    }
}
