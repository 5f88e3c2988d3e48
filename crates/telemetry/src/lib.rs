//! Logging and query metrics for the Mallorca guide.
//!
//! - [`init_with_config`] installs a `tracing` subscriber writing compact
//!   lines to stderr, so stdout stays clean for JSON output
//! - [`metrics`] is a process-wide registry of counters and latency histograms
//! - [`Timer`] records the duration of a scope into a histogram, and
//!   [`timed_span!`] pairs one with an info span

use mallorca_core::config::LoggingConfig;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

static METRICS: Lazy<MetricsRegistry> = Lazy::new(MetricsRegistry::new);

/// Correlates every log line of one process.
static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Initialize logging. `RUST_LOG` takes precedence over `config.log_level`.
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| anyhow::anyhow!("Invalid log level '{}': {}", config.log_level, e))?;

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(config.show_target)
            .with_ansi(config.ansi)
            .compact(),
    );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(
        session_id = %session_id(),
        version = env!("CARGO_PKG_VERSION"),
        "Telemetry initialized"
    );

    Ok(())
}

pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub show_target: bool,
    pub ansi: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            show_target: false,
            ansi: true,
        }
    }
}

impl TelemetryConfig {
    /// Raises the level by `-v` count: 1 → info, 2 → debug, 3+ → trace.
    ///
    /// Never lowers a level already more verbose than the flag asks for.
    #[must_use]
    pub fn with_verbosity(mut self, verbose: u8) -> Self {
        let requested = match verbose {
            0 => return self,
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        if level_rank(requested) > level_rank(&self.log_level) {
            self.log_level = requested.to_string();
        }
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }
}

impl From<&LoggingConfig> for TelemetryConfig {
    fn from(config: &LoggingConfig) -> Self {
        Self {
            log_level: config.level.clone(),
            show_target: config.show_target,
            ..Self::default()
        }
    }
}

fn level_rank(level: &str) -> u8 {
    match level.to_ascii_lowercase().as_str() {
        "off" => 0,
        "error" => 1,
        "warn" => 2,
        "info" => 3,
        "debug" => 4,
        "trace" => 5,
        // Unknown levels are never overridden
        _ => u8::MAX,
    }
}

/// Counters and latency histograms.
pub struct MetricsRegistry {
    counters: RwLock<HashMap<String, AtomicU64>>,
    histograms: RwLock<HashMap<String, Vec<f64>>>,
    start_time: Instant,
}

impl MetricsRegistry {
    fn new() -> Self {
        Self {
            counters: RwLock::new(HashMap::new()),
            histograms: RwLock::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    pub fn increment(&self, name: &str) {
        self.increment_by(name, 1);
    }

    pub fn increment_by(&self, name: &str, value: u64) {
        {
            let counters = self.counters.read().unwrap_or_else(|e| e.into_inner());
            if let Some(counter) = counters.get(name) {
                counter.fetch_add(value, Ordering::Relaxed);
                return;
            }
        }
        let mut counters = self.counters.write().unwrap_or_else(|e| e.into_inner());
        counters
            .entry(name.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(value, Ordering::Relaxed);
    }

    /// Current value of a counter; unknown counters read as zero.
    pub fn counter(&self, name: &str) -> u64 {
        self.counters
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    pub fn histogram(&self, name: &str, value: f64) {
        let mut histograms = self.histograms.write().unwrap_or_else(|e| e.into_inner());
        histograms.entry(name.to_string()).or_default().push(value);
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Point-in-time copy of every metric, sorted by name.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let counters = self
            .counters
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(k, v)| (k.clone(), v.load(Ordering::Relaxed)))
            .collect();
        let histograms = self
            .histograms
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(k, v)| (k.clone(), HistogramStats::from_values(v)))
            .collect();

        MetricsSnapshot {
            session_id: session_id().to_string(),
            uptime_ms: self.uptime().as_secs_f64() * 1000.0,
            counters,
            histograms,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub session_id: String,
    pub uptime_ms: f64,
    pub counters: BTreeMap<String, u64>,
    pub histograms: BTreeMap<String, HistogramStats>,
}

/// Summary of one histogram. Values are milliseconds for timers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub p50: f64,
    pub p95: f64,
}

impl HistogramStats {
    fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                count: 0,
                min: 0.0,
                max: 0.0,
                mean: 0.0,
                p50: 0.0,
                p95: 0.0,
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let sum: f64 = sorted.iter().sum();

        Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean: sum / count as f64,
            p50: percentile(&sorted, 50.0),
            p95: percentile(&sorted, 95.0),
        }
    }
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((p / 100.0) * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// The process-wide registry.
pub fn metrics() -> &'static MetricsRegistry {
    &METRICS
}

/// Records elapsed milliseconds into a histogram when stopped or dropped.
pub struct Timer {
    name: String,
    start: Instant,
    recorded: bool,
}

impl Timer {
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
            recorded: false,
        }
    }

    pub fn stop(mut self) -> Duration {
        self.record()
    }

    fn record(&mut self) -> Duration {
        let duration = self.start.elapsed();
        if !self.recorded {
            self.recorded = true;
            metrics().histogram(&self.name, duration.as_secs_f64() * 1000.0);
            tracing::trace!(
                metric = %self.name,
                duration_us = duration.as_micros() as u64,
                "Timer completed"
            );
        }
        duration
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.record();
    }
}

/// Opens an info span and times it for the rest of the enclosing block.
#[macro_export]
macro_rules! timed_span {
    ($name:expr) => {
        let _timer = $crate::Timer::start($name);
        let _span = tracing::info_span!($name).entered();
    };
    ($name:expr, $($field:tt)*) => {
        let _timer = $crate::Timer::start($name);
        let _span = tracing::info_span!($name, $($field)*).entered();
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let registry = MetricsRegistry::new();
        registry.increment("queries.nearby");
        registry.increment("queries.nearby");
        registry.increment_by("queries.nearby", 3);

        assert_eq!(registry.counter("queries.nearby"), 5);
        assert_eq!(registry.counter("queries.list"), 0);
    }

    #[test]
    fn test_histogram_stats() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let stats = HistogramStats::from_values(&values);

        assert_eq!(stats.count, 10);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 10.0);
        assert_eq!(stats.mean, 5.5);
        assert_eq!(stats.p95, 10.0);
    }

    #[test]
    fn test_snapshot_is_sorted() {
        let registry = MetricsRegistry::new();
        registry.increment("b");
        registry.increment("a");
        registry.histogram("latency", 2.5);

        let snapshot = registry.snapshot();
        let names: Vec<&String> = snapshot.counters.keys().collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(snapshot.histograms["latency"].count, 1);
    }

    #[test]
    fn test_timer_records_once() {
        let name = "test.timer_records_once";
        let timer = Timer::start(name);
        std::thread::sleep(Duration::from_millis(5));
        let duration = timer.stop();
        assert!(duration.as_millis() >= 5);

        let snapshot = metrics().snapshot();
        assert_eq!(snapshot.histograms[name].count, 1);
    }

    #[test]
    fn test_timer_records_on_drop() {
        let name = "test.timer_records_on_drop";
        {
            let _timer = Timer::start(name);
        }
        assert_eq!(metrics().snapshot().histograms[name].count, 1);
    }

    #[test]
    fn test_timed_span_records_for_enclosing_block() {
        let name = "test.timed_span";
        {
            timed_span!("test.timed_span", kinds = 2);
            assert!(!metrics().snapshot().histograms.contains_key(name));
        }
        assert_eq!(metrics().snapshot().histograms[name].count, 1);
    }

    #[test]
    fn test_verbosity() {
        let base = TelemetryConfig::default();
        assert_eq!(base.clone().with_verbosity(0).log_level, "warn");
        assert_eq!(base.clone().with_verbosity(1).log_level, "info");
        assert_eq!(base.clone().with_verbosity(2).log_level, "debug");
        assert_eq!(base.with_verbosity(7).log_level, "trace");

        let debug = TelemetryConfig {
            log_level: "debug".to_string(),
            ..Default::default()
        };
        assert_eq!(debug.with_verbosity(1).log_level, "debug");
    }

    #[test]
    fn test_from_logging_config() {
        let logging = LoggingConfig {
            level: "info".to_string(),
            show_target: true,
        };
        let config = TelemetryConfig::from(&logging);
        assert_eq!(config.log_level, "info");
        assert!(config.show_target);
    }

    #[test]
    fn test_session_id() {
        assert!(Uuid::parse_str(session_id()).is_ok());
    }
}
