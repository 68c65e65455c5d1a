use std::collections::HashMap;
use std::time::Instant;

/// Per-stage latency summary in whole milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageStats {
    pub min: u64,
    pub max: u64,
    pub avg: u64,
}

/// Elapsed-time samples for one named stage.
///
/// Stats are derived on demand, never stored incrementally; a stage with
/// no samples reports all zeros.
#[derive(Default, Debug)]
pub struct TimingStats {
    samples: Vec<f64>,
}

impl TimingStats {
    pub fn add(&mut self, ms: f64) {
        self.samples.push(ms);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn stats(&self) -> StageStats {
        if self.samples.is_empty() {
            return StageStats {
                min: 0,
                max: 0,
                avg: 0,
            };
        }
        let min = self.samples.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = self.samples.iter().cloned().fold(0.0, f64::max);
        let avg = self.samples.iter().sum::<f64>() / self.samples.len() as f64;
        StageStats {
            min: min.round() as u64,
            max: max.round() as u64,
            avg: avg.round() as u64,
        }
    }
}

/// Cross-cutting observer for pipeline run events.
///
/// Decouples the batch use case from any specific output mechanism, so
/// timing, logging, and future observers compose without touching the
/// orchestration code.
pub trait RunLogger: Send {
    /// Record how long a named stage took for one call.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events; for tests where logger
/// output is irrelevant.
pub struct SilentRunLogger;

impl RunLogger for SilentRunLogger {
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Default run logger: status messages go straight to stdout, timing
/// samples are discarded.
///
/// Reports are the program's primary output, so they bypass the `log`
/// facade and its level filtering.
pub struct PlainRunLogger;

impl RunLogger for PlainRunLogger {
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}

    fn info(&mut self, message: &str) {
        println!("{message}");
    }
}

/// Benchmarking logger: accumulates per-stage samples and reports
/// min/max/avg per stage on stdout at the end of the run.
#[derive(Default)]
pub struct BenchmarkRunLogger {
    timings: HashMap<String, TimingStats>,
}

impl BenchmarkRunLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// One line per stage, sorted by stage name for determinism, or
    /// `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() {
            return None;
        }

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();

        let mut lines = vec!["Timing statistics (ms):".to_string()];
        for stage in stages {
            let s = self.timings[stage].stats();
            lines.push(format!(
                "{stage}: {{'min': {}, 'max': {}, 'avg': {}}}",
                s.min, s.max, s.avg
            ));
        }
        Some(lines.join("\n"))
    }

    pub fn stats_for(&self, stage: &str) -> Option<StageStats> {
        self.timings.get(stage).map(TimingStats::stats)
    }

    pub fn sample_count(&self, stage: &str) -> usize {
        self.timings.get(stage).map_or(0, TimingStats::len)
    }
}

impl RunLogger for BenchmarkRunLogger {
    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings.entry(stage.to_string()).or_default().add(duration_ms);
    }

    fn info(&mut self, message: &str) {
        println!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            println!("\n{text}");
        }
    }
}

/// Times one call and attributes it to `stage`.
///
/// Purely observational: the wrapped operation's result (including an
/// error) passes through untouched, and failures are still timed.
pub fn measure<T, E>(
    logger: &mut dyn RunLogger,
    stage: &str,
    op: impl FnOnce() -> Result<T, E>,
) -> Result<T, E> {
    let start = Instant::now();
    let result = op();
    logger.timing(stage, start.elapsed().as_secs_f64() * 1000.0);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats_are_zero() {
        let stats = TimingStats::default().stats();
        assert_eq!(
            stats,
            StageStats {
                min: 0,
                max: 0,
                avg: 0
            }
        );
    }

    #[test]
    fn test_stats_min_max_avg() {
        let mut t = TimingStats::default();
        t.add(10.0);
        t.add(20.0);
        t.add(30.0);
        assert_eq!(
            t.stats(),
            StageStats {
                min: 10,
                max: 30,
                avg: 20
            }
        );
    }

    #[test]
    fn test_stats_round_to_nearest_millisecond() {
        let mut t = TimingStats::default();
        t.add(1.4);
        t.add(2.6);
        let stats = t.stats();
        assert_eq!(stats.min, 1);
        assert_eq!(stats.max, 3);
        assert_eq!(stats.avg, 2);
    }

    #[test]
    fn test_silent_logger_all_methods_are_noop() {
        let mut logger = SilentRunLogger;
        logger.timing("detect", 5.0);
        logger.info("hello");
        logger.summary();
        // No panics = success
    }

    #[test]
    fn test_plain_logger_discards_timing() {
        let mut logger = PlainRunLogger;
        logger.timing("detect", 5.0);
        logger.summary();
        // No panics = success
    }

    #[test]
    fn test_benchmark_logger_records_per_stage() {
        let mut logger = BenchmarkRunLogger::new();
        logger.timing("detect", 20.0);
        logger.timing("detect", 30.0);
        logger.timing("hash", 5.0);

        let detect = logger.stats_for("detect").unwrap();
        assert_eq!(detect.min, 20);
        assert_eq!(detect.max, 30);
        assert_eq!(detect.avg, 25);
        assert_eq!(logger.stats_for("hash").unwrap().avg, 5);
        assert!(logger.stats_for("move").is_none());
    }

    #[test]
    fn test_summary_format() {
        let mut logger = BenchmarkRunLogger::new();
        logger.timing("detect", 10.0);
        logger.timing("detect", 20.0);
        logger.timing("detect", 30.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.starts_with("Timing statistics (ms):"));
        assert!(summary.contains("detect: {'min': 10, 'max': 30, 'avg': 20}"));
    }

    #[test]
    fn test_summary_sorted_by_stage() {
        let mut logger = BenchmarkRunLogger::new();
        logger.timing("move", 1.0);
        logger.timing("decode", 1.0);

        let summary = logger.summary_string().unwrap();
        let decode_at = summary.find("decode").unwrap();
        let move_at = summary.find("move").unwrap();
        assert!(decode_at < move_at);
    }

    #[test]
    fn test_empty_summary_returns_none() {
        assert!(BenchmarkRunLogger::new().summary_string().is_none());
    }

    #[test]
    fn test_measure_passes_result_through() {
        let mut logger = BenchmarkRunLogger::new();
        let ok: Result<i32, String> = measure(&mut logger, "detect", || Ok(7));
        assert_eq!(ok.unwrap(), 7);

        let err: Result<i32, String> = measure(&mut logger, "detect", || Err("boom".into()));
        assert_eq!(err.unwrap_err(), "boom");

        // Both calls were timed, the failed one included.
        assert_eq!(logger.sample_count("detect"), 2);
    }
}
