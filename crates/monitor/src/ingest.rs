//! Telemetry ingest loop
//!
//! Reads JSON-lines telemetry, keeps the rolling window, and runs the full
//! analysis on a fixed cadence of accepted samples.

use analytics_lib::{
    AnalyticsConfig, BoilerAnalyzer, BoilerReport, FuelType, StructuredLogger, TelemetryBuffer,
    TelemetrySample,
};
use anyhow::{Context, Result};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Why the ingest loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndOfInput,
    Signal,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::EndOfInput => write!(f, "end of input"),
            StopReason::Signal => write!(f, "SIGINT received"),
        }
    }
}

/// Counters for one ingest run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub lines: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub reports: u64,
}

/// Owns the rolling window and the analyzer for one boiler
pub struct Monitor {
    analyzer: BoilerAnalyzer,
    buffer: TelemetryBuffer,
    logger: StructuredLogger,
    report_every: u64,
    rng: StdRng,
    stats: IngestStats,
}

impl Monitor {
    pub fn new(config: AnalyticsConfig, logger: StructuredLogger, report_every: u64) -> Self {
        Self {
            buffer: TelemetryBuffer::with_config(&config.window),
            analyzer: BoilerAnalyzer::new(config),
            logger,
            report_every: report_every.max(1),
            rng: StdRng::from_entropy(),
            stats: IngestStats::default(),
        }
    }

    /// Fix the economizer noise sequence
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    /// Process one input line
    ///
    /// Returns the report when this line completed a reporting cycle.
    /// Malformed or non-finite samples are logged and skipped.
    pub fn ingest_line(&mut self, line: &str) -> Option<BoilerReport> {
        self.stats.lines += 1;

        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let sample: TelemetrySample = match serde_json::from_str(line) {
            Ok(sample) => sample,
            Err(e) => {
                self.stats.rejected += 1;
                self.logger.log_sample_rejected(self.stats.lines, &e.to_string());
                return None;
            }
        };

        let incoming_fuel = sample.fuel_type;
        match self.buffer.push_checked(sample) {
            Ok(Some(previous_fuel)) => self.logger.log_fuel_switch(previous_fuel, incoming_fuel),
            Ok(None) => {}
            Err(e) => {
                self.stats.rejected += 1;
                self.logger.log_sample_rejected(self.stats.lines, &e.to_string());
                return None;
            }
        }

        self.stats.accepted += 1;
        if self.stats.accepted % self.report_every != 0 {
            return None;
        }

        Some(self.report(incoming_fuel))
    }

    /// Process one raw input line; invalid UTF-8 is rejected like bad JSON
    pub fn ingest_bytes(&mut self, bytes: Vec<u8>) -> Option<BoilerReport> {
        match String::from_utf8(bytes) {
            Ok(line) => self.ingest_line(&line),
            Err(e) => {
                self.stats.lines += 1;
                self.stats.rejected += 1;
                self.logger.log_sample_rejected(self.stats.lines, &e.to_string());
                None
            }
        }
    }

    fn report(&mut self, fuel: FuelType) -> BoilerReport {
        let snapshot = self.buffer.snapshot();
        let report = self
            .analyzer
            .analyze_with_rng(&snapshot, fuel, &mut self.rng, Utc::now());

        self.stats.reports += 1;
        self.logger
            .log_report(&report, &self.analyzer.config().costs.currency);
        debug!(
            samples = report.samples_analyzed,
            health = report.health_score.overall_score,
            "Report cycle complete"
        );
        report
    }

    /// Consume `reader` until EOF or a shutdown signal
    pub async fn run<R>(&mut self, reader: R, mut shutdown: broadcast::Receiver<()>) -> Result<StopReason>
    where
        R: AsyncBufRead + Unpin,
    {
        info!(
            report_every = self.report_every,
            window = self.buffer.capacity(),
            "Starting telemetry ingest"
        );

        let mut lines = reader.split(b'\n');
        loop {
            tokio::select! {
                line = lines.next_segment() => {
                    match line.context("Failed to read telemetry input")? {
                        Some(bytes) => {
                            self.ingest_bytes(bytes);
                        }
                        None => return Ok(StopReason::EndOfInput),
                    }
                }
                _ = shutdown.recv() => {
                    info!("Stopping telemetry ingest");
                    return Ok(StopReason::Signal);
                }
            }
        }
    }
}

/// Open the configured input as a buffered async reader
pub async fn open_input(input: &str) -> Result<Box<dyn AsyncBufRead + Unpin + Send>> {
    if input == "-" {
        return Ok(Box::new(BufReader::new(tokio::io::stdin())));
    }

    let file = tokio::fs::File::open(input)
        .await
        .with_context(|| format!("Failed to open telemetry input {}", input))?;
    Ok(Box::new(BufReader::new(file)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn line(i: usize, fuel: &str) -> String {
        format!(
            r#"{{"timestamp":"t{i}","steamPressure":65.0,"steamFlow":45.0,"stackTemp":{},"o2Level":3.5,"efficiency":85.0,"fuelFlow":5000.0,"fuelType":"{fuel}"}}"#,
            165.0 + i as f64 * 0.1
        )
    }

    fn monitor(report_every: u64) -> Monitor {
        Monitor::new(AnalyticsConfig::default(), StructuredLogger::new("test-boiler"), report_every)
            .with_seed(42)
    }

    #[test]
    fn test_report_cadence() {
        let mut monitor = monitor(3);
        let reports: Vec<_> = (0..9).filter_map(|i| monitor.ingest_line(&line(i, "Coal"))).collect();

        assert_eq!(reports.len(), 3);
        assert_eq!(reports[2].samples_analyzed, 9);
        assert_eq!(monitor.stats().accepted, 9);
        assert_eq!(monitor.stats().reports, 3);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let mut monitor = monitor(1);
        assert!(monitor.ingest_line("{not json").is_none());
        assert!(monitor.ingest_line("").is_none());
        assert!(monitor
            .ingest_line(r#"{"timestamp":"t","steamPressure":65.0}"#)
            .is_none());

        let report = monitor.ingest_line(&line(0, "Gas")).unwrap();
        assert_eq!(report.fuel_type, FuelType::Gas);
        assert_eq!(
            monitor.stats(),
            &IngestStats {
                lines: 4,
                accepted: 1,
                rejected: 2,
                reports: 1,
            }
        );
    }

    #[test]
    fn test_fuel_switch_restarts_window() {
        let mut monitor = monitor(1);
        for i in 0..6 {
            monitor.ingest_line(&line(i, "Coal"));
        }
        let report = monitor.ingest_line(&line(6, "Biomass")).unwrap();
        assert_eq!(report.samples_analyzed, 1);
        assert_eq!(report.fuel_type, FuelType::Biomass);
    }

    #[test]
    fn test_window_bounded_by_config() {
        let mut monitor = monitor(1);
        let mut last = None;
        for i in 0..30 {
            last = monitor.ingest_line(&line(i, "Oil"));
        }
        assert_eq!(last.unwrap().samples_analyzed, 20);
    }

    #[tokio::test]
    async fn test_run_until_end_of_input() {
        let input: String = (0..5).map(|i| line(i, "Coal") + "\n").collect();
        let (_tx, rx) = broadcast::channel(1);

        let mut monitor = monitor(1);
        let reason = monitor.run(BufReader::new(input.as_bytes()), rx).await.unwrap();

        assert_eq!(reason, StopReason::EndOfInput);
        assert_eq!(monitor.stats().reports, 5);
    }

    #[tokio::test]
    async fn test_run_skips_invalid_utf8_line() {
        let mut input = Vec::new();
        input.extend_from_slice(line(0, "Coal").as_bytes());
        input.extend_from_slice(b"\n\xff\xfe\n");
        input.extend_from_slice(line(1, "Coal").as_bytes());
        input.push(b'\n');
        let (_tx, rx) = broadcast::channel(1);

        let mut monitor = monitor(1);
        let reason = monitor.run(BufReader::new(input.as_slice()), rx).await.unwrap();

        assert_eq!(reason, StopReason::EndOfInput);
        assert_eq!(
            monitor.stats(),
            &IngestStats {
                lines: 3,
                accepted: 2,
                rejected: 1,
                reports: 2,
            }
        );
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let (tx, rx) = broadcast::channel(1);
        let (_writer, reader) = tokio::io::duplex(64);
        tx.send(()).unwrap();

        let mut monitor = monitor(1);
        let reason = monitor.run(BufReader::new(reader), rx).await.unwrap();
        assert_eq!(reason, StopReason::Signal);
    }

    #[tokio::test]
    async fn test_open_input_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", line(0, "Coal")).unwrap();
        writeln!(file, "{}", line(1, "Coal")).unwrap();

        let reader = open_input(file.path().to_str().unwrap()).await.unwrap();
        let (_tx, rx) = broadcast::channel(1);
        let mut monitor = monitor(1);
        monitor.run(reader, rx).await.unwrap();
        assert_eq!(monitor.stats().accepted, 2);

        assert!(open_input("/nonexistent/telemetry.jsonl").await.is_err());
    }
}
