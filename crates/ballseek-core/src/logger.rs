//! Stderr diagnostics tuned for frame loops.
//!
//! Every record carries the uptime and the gap since the previous record,
//! so a stalled capture loop or a slow detection pass stands out when
//! tailing the output. Install with `init_with_level` once at startup.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

struct FrameClockLogger {
    level: LevelFilter,
    started: Instant,
    last_us: AtomicU64,
}

fn format_record(elapsed_s: f64, gap_ms: f64, level: Level, msg: &str) -> String {
    format!("[{elapsed_s:8.3}s +{gap_ms:6.1}ms {level:>5}] {msg}")
}

impl Log for FrameClockLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let now_us = self.started.elapsed().as_micros() as u64;
        let prev_us = self.last_us.swap(now_us, Ordering::Relaxed);
        let line = format_record(
            now_us as f64 / 1e6,
            now_us.saturating_sub(prev_us) as f64 / 1e3,
            record.level(),
            &record.args().to_string(),
        );
        let _ = writeln!(std::io::stderr(), "{line}");
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<FrameClockLogger> = OnceLock::new();

/// Install the frame-clock logger with the provided level filter.
///
/// Calling this more than once is a no-op after the first successful
/// initialization.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| FrameClockLogger {
            level,
            started: Instant::now(),
            last_us: AtomicU64::new(0),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Structured tracing wired to the detector's spans.
///
/// The detection entry point opens an instrumented span per frame, so
/// emitting span-close events yields one timing line per `detect` call.
/// `RUST_LOG` overrides the default filter.
#[cfg(feature = "tracing")]
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ballseek=debug,info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_timer(fmt::time::Uptime::default())
        .finish()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_carries_uptime_and_inter_record_gap() {
        let line = format_record(1.5, 12.5, Level::Debug, "frame done");
        assert_eq!(line, "[   1.500s +  12.5ms DEBUG] frame done");
    }

    #[test]
    fn prefix_aligns_across_levels() {
        let warn = format_record(0.25, 0.4, Level::Warn, "x");
        let trace = format_record(0.25, 0.4, Level::Trace, "x");
        assert_eq!(warn.find(']'), trace.find(']'));
    }
}
