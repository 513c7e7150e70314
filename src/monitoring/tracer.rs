/*!
 * Structured Tracing
 * Subscriber setup and per-run spans using the tracing crate
 */

use std::time::Instant;
use tracing::{debug, info, span, Level, Span};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing for a host binary
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: `default_level`)
/// - MLFQ_TRACE_JSON: Enable JSON output (default: false)
///
/// Output goes to stderr so rendered reports on stdout stay machine-readable.
/// The library itself never installs a subscriber.
pub fn init_tracing(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let use_json = std::env::var("MLFQ_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    // try_init: a second call (tests, embedding hosts) keeps the first subscriber
    let result = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    if result.is_ok() {
        debug!(json = use_json, "Structured tracing initialized");
    }
}

/// Span covering one simulation run, with timing recorded on completion
pub struct RunSpan {
    span: Span,
    start: Instant,
}

impl RunSpan {
    pub fn new(processes: usize, levels: usize) -> Self {
        let span = span!(
            Level::INFO,
            "simulate",
            processes = processes,
            levels = levels,
            duration_us = tracing::field::Empty,
            slices = tracing::field::Empty,
            result = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
        }
    }

    #[inline]
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Record a completed run
    pub fn finish(self, slices: usize, makespan: u64) {
        let elapsed = self.start.elapsed();
        self.span.record("duration_us", elapsed.as_micros() as u64);
        self.span.record("slices", slices as u64);
        self.span.record("result", "completed");

        let _entered = self.span.enter();
        info!(slices, makespan, "Simulation completed in {:?}", elapsed);
    }

    /// Record a run that stopped early
    pub fn fail(self, error: &str) {
        self.span.record("duration_us", self.start.elapsed().as_micros() as u64);
        self.span.record("result", error);
    }
}
