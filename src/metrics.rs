//! Prometheus metrics collection for channeld.
//!
//! ## Channel Metrics
//!
//! - `channeld_active_channels` - Live channel actors (built-in and custom)
//! - `channeld_channel_members{channel}` - Members per channel (gauge)
//! - `channeld_command_total{command}` - Commands processed by type
//! - `channeld_command_errors_total{command, error}` - Rejected commands
//! - `channeld_command_duration_seconds{command}` - Command latency histogram
//! - `channeld_notification_fanout` - Recipients per broadcast (histogram)
//! - `channeld_static_conversions_total{direction}` - Static/dynamic conversions

use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge,
    IntGaugeVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

// ========================================================================
// Counters (monotonic increasing)
// ========================================================================

/// Speech rejected by the throttle.
pub static SPEECH_THROTTLED: OnceLock<IntCounter> = OnceLock::new();

/// Commands processed by type (join, say, kick, ...).
pub static COMMAND_COUNTER: OnceLock<IntCounterVec> = OnceLock::new();

/// Command errors by type and error kind.
pub static COMMAND_ERRORS: OnceLock<IntCounterVec> = OnceLock::new();

/// Static conversions by direction.
pub static STATIC_CONVERSIONS: OnceLock<IntCounterVec> = OnceLock::new();

// ========================================================================
// Gauges (can increase/decrease)
// ========================================================================

/// Active channels (built-in and custom).
pub static ACTIVE_CHANNELS: OnceLock<IntGauge> = OnceLock::new();

/// Channel member counts (gauge).
pub static CHANNEL_MEMBERS: OnceLock<IntGaugeVec> = OnceLock::new();

// ========================================================================
// Histograms
// ========================================================================

/// Command processing latency by command type.
pub static COMMAND_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

/// Notification fan-out: how many recipients per broadcast.
pub static NOTIFICATION_FANOUT: OnceLock<Histogram> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Call once at startup before any metrics are recorded. Metrics recorded
/// before this are dropped.
pub fn init() {
    let r = registry();

    // Helper macro to register metric
    macro_rules! register {
        ($metric:ident, $init:expr) => {
            match $init {
                Ok(m) => {
                    if let Err(e) = r.register(Box::new(m.clone())) {
                        tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
                    }
                    let _ = $metric.set(m);
                }
                Err(e) => {
                    tracing::warn!(error = %e, concat!("Failed to create metric ", stringify!($metric)));
                }
            }
        };
    }

    register!(SPEECH_THROTTLED, IntCounter::new("channeld_speech_throttled_total", "Speech rejected by the throttle"));
    register!(ACTIVE_CHANNELS, IntGauge::new("channeld_active_channels", "Active channels"));

    register!(COMMAND_COUNTER, IntCounterVec::new(Opts::new("channeld_command_total", "Channel commands processed by type"), &["command"]));
    register!(COMMAND_ERRORS, IntCounterVec::new(Opts::new("channeld_command_errors_total", "Channel command errors by type"), &["command", "error"]));
    register!(STATIC_CONVERSIONS, IntCounterVec::new(Opts::new("channeld_static_conversions_total", "Static conversions by direction"), &["direction"]));
    register!(COMMAND_LATENCY, HistogramVec::new(
        HistogramOpts::new("channeld_command_duration_seconds", "Channel command latency by type")
            .buckets(vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05]),
        &["command"]));
    register!(CHANNEL_MEMBERS, IntGaugeVec::new(Opts::new("channeld_channel_members", "Members per channel"), &["channel"]));
    register!(NOTIFICATION_FANOUT, Histogram::with_opts(
        HistogramOpts::new("channeld_notification_fanout", "Recipients per channel broadcast")
            .buckets(vec![1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0])));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

// ============================================================================
// Helper functions for channel metric updates
// ============================================================================

/// Record a command execution with latency.
#[inline]
pub fn record_command(command: &str, duration_secs: f64) {
    if let Some(c) = COMMAND_COUNTER.get() {
        c.with_label_values(&[command]).inc();
    }
    if let Some(h) = COMMAND_LATENCY.get() {
        h.with_label_values(&[command]).observe(duration_secs);
    }
}

/// Record a command error.
#[inline]
pub fn record_command_error(command: &str, error: &str) {
    if let Some(c) = COMMAND_ERRORS.get() {
        c.with_label_values(&[command, error]).inc();
    }
    if error == "throttled"
        && let Some(c) = SPEECH_THROTTLED.get()
    {
        c.inc();
    }
}

/// Update channel member count gauge.
#[inline]
pub fn set_channel_members(channel: &str, count: usize) {
    if let Some(g) = CHANNEL_MEMBERS.get() {
        g.with_label_values(&[channel]).set(count as i64);
    }
}

/// Remove a channel from the members gauge (when channel is destroyed).
#[inline]
pub fn remove_channel_metrics(channel: &str) {
    if let Some(g) = CHANNEL_MEMBERS.get() {
        let _ = g.remove_label_values(&[channel]);
    }
}

/// A channel actor started.
#[inline]
pub fn channel_created() {
    if let Some(g) = ACTIVE_CHANNELS.get() {
        g.inc();
    }
}

/// A channel actor drained.
#[inline]
pub fn channel_destroyed() {
    if let Some(g) = ACTIVE_CHANNELS.get() {
        g.dec();
    }
}

/// Record broadcast fan-out (how many recipients received a message).
#[inline]
pub fn record_fanout(recipients: usize) {
    if let Some(h) = NOTIFICATION_FANOUT.get() {
        h.observe(recipients as f64);
    }
}

/// Record a static/dynamic conversion.
#[inline]
pub fn record_conversion(to_static: bool) {
    if let Some(c) = STATIC_CONVERSIONS.get() {
        let direction = if to_static { "static" } else { "dynamic" };
        c.with_label_values(&[direction]).inc();
    }
}
