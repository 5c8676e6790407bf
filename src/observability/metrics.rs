use prometheus::{Gauge, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use tracing::info;
use std::sync::Arc;
use tokio::sync::OnceCell;

// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE.get_or_init(|| async {
        info!("Initializing Metrics ...");
        Metrics::new()}
    ).await
}


#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Validation metrics
    pub validation_requests: IntCounterVec,
    pub validation_duration: Histogram,

    // Cache metrics
    pub cache_lookups: IntCounterVec,
    pub store_failures: IntCounterVec,

    // Oracle metrics
    pub oracle_calls: IntCounter,
    pub oracle_failures: IntCounter,
    pub oracle_duration: Histogram,

    // Config/runtime
    pub config_validation_errors: IntCounter,
    pub up: IntGauge,

    // === Service resource metrics ===
    pub process_cpu_usage: Gauge,
    pub process_memory_usage: IntGauge,
    pub process_open_fds: IntGauge,
    pub process_start_time: IntGauge,
    pub process_uptime: IntGauge,
}

impl Metrics {
    fn new() -> Arc<Self> {
        // metric names and label sets below are static, registration can only fail on duplicates
        let registry = Registry::new_custom(Some("tokenvalidator".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            // Validation
            validation_requests: IntCounterVec::new(Opts::new("validation_requests_total", "Validation calls by outcome"),&["outcome"],).unwrap(),
            validation_duration: Histogram::with_opts(HistogramOpts::new("validation_duration_seconds", "End-to-end validation duration seconds").buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0])).unwrap(),

            // Cache
            cache_lookups: IntCounterVec::new(Opts::new("cache_lookups_total", "Record store lookups by result"),&["result"],).unwrap(),
            store_failures: IntCounterVec::new(Opts::new("store_failures_total", "Record store failures by operation"),&["op"],).unwrap(),

            // Oracle
            oracle_calls: IntCounter::new("oracle_calls_total", "Validation oracle calls").unwrap(),
            oracle_failures: IntCounter::new("oracle_failures_total", "Validation oracle failures").unwrap(),
            oracle_duration: Histogram::with_opts(HistogramOpts::new("oracle_duration_seconds", "Validation oracle call duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0])).unwrap(),

            // Config/runtime
            config_validation_errors: IntCounter::new("config_validation_errors_total","Validation errors during startup",).unwrap(),
            up: IntGauge::new("up", "1 if service is healthy").unwrap(),
            process_cpu_usage: Gauge::new("process_cpu_usage_percent", "CPU usage % of this process").unwrap(),
            process_memory_usage: IntGauge::new("process_memory_usage_bytes", "Resident memory used by this process").unwrap(),
            process_open_fds: IntGauge::new("process_open_fds", "Number of open file descriptors").unwrap(),
            process_start_time: IntGauge::new("process_start_time_seconds", "Process start time (UNIX seconds)").unwrap(),
            process_uptime: IntGauge::new("process_uptime_seconds", "Process uptime seconds").unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.validation_requests.clone())).unwrap();
        reg.register(Box::new(metrics.validation_duration.clone())).unwrap();
        reg.register(Box::new(metrics.cache_lookups.clone())).unwrap();
        reg.register(Box::new(metrics.store_failures.clone())).unwrap();
        reg.register(Box::new(metrics.oracle_calls.clone())).unwrap();
        reg.register(Box::new(metrics.oracle_failures.clone())).unwrap();
        reg.register(Box::new(metrics.oracle_duration.clone())).unwrap();
        reg.register(Box::new(metrics.config_validation_errors.clone())).unwrap();
        reg.register(Box::new(metrics.up.clone())).unwrap();

        reg.register(Box::new(metrics.process_cpu_usage.clone())).unwrap();
        reg.register(Box::new(metrics.process_memory_usage.clone())).unwrap();
        reg.register(Box::new(metrics.process_open_fds.clone())).unwrap();
        reg.register(Box::new(metrics.process_start_time.clone())).unwrap();
        reg.register(Box::new(metrics.process_uptime.clone())).unwrap();

        metrics
    }
}
