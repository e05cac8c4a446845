use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramTimer, HistogramVec,
    IntCounterVec, TextEncoder,
};

static DOCUMENTS_GENERATED: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "documents_generated_total",
        "Documents rendered successfully",
        &["kind", "format"]
    )
    .expect("documents_generated_total is registered once")
});

static DOCUMENT_ERRORS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "document_errors_total",
        "Document generation failures by stage",
        &["kind", "stage"]
    )
    .expect("document_errors_total is registered once")
});

static GENERATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "document_generation_seconds",
        "Time spent rendering a document",
        &["format"],
        vec![0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .expect("document_generation_seconds is registered once")
});

pub fn record_generated(kind: &str, format: &str) {
    DOCUMENTS_GENERATED.with_label_values(&[kind, format]).inc();
}

pub fn record_error(kind: &str, stage: &str) {
    DOCUMENT_ERRORS.with_label_values(&[kind, stage]).inc();
}

/// Observes the elapsed time when the returned timer is dropped.
pub fn start_timer(format: &str) -> HistogramTimer {
    GENERATION_SECONDS.with_label_values(&[format]).start_timer()
}

/// Prometheus text exposition of the default registry.
pub fn render() -> Result<Vec<u8>, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(buffer)
}
