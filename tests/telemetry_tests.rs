use graph_rs::telemetry::{init_default_tracing, init_tracing_with_filter};

#[test]
fn tracing_subscriber_installs_at_most_once() {
    let _ = init_default_tracing();
    assert!(!init_tracing_with_filter("graph_rs=trace"));
}
