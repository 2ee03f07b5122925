use graph_rs::core::{
    BandPadding, GroupMode, IndexScale, Record, ScaleOptions, ScaleType, ValueScale,
    build_index_scale, build_value_scale, index_domain, value_extent,
};
use graph_rs::error::GraphError;
use serde_json::json;

fn record(value: serde_json::Value) -> Record {
    Record::from_json(value).expect("record object")
}

fn sample() -> (Vec<Record>, Vec<String>) {
    let records = vec![
        record(json!({"index": "r1", "a": 1, "b": 2})),
        record(json!({"index": "r2", "a": 5, "b": 1})),
    ];
    (records, vec!["a".to_owned(), "b".to_owned()])
}

#[test]
fn stacked_domain_sums_and_grouped_domain_takes_the_max() {
    let (records, keys) = sample();
    assert_eq!(value_extent(&records, &keys, GroupMode::Stacked), (0.0, 6.0));
    assert_eq!(value_extent(&records, &keys, GroupMode::Grouped), (0.0, 5.0));
}

#[test]
fn non_numeric_records_are_left_out_of_the_domain() {
    let records = vec![
        record(json!({"index": "r1", "a": 4})),
        record(json!({"index": "r2", "a": "n/a"})),
        record(json!({"index": "r3", "a": null, "b": 100})),
    ];
    let keys = vec!["a".to_owned(), "b".to_owned()];
    assert_eq!(value_extent(&records, &keys, GroupMode::Stacked), (0.0, 4.0));
    assert_eq!(value_extent(&records, &keys, GroupMode::Grouped), (0.0, 4.0));
}

#[test]
fn all_zero_data_collapses_the_range_onto_the_baseline() {
    let records = vec![record(json!({"index": "r1", "a": 0}))];
    let keys = vec!["a".to_owned()];
    let axis = build_value_scale(
        "yScale",
        &records,
        &keys,
        GroupMode::Stacked,
        &ScaleOptions::default(),
        (100.0, 0.0),
    )
    .expect("value scale");

    assert!(axis.is_degenerate());
    for v in [0.0, 1.0, 1e9, -5.0] {
        let y = axis.scale.map(v);
        assert!(y.is_finite());
        assert_eq!(y, 100.0);
    }
}

#[test]
fn linear_value_scale_maps_onto_the_inverted_range() {
    let (records, keys) = sample();
    let axis = build_value_scale(
        "yScale",
        &records,
        &keys,
        GroupMode::Stacked,
        &ScaleOptions::default(),
        (100.0, 0.0),
    )
    .expect("value scale");
    assert_eq!(axis.domain, (0.0, 6.0));
    assert!((axis.scale.map(3.0) - 50.0).abs() <= 1e-9);
    assert!((axis.scale.map(6.0) - 0.0).abs() <= 1e-9);
}

#[test]
fn explicit_domain_bypasses_aggregation() {
    let (records, keys) = sample();
    let options = ScaleOptions::of_type("linear").with_domain([0.0, 10.0]);
    let axis = build_value_scale(
        "yScale",
        &records,
        &keys,
        GroupMode::Stacked,
        &options,
        (0.0, 100.0),
    )
    .expect("value scale");
    assert_eq!(axis.domain, (0.0, 10.0));
    assert!((axis.scale.map(5.0) - 50.0).abs() <= 1e-9);
}

#[test]
fn log_scale_with_zero_minimum_stays_finite() {
    let (records, keys) = sample();
    let axis = build_value_scale(
        "yScale",
        &records,
        &keys,
        GroupMode::Stacked,
        &ScaleOptions::of_type("log"),
        (100.0, 0.0),
    )
    .expect("log scale");
    assert!(matches!(axis.scale, ValueScale::Continuous(_)));
    for v in [0.0, 1.0, 6.0] {
        assert!(axis.scale.map(v).is_finite());
    }
    assert!((axis.scale.map(6.0) - 0.0).abs() <= 1e-9);
}

#[test]
fn quantize_scale_outputs_discrete_levels() {
    let (records, keys) = sample();
    let mut options = ScaleOptions::of_type("quantize");
    options.steps = Some(3);
    let axis = build_value_scale(
        "yScale",
        &records,
        &keys,
        GroupMode::Stacked,
        &options,
        (0.0, 100.0),
    )
    .expect("quantize scale");
    let levels: Vec<f64> = [0.5, 3.0, 5.9].iter().map(|v| axis.scale.map(*v)).collect();
    assert_eq!(levels, vec![0.0, 50.0, 100.0]);
}

#[test]
fn unknown_scale_type_is_a_configuration_error() {
    let (records, keys) = sample();
    let err = build_value_scale(
        "yScale",
        &records,
        &keys,
        GroupMode::Stacked,
        &ScaleOptions::of_type("bogus"),
        (100.0, 0.0),
    )
    .expect_err("unknown type must fail");
    assert_eq!(err, GraphError::UnknownScaleType("bogus".to_owned()));
    assert!(err.is_configuration_error());
}

#[test]
fn categorical_type_on_the_value_axis_is_rejected() {
    let (records, keys) = sample();
    let err = build_value_scale(
        "yScale",
        &records,
        &keys,
        GroupMode::Stacked,
        &ScaleOptions::of_type("band"),
        (100.0, 0.0),
    )
    .expect_err("band is not quantitative");
    assert!(matches!(err, GraphError::InvalidConfig { option: "yScale", .. }));
}

#[test]
fn band_scale_spreads_records_with_padding() {
    let domain = vec!["a".to_owned(), "b".to_owned(), "c".to_owned(), "d".to_owned()];
    let scale = build_index_scale(
        "xScale",
        domain,
        &ScaleOptions::default(),
        ScaleType::Band,
        BandPadding {
            padding: Some(0.2),
            ..BandPadding::default()
        },
        (0.0, 440.0),
    )
    .expect("band scale");

    // step = 440 / (4 - 0.2 + 0.4) = 104.76..., bandwidth = 0.8 * step
    let step = 440.0 / 4.2;
    assert!((scale.step() - step).abs() <= 1e-9);
    assert!((scale.bandwidth() - step * 0.8).abs() <= 1e-9);
    assert!((scale.map("a").expect("a") - step * 0.2).abs() <= 1e-9);
    assert!((scale.map("d").expect("d") - step * 3.2).abs() <= 1e-9);
    assert_eq!(scale.map("zzz"), None);
}

#[test]
fn axis_padding_overrides_chart_padding() {
    let domain = vec!["a".to_owned(), "b".to_owned()];
    let mut options = ScaleOptions::default();
    options.padding_inner = Some(0.5);
    let chart = BandPadding {
        padding: None,
        inner: 0.1,
        outer: 0.0,
    };
    let scale = build_index_scale("xScale", domain.clone(), &options, ScaleType::Band, chart, (0.0, 100.0))
        .expect("band scale");
    let IndexScale::Band(band) = &scale else {
        panic!("expected band scale");
    };
    assert_eq!(band.padding_inner(), 0.5);

    options.padding = Some(0.25);
    let scale = build_index_scale("xScale", domain, &options, ScaleType::Band, chart, (0.0, 100.0))
        .expect("band scale");
    let IndexScale::Band(band) = &scale else {
        panic!("expected band scale");
    };
    assert_eq!(band.padding_inner(), 0.25);
    assert_eq!(band.padding_outer(), 0.25);
}

#[test]
fn index_domain_keeps_first_occurrence_order() {
    let records = vec![
        record(json!({"index": "b"})),
        record(json!({"index": 3})),
        record(json!({"index": "b"})),
        record(json!({"index": "a"})),
    ];
    assert_eq!(
        index_domain(&records, "index").expect("domain"),
        vec!["b".to_owned(), "3".to_owned(), "a".to_owned()]
    );
}

#[test]
fn record_without_index_value_is_reported() {
    let records = vec![record(json!({"index": "a"})), record(json!({"value": 2}))];
    let err = index_domain(&records, "index").expect_err("row 1 has no index");
    assert_eq!(
        err,
        GraphError::MissingIdentity {
            index_by: "index".to_owned(),
            row: 1,
        }
    );
}
