use graph_rs::core::{BandPadding, ColorResolver, Orientation, PlotArea, Record, ScaleOptions};
use graph_rs::layout::{
    LayoutExtras, LineExtras, LineShape, LayoutKind, PathCommand, PieAngles, Projection,
    ProjectionInput, ShapeGeometry, project,
};
use serde_json::json;

fn record(value: serde_json::Value) -> Record {
    Record::from_json(value).expect("record object")
}

fn keys() -> Vec<String> {
    vec!["lineA".to_owned(), "lineB".to_owned()]
}

fn project_lines(records: &[Record], index_scale: &ScaleOptions) -> Projection {
    let keys = keys();
    let value_scale = ScaleOptions::default();
    let colors = ColorResolver::new(None).expect("default palette");
    project(&ProjectionInput {
        kind: LayoutKind::Line,
        records,
        keys: &keys,
        index_by: "index",
        orientation: Orientation::Vertical,
        plot: PlotArea {
            width: 200.0,
            height: 100.0,
        },
        padding: BandPadding::default(),
        index_scale,
        value_scale: &value_scale,
        colors: &colors,
        pie: PieAngles::default(),
    })
    .expect("line projection")
}

fn sample() -> Vec<Record> {
    vec![
        record(json!({"index": "x1", "lineA": 10, "lineB": 5})),
        record(json!({"index": "x2", "lineA": 3, "lineB": 25})),
    ]
}

fn line<'a>(projection: &'a Projection, key: &str) -> &'a LineShape {
    let shape = projection
        .shapes
        .iter()
        .find(|s| s.identity == key)
        .expect("line present");
    match &shape.geometry {
        ShapeGeometry::Line(line) => line,
        other => panic!("expected line geometry, got {other:?}"),
    }
}

fn extras(projection: &Projection) -> &LineExtras {
    match &projection.extras {
        LayoutExtras::Line(extras) => extras,
        other => panic!("expected line extras, got {other:?}"),
    }
}

#[test]
fn one_line_per_series_key_with_point_scale_positions() {
    let projection = project_lines(&sample(), &ScaleOptions::default());

    assert_eq!(projection.shapes.len(), 2);
    assert_eq!(projection.shapes[0].identity, "lineA");
    assert!(projection.shapes[0].record.is_none());
    assert_eq!(projection.value_axis.as_ref().expect("axis").domain, (0.0, 25.0));

    let a = line(&projection, "lineA");
    assert_eq!(a.points.len(), 2);
    assert!((a.points[0].0 - 50.0).abs() <= 1e-9);
    assert!((a.points[1].0 - 150.0).abs() <= 1e-9);
    assert!((a.points[0].1 - 60.0).abs() <= 1e-9);
    assert!((a.points[1].1 - 88.0).abs() <= 1e-9);
    assert_eq!(a.color, "#8dd3c7");
}

#[test]
fn baseline_points_sit_on_the_value_axis_origin() {
    let projection = project_lines(&sample(), &ScaleOptions::default());
    let b = line(&projection, "lineB");
    assert_eq!(b.baseline.len(), b.points.len());
    for ((bx, by), (px, _)) in b.baseline.iter().zip(&b.points) {
        assert_eq!(bx, px);
        assert!((by - 100.0).abs() <= 1e-9);
    }
    assert!(matches!(b.baseline_path.first(), Some(PathCommand::MoveTo(_, _))));
}

#[test]
fn two_point_lines_are_straight_segments() {
    let projection = project_lines(&sample(), &ScaleOptions::default());
    let a = line(&projection, "lineA");
    assert_eq!(a.path.len(), 2);
    assert!(matches!(a.path[1], PathCommand::LineTo(x, _) if (x - 150.0).abs() <= 1e-9));
}

#[test]
fn curved_path_passes_through_every_point() {
    let records = vec![
        record(json!({"index": "x1", "lineA": 1})),
        record(json!({"index": "x2", "lineA": 4})),
        record(json!({"index": "x3", "lineA": 2})),
        record(json!({"index": "x4", "lineA": 3})),
    ];
    let projection = project_lines(&records, &ScaleOptions::default());
    let a = line(&projection, "lineA");
    let ends: Vec<(f64, f64)> = a
        .path
        .iter()
        .map(|cmd| match *cmd {
            PathCommand::MoveTo(x, y) | PathCommand::LineTo(x, y) => (x, y),
            PathCommand::CubicTo { to, .. } => to,
        })
        .collect();
    assert_eq!(ends.len(), a.points.len());
    for (end, point) in ends.iter().zip(&a.points) {
        assert!((end.0 - point.0).abs() <= 1e-9);
        assert!((end.1 - point.1).abs() <= 1e-9);
    }
}

#[test]
fn slices_cover_each_index_position_and_flag_the_strict_maximum() {
    let projection = project_lines(&sample(), &ScaleOptions::default());
    let extras = extras(&projection);

    assert_eq!(extras.slices.len(), 2);
    let first = &extras.slices[0];
    assert_eq!(first.index, "x1");
    assert!((first.left - 0.0).abs() <= 1e-9);
    assert!((first.width - 100.0).abs() <= 1e-9);
    assert!((extras.slices[1].left - 100.0).abs() <= 1e-9);

    let flagged: Vec<&str> = first
        .entries
        .iter()
        .filter(|e| e.is_max)
        .map(|e| e.key.as_str())
        .collect();
    assert_eq!(flagged, vec!["lineA"]);
    let flagged: Vec<&str> = extras.slices[1]
        .entries
        .iter()
        .filter(|e| e.is_max)
        .map(|e| e.key.as_str())
        .collect();
    assert_eq!(flagged, vec!["lineB"]);
}

#[test]
fn ties_and_non_positive_slices_flag_at_most_the_first_series() {
    let records = vec![
        record(json!({"index": "x1", "lineA": 7, "lineB": 7})),
        record(json!({"index": "x2", "lineA": 0, "lineB": -1})),
    ];
    let projection = project_lines(&records, &ScaleOptions::default());
    let extras = extras(&projection);
    assert!(extras.slices[0].entries[0].is_max);
    assert!(!extras.slices[0].entries[1].is_max);
    assert!(extras.slices[1].entries.iter().all(|e| !e.is_max));
}

#[test]
fn series_totals_sum_every_value() {
    let projection = project_lines(&sample(), &ScaleOptions::default());
    let totals = &extras(&projection).totals;
    assert_eq!(totals.get("lineA"), Some(&13.0));
    assert_eq!(totals.get("lineB"), Some(&30.0));
}

#[test]
fn non_numeric_points_are_skipped() {
    let records = vec![
        record(json!({"index": "x1", "lineA": 1, "lineB": 2})),
        record(json!({"index": "x2", "lineA": "bad", "lineB": 3})),
        record(json!({"index": "x3", "lineA": 4, "lineB": 1})),
    ];
    let projection = project_lines(&records, &ScaleOptions::default());
    let a = line(&projection, "lineA");
    assert_eq!(a.points.len(), 2);
    assert!(a.points.iter().all(|(x, y)| x.is_finite() && y.is_finite()));
    assert_eq!(line(&projection, "lineB").points.len(), 3);
}

#[test]
fn band_index_scale_is_rejected_for_lines() {
    let keys = keys();
    let records = sample();
    let index_scale = ScaleOptions::of_type("band");
    let value_scale = ScaleOptions::default();
    let colors = ColorResolver::new(None).expect("default palette");
    let err = project(&ProjectionInput {
        kind: LayoutKind::Line,
        records: &records,
        keys: &keys,
        index_by: "index",
        orientation: Orientation::Vertical,
        plot: PlotArea {
            width: 200.0,
            height: 100.0,
        },
        padding: BandPadding::default(),
        index_scale: &index_scale,
        value_scale: &value_scale,
        colors: &colors,
        pie: PieAngles::default(),
    })
    .expect_err("lines need a point scale");
    assert!(err.is_configuration_error());
}
