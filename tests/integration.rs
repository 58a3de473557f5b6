use textmark::{Annotation, AnnotationKind, Error, Point, Shape};

fn keys_of(data: &[(String, f64)]) -> Vec<&str> {
    data.iter().map(|(k, _)| k.as_str()).collect()
}

fn values_of(data: &[(String, f64)]) -> Vec<f64> {
    data.iter().map(|(_, v)| *v).collect()
}

#[test]
fn dot_serialization_round_trips() {
    let _ = env_logger::builder().is_test(true).try_init();

    let points = [25.0, 100.0];
    let dot = Annotation::new(AnnotationKind::Dot, "dot-test", Some("english"), &points)
        .expect("valid dot");
    assert_eq!(dot.kind(), AnnotationKind::Dot);
    assert_eq!(dot.text(), "dot-test");
    assert_eq!(dot.language(), Some("english"));
    let data = dot.get_data();
    log::debug!("{data:?}");
    assert_eq!(keys_of(&data), vec!["x1", "y1"]);
    assert_eq!(values_of(&data), points);
}

#[test]
fn box_serialization_round_trips() {
    // Already top-left/bottom-right, so the values come back verbatim.
    let points = [25.0, 100.0, 50.0, 1010.0];
    let boxed = Annotation::new(AnnotationKind::Box, "box-test", Some("english"), &points)
        .expect("valid box");
    let data = boxed.get_data();
    assert_eq!(keys_of(&data), vec!["x1", "y1", "x2", "y2"]);
    assert_eq!(values_of(&data), points);
}

#[test]
fn quad_serialization_round_trips() {
    // Canonical rotational order already, so storage preserves it.
    let points = [25.0, 100.0, 50.0, 100.0, 50.0, 1010.0, 25.0, 1010.0];
    let quad = Annotation::new(AnnotationKind::Quad, "quad-test", Some("english"), &points)
        .expect("valid quad");
    let data = quad.get_data();
    assert_eq!(
        keys_of(&data),
        vec!["x1", "y1", "x2", "y2", "x3", "y3", "x4", "y4"]
    );
    assert_eq!(values_of(&data), points);
}

#[test]
fn polygon_serialization_round_trips() {
    let points = [
        25.0, 100.0, 37.5, 100.0, 50.0, 100.0, 50.0, 555.0, 50.0, 1010.0, 37.5, 1010.0, 25.0,
        1010.0,
    ];
    let poly = Annotation::new(AnnotationKind::Polygon, "poly-test", Some("english"), &points)
        .expect("valid polygon");
    assert_eq!(values_of(&poly.get_data()), points);
}

#[test]
fn bezier_serialization_round_trips() {
    let points = [
        305.0, 433.0, 383.37, 458.8, 404.23, 439.96, 464.0, 423.0, 460.0, 462.0, 405.58, 474.53,
        380.33, 489.72, 305.0, 462.0,
    ];
    let bezier = Annotation::new(AnnotationKind::Bezier, "bezier-test", Some("english"), &points)
        .expect("valid bezier");
    let data = bezier.get_data();
    assert_eq!(data.len(), 16);
    assert_eq!(data[14].0, "x8");
    assert_eq!(data[15].0, "y8");
    assert_eq!(values_of(&data), points);
}

#[test]
fn normalization_keeps_the_point_multiset() {
    // Corners handed over bottom-left/top-right still store the same two
    // points, top-left first.
    let boxed = Annotation::new(AnnotationKind::Box, "b", None, &[50.0, 1010.0, 25.0, 100.0])
        .expect("valid box");
    assert_eq!(boxed.coordinates(), vec![25.0, 100.0, 50.0, 1010.0]);

    let quad = Annotation::new(
        AnnotationKind::Quad,
        "q",
        None,
        // Same four corners, scrambled.
        &[50.0, 1010.0, 25.0, 100.0, 50.0, 100.0, 25.0, 1010.0],
    )
    .expect("valid quad");
    assert_eq!(
        quad.coordinates(),
        vec![25.0, 100.0, 50.0, 100.0, 50.0, 1010.0, 25.0, 1010.0]
    );
}

#[test]
fn conversion_to_own_kind_is_identity() {
    let dot = Annotation::new(AnnotationKind::Dot, "d", Some("english"), &[25.0, 100.0])
        .expect("valid dot");
    let same = dot.to(AnnotationKind::Dot).expect("identity conversion");
    assert_eq!(same, dot);
}

#[test]
fn dot_box_round_trip() {
    let dot = Annotation::new(AnnotationKind::Dot, "d", None, &[25.0, 100.0]).expect("valid dot");
    let boxed = dot.to(AnnotationKind::Box).expect("dot to box");
    // Unit inflation, normalized top-left/bottom-right.
    assert_eq!(boxed.coordinates(), vec![24.0, 99.0, 26.0, 101.0]);
    let back = boxed.to(AnnotationKind::Dot).expect("box to dot");
    assert_eq!(back, dot);
}

#[test]
fn box_quad_round_trip() {
    let boxed = Annotation::new(AnnotationKind::Box, "b", None, &[25.0, 100.0, 50.0, 1010.0])
        .expect("valid box");
    let quad = boxed.to(AnnotationKind::Quad).expect("box to quad");
    // The four corners in canonical angle order from the top-left anchor.
    assert_eq!(
        quad.coordinates(),
        vec![25.0, 100.0, 50.0, 100.0, 50.0, 1010.0, 25.0, 1010.0]
    );
    let back = quad.to(AnnotationKind::Box).expect("quad to box");
    assert_eq!(back, boxed);
}

#[test]
fn quad_to_polygon_inserts_edge_midpoints() {
    let quad = Annotation::new(
        AnnotationKind::Quad,
        "q",
        None,
        &[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0],
    )
    .expect("valid quad");
    let poly = quad.to(AnnotationKind::Polygon).expect("quad to polygon");
    assert_eq!(
        poly.coordinates(),
        vec![
            0.0, 0.0, 5.0, 0.0, 10.0, 0.0, 10.0, 5.0, 10.0, 10.0, 5.0, 10.0, 0.0, 10.0, 0.0, 5.0,
        ]
    );
}

#[test]
fn polygon_to_quad_fits_the_minimum_rectangle() {
    // An octagon outlining an axis-aligned square; the fitted quad is the
    // square itself after rounding.
    let poly = Annotation::new(
        AnnotationKind::Polygon,
        "p",
        None,
        &[
            0.0, 0.0, 5.0, 0.0, 10.0, 0.0, 10.0, 5.0, 10.0, 10.0, 5.0, 10.0, 0.0, 10.0, 0.0, 5.0,
        ],
    )
    .expect("valid polygon");
    let quad = poly.to(AnnotationKind::Quad).expect("polygon to quad");
    assert_eq!(
        quad.coordinates(),
        vec![0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0]
    );
}

#[test]
fn collinear_polygon_cannot_become_a_quad() {
    // All points on one line: the hull has no area, so there is no
    // rectangle to fit and the conversion must refuse rather than emit a
    // quad with coincident corners.
    let poly = Annotation::new(
        AnnotationKind::Polygon,
        "line",
        None,
        &[0.0, 0.0, 5.0, 0.0, 10.0, 0.0],
    )
    .expect("valid polygon");
    let err = poly.to(AnnotationKind::Quad).unwrap_err();
    assert!(matches!(err, Error::DegenerateShape(_)), "{err}");
}

#[test]
fn bezier_to_polygon_samples_both_curves() {
    let points = [
        305.0, 433.0, 383.37, 458.8, 404.23, 439.96, 464.0, 423.0, 460.0, 462.0, 405.58, 474.53,
        380.33, 489.72, 305.0, 462.0,
    ];
    let bezier =
        Annotation::new(AnnotationKind::Bezier, "bz", None, &points).expect("valid bezier");
    let poly = bezier.to(AnnotationKind::Polygon).expect("bezier to polygon");
    let Shape::Polygon(sampled) = poly.shape() else {
        panic!("expected a polygon shape");
    };
    // 20 samples per curve, curve 0 first.
    assert_eq!(sampled.len(), 40);
    assert_eq!(sampled[0], Point::new(305.0, 433.0));
    assert_eq!(sampled[19], Point::new(464.0, 423.0));
    assert_eq!(sampled[20], Point::new(460.0, 462.0));
    assert_eq!(sampled[39], Point::new(305.0, 462.0));
}

#[test]
fn bezier_chains_through_polygon_and_quad_to_box() {
    let points = [
        305.0, 433.0, 383.37, 458.8, 404.23, 439.96, 464.0, 423.0, 460.0, 462.0, 405.58, 474.53,
        380.33, 489.72, 305.0, 462.0,
    ];
    let bezier = Annotation::new(AnnotationKind::Bezier, "sign", Some("english"), &points)
        .expect("valid bezier");
    let boxed = bezier.to(AnnotationKind::Box).expect("bezier to box");
    assert_eq!(boxed.kind(), AnnotationKind::Box);
    assert_eq!(boxed.text(), "sign");
    assert_eq!(boxed.language(), Some("english"));
    let coords = boxed.coordinates();
    // The box must cover the curve endpoints.
    assert!(coords[0] <= 305.0 && coords[2] >= 464.0);
    assert!(coords[1] <= 423.0 && coords[3] >= 474.0);
}

#[test]
fn unreachable_targets_fail_with_no_conversion_path() {
    let dot = Annotation::new(AnnotationKind::Dot, "d", None, &[25.0, 100.0]).expect("valid dot");
    assert_eq!(
        dot.to(AnnotationKind::Bezier).unwrap_err(),
        Error::NoConversionPath {
            from: AnnotationKind::Dot,
            to: AnnotationKind::Bezier,
        }
    );

    let err = Annotation::new(AnnotationKind::Polygon, "p", None, &[0.0, 0.0, 4.0, 0.0, 4.0])
        .map(drop)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArity { actual: 5, .. }));
}

#[test]
fn convert_never_mutates_its_input() {
    let sources = [
        (AnnotationKind::Dot, vec![25.0, 100.0]),
        (AnnotationKind::Box, vec![25.0, 100.0, 50.0, 1010.0]),
        (
            AnnotationKind::Quad,
            vec![25.0, 100.0, 50.0, 100.0, 50.0, 1010.0, 25.0, 1010.0],
        ),
        (
            AnnotationKind::Polygon,
            vec![0.0, 0.0, 5.0, 0.0, 10.0, 0.0, 10.0, 5.0, 10.0, 10.0, 0.0, 10.0],
        ),
        (
            AnnotationKind::Bezier,
            vec![
                305.0, 433.0, 383.37, 458.8, 404.23, 439.96, 464.0, 423.0, 460.0, 462.0, 405.58,
                474.53, 380.33, 489.72, 305.0, 462.0,
            ],
        ),
    ];
    for (kind, coords) in sources {
        let source =
            Annotation::new(kind, "src", Some("english"), &coords).expect("valid annotation");
        let before = source.clone();
        for target in AnnotationKind::ALL {
            let _ = source.to(target);
            assert_eq!(source, before, "{kind} -> {target} mutated its input");
        }
    }
}
