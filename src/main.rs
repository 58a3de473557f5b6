use textmark::{Annotation, AnnotationKind};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

fn main() {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Two cubic curves from a curved storefront sign, top edge then bottom
    // edge right-to-left so the flattened outline closes on itself.
    let bezier = Annotation::new(
        AnnotationKind::Bezier,
        "OPEN",
        Some("english"),
        &[
            305.0, 433.0, 383.37, 458.8, 404.23, 439.96, 464.0, 423.0, 460.0, 462.0, 405.58,
            474.53, 380.33, 489.72, 305.0, 462.0,
        ],
    )
    .expect("valid bezier control points");

    for target in [
        AnnotationKind::Polygon,
        AnnotationKind::Quad,
        AnnotationKind::Box,
    ] {
        let converted = bezier.to(target).expect("bezier converts forward");
        log::debug!("{converted}: {:?}", converted.get_data());
        println!(
            "{bezier} -> {converted}: {} points",
            converted.coordinates().len() / 2
        );
    }

    // The reverse direction has no route: nothing converts into a Bezier.
    let dot = Annotation::new(AnnotationKind::Dot, "x", None, &[25.0, 100.0])
        .expect("valid dot coordinates");
    match dot.to(AnnotationKind::Bezier) {
        Ok(_) => unreachable!(),
        Err(err) => println!("{err}"),
    }
}
