//! Conversion between annotation kinds.
//!
//! Direct conversions form a small directed graph; anything else is chained
//! through intermediate kinds along a breadth-first shortest path. Fewer
//! hops means fewer chances for precision loss, so the minimum-length
//! chain always wins.

use std::collections::VecDeque;
use std::sync::LazyLock;

use tracing::instrument;

use crate::annotation::{Annotation, AnnotationKind, Shape};
use crate::error::{Error, Result};
use crate::geometry::{self, Point};

/// Samples per curve when flattening a Bezier pair into a polygon.
pub const BEZIER_SAMPLES: usize = 20;

/// Direct conversion edges, in registration order. Breadth-first search
/// explores neighbors in this order, so path selection is deterministic.
/// Bezier is source-only: nothing converts into it.
const EDGES: [(AnnotationKind, AnnotationKind); 7] = [
    (AnnotationKind::Dot, AnnotationKind::Box),
    (AnnotationKind::Box, AnnotationKind::Dot),
    (AnnotationKind::Box, AnnotationKind::Quad),
    (AnnotationKind::Quad, AnnotationKind::Box),
    (AnnotationKind::Quad, AnnotationKind::Polygon),
    (AnnotationKind::Polygon, AnnotationKind::Quad),
    (AnnotationKind::Bezier, AnnotationKind::Polygon),
];

/// Directed graph of the supported direct conversions.
///
/// Built once and read-only afterward; [`default_graph`] holds the
/// process-wide instance used by [`Annotation::to`].
pub struct ConversionGraph {
    adjacency: [Vec<AnnotationKind>; AnnotationKind::COUNT],
}

impl ConversionGraph {
    pub fn new() -> Self {
        let mut adjacency: [Vec<AnnotationKind>; AnnotationKind::COUNT] = Default::default();
        for (source, target) in EDGES {
            adjacency[source.index()].push(target);
        }
        Self { adjacency }
    }

    /// Kinds reachable from `kind` in a single conversion step.
    pub fn targets(&self, kind: AnnotationKind) -> &[AnnotationKind] {
        &self.adjacency[kind.index()]
    }

    /// Breadth-first shortest path from `from` to `to`, as the sequence of
    /// kinds to convert through (excluding `from` itself). `None` when `to`
    /// is unreachable.
    pub fn find_path(
        &self,
        from: AnnotationKind,
        to: AnnotationKind,
    ) -> Option<Vec<AnnotationKind>> {
        if from == to {
            return Some(Vec::new());
        }
        let mut visited = [false; AnnotationKind::COUNT];
        visited[from.index()] = true;
        let mut queue = VecDeque::from([vec![from]]);
        while let Some(path) = queue.pop_front() {
            let last = *path.last()?;
            for &next in self.targets(last) {
                if visited[next.index()] {
                    continue;
                }
                let mut extended = path.clone();
                extended.push(next);
                if next == to {
                    return Some(extended[1..].to_vec());
                }
                visited[next.index()] = true;
                queue.push_back(extended);
            }
        }
        None
    }

    /// Converts `annotation` to `target`, chaining direct conversions along
    /// the shortest path. The input is never mutated; the result is always
    /// a fresh value. A conversion to the annotation's own kind is the
    /// identity and applies zero steps.
    #[instrument(level = "debug", skip(self, annotation), fields(annotation = %annotation))]
    pub fn convert(&self, annotation: &Annotation, target: AnnotationKind) -> Result<Annotation> {
        if annotation.kind() == target {
            return Ok(annotation.clone());
        }
        let path = self
            .find_path(annotation.kind(), target)
            .ok_or(Error::NoConversionPath {
                from: annotation.kind(),
                to: target,
            })?;
        let mut current = annotation.clone();
        for step in path {
            current = apply_direct(&current, step)?;
        }
        Ok(current)
    }
}

impl Default for ConversionGraph {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT_GRAPH: LazyLock<ConversionGraph> = LazyLock::new(ConversionGraph::new);

/// Process-wide graph behind [`Annotation::to`].
pub fn default_graph() -> &'static ConversionGraph {
    &DEFAULT_GRAPH
}

/// Applies the single-step conversion for this (shape, target) pair. The
/// match covers exactly the pairs in [`EDGES`].
fn apply_direct(annotation: &Annotation, target: AnnotationKind) -> Result<Annotation> {
    let shape = match (annotation.shape(), target) {
        (Shape::Dot(p), AnnotationKind::Box) => dot_to_box(*p)?,
        (
            Shape::Box {
                top_left,
                bottom_right,
            },
            AnnotationKind::Dot,
        ) => box_to_dot(*top_left, *bottom_right),
        (
            Shape::Box {
                top_left,
                bottom_right,
            },
            AnnotationKind::Quad,
        ) => box_to_quad(*top_left, *bottom_right)?,
        (Shape::Quad(points), AnnotationKind::Box) => quad_to_box(points)?,
        (Shape::Quad(points), AnnotationKind::Polygon) => quad_to_polygon(points),
        (Shape::Polygon(points), AnnotationKind::Quad) => polygon_to_quad(points)?,
        (Shape::Bezier(curves), AnnotationKind::Polygon) => bezier_to_polygon(curves),
        (shape, target) => {
            return Err(Error::NoConversionPath {
                from: shape.kind(),
                to: target,
            })
        }
    };
    Ok(annotation.with_shape(shape))
}

/// Inflates the dot by a unit margin to synthesize a minimal box.
fn dot_to_box(p: Point) -> Result<Shape> {
    Shape::from_coords(
        AnnotationKind::Box,
        &[p.x - 1.0, p.y + 1.0, p.x + 1.0, p.y - 1.0],
    )
}

/// Midpoint of the stored corners, floored toward negative infinity so odd
/// corner sums resolve the same way every time.
fn box_to_dot(top_left: Point, bottom_right: Point) -> Shape {
    Shape::Dot(Point::new(
        ((top_left.x + bottom_right.x) / 2.0).floor(),
        ((top_left.y + bottom_right.y) / 2.0).floor(),
    ))
}

/// Adds the two missing corners. Quad construction re-canonicalizes the
/// order, keeping the result free of self-intersections.
fn box_to_quad(top_left: Point, bottom_right: Point) -> Result<Shape> {
    Shape::from_coords(
        AnnotationKind::Quad,
        &[
            top_left.x,
            top_left.y,
            top_left.x,
            bottom_right.y,
            bottom_right.x,
            bottom_right.y,
            bottom_right.x,
            top_left.y,
        ],
    )
}

/// Minimal enclosing axis-aligned box of the four quad points.
fn quad_to_box(points: &[Point; 4]) -> Result<Shape> {
    let mut min = points[0];
    let mut max = points[0];
    for p in &points[1..] {
        min = Point::new(min.x.min(p.x), min.y.min(p.y));
        max = Point::new(max.x.max(p.x), max.y.max(p.y));
    }
    Shape::from_coords(AnnotationKind::Box, &[min.x, min.y, max.x, max.y])
}

/// Inserts each edge's midpoint between its endpoints, giving the polygon
/// extra editable vertices while preserving the outline.
fn quad_to_polygon(points: &[Point; 4]) -> Shape {
    let mut out = Vec::with_capacity(8);
    for i in 0..4 {
        let next = points[(i + 1) % 4];
        out.push(points[i]);
        out.push(points[i].midpoint(next));
    }
    Shape::Polygon(out)
}

/// Lossy by nature: an arbitrary polygon has no canonical quad. The
/// heuristic fits the minimum-area rotated rectangle of the convex hull,
/// orders its corners by angle around the polygon's centroid, and rounds
/// to integer coordinates. Rotated text may end up with a rectangle that
/// does not follow the text's own orientation.
fn polygon_to_quad(points: &[Point]) -> Result<Shape> {
    let rect = geometry::minimum_rotated_rect(points).ok_or_else(|| {
        Error::DegenerateShape("polygon has no minimum rotated rectangle".to_owned())
    })?;
    let center = geometry::centroid(points)
        .ok_or_else(|| Error::DegenerateShape("polygon has no centroid".to_owned()))?;
    let mut corners = rect.to_vec();
    geometry::sort_around(&mut corners, center);
    let coords: Vec<f64> = corners
        .iter()
        .flat_map(|p| [p.x.round(), p.y.round()])
        .collect();
    Shape::from_coords(AnnotationKind::Quad, &coords)
}

/// Samples both cubic curves at evenly spaced parameters and concatenates
/// curve 0's points followed by curve 1's into one closed polygon.
fn bezier_to_polygon(curves: &[[Point; 4]; 2]) -> Shape {
    let mut out = geometry::sample_cubic_bezier(&curves[0], BEZIER_SAMPLES);
    out.extend(geometry::sample_cubic_bezier(&curves[1], BEZIER_SAMPLES));
    Shape::Polygon(out)
}
