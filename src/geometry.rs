use float_ord::FloatOrd;
use geo::{Area, Centroid, Coord, ConvexHull, LineString, MinimumRotatedRect, Polygon};

/// A 2D point in screen coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl From<Point> for Coord<f64> {
    fn from(p: Point) -> Self {
        Coord { x: p.x, y: p.y }
    }
}

/// Pairs up a flat `[x1, y1, x2, y2, ..]` list into points.
pub(crate) fn pair_up(coords: &[f64]) -> Vec<Point> {
    coords
        .chunks_exact(2)
        .map(|c| Point::new(c[0], c[1]))
        .collect()
}

/// Reorders points into the canonical rotational order: anchor on the point
/// with the smallest y (ties broken by smallest x), then ascending angle
/// from the anchor. The sort is stable, so input already in canonical order
/// comes back unchanged.
pub(crate) fn enforce_point_order(points: &mut [Point]) {
    let Some(anchor) = points
        .iter()
        .copied()
        .min_by_key(|p| (FloatOrd(p.y), FloatOrd(p.x)))
    else {
        return;
    };
    points.sort_by_key(|p| FloatOrd((p.y - anchor.y).atan2(p.x - anchor.x)));
}

/// Sorts points by ascending angle around `center`.
pub(crate) fn sort_around(points: &mut [Point], center: Point) {
    points.sort_by_key(|p| FloatOrd((p.y - center.y).atan2(p.x - center.x)));
}

fn to_geo_polygon(points: &[Point]) -> Polygon<f64> {
    let coords = points.iter().copied().map(Coord::from).collect();
    Polygon::new(LineString::new(coords), vec![])
}

/// Centroid of the polygon described by `points`.
pub(crate) fn centroid(points: &[Point]) -> Option<Point> {
    to_geo_polygon(points)
        .centroid()
        .map(|c| Point::new(c.x(), c.y()))
}

/// Corners of the minimum-area rotated rectangle enclosing the convex hull
/// of `points`. `None` when the hull is degenerate: collinear input makes
/// geo report a flat rectangle, which no caller can use as a quad.
pub(crate) fn minimum_rotated_rect(points: &[Point]) -> Option<[Point; 4]> {
    let hull = to_geo_polygon(points).convex_hull();
    let rect = hull.minimum_rotated_rect()?;
    if rect.unsigned_area() < 1e-9 {
        return None;
    }
    // The exterior ring repeats its first coordinate at the end.
    let mut corners: Vec<Point> = rect
        .exterior()
        .coords()
        .map(|c| Point::new(c.x, c.y))
        .collect();
    corners.pop();
    corners.try_into().ok()
}

/// Point on a cubic Bezier curve at parameter `t`, in the Bernstein basis:
/// `(1-t)^3 P0 + 3(1-t)^2 t P1 + 3(1-t) t^2 P2 + t^3 P3`.
pub(crate) fn cubic_bezier_point(curve: &[Point; 4], t: f64) -> Point {
    let u = 1.0 - t;
    let b = [u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t];
    Point::new(
        b[0] * curve[0].x + b[1] * curve[1].x + b[2] * curve[2].x + b[3] * curve[3].x,
        b[0] * curve[0].y + b[1] * curve[1].y + b[2] * curve[2].y + b[3] * curve[3].y,
    )
}

/// Samples a cubic curve at `n` evenly spaced parameters in `[0, 1]`,
/// endpoints included. `n` must be at least 2.
pub(crate) fn sample_cubic_bezier(curve: &[Point; 4], n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| cubic_bezier_point(curve, i as f64 / (n - 1) as f64))
        .collect()
}
