use std::fmt;
use std::str::FromStr;

use crate::convert;
use crate::error::{Error, Result};
use crate::geometry::{self, Point};

/// The shape family of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    Dot,
    Box,
    Quad,
    Polygon,
    Bezier,
}

impl AnnotationKind {
    pub(crate) const COUNT: usize = 5;

    pub const ALL: [AnnotationKind; Self::COUNT] = [
        AnnotationKind::Dot,
        AnnotationKind::Box,
        AnnotationKind::Quad,
        AnnotationKind::Polygon,
        AnnotationKind::Bezier,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AnnotationKind::Dot => "Dot",
            AnnotationKind::Box => "Box",
            AnnotationKind::Quad => "Quad",
            AnnotationKind::Polygon => "Polygon",
            AnnotationKind::Bezier => "Bezier",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnnotationKind {
    type Err = Error;

    /// Parses the kind names dataset files dispatch on. "Poly" is accepted
    /// as shorthand for "Polygon".
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Dot" => Ok(AnnotationKind::Dot),
            "Box" => Ok(AnnotationKind::Box),
            "Quad" => Ok(AnnotationKind::Quad),
            "Poly" | "Polygon" => Ok(AnnotationKind::Polygon),
            "Bezier" => Ok(AnnotationKind::Bezier),
            other => Err(Error::UnknownKind(other.to_owned())),
        }
    }
}

/// Geometry payload of an annotation, tagged by [`AnnotationKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A single point.
    Dot(Point),
    /// Axis-aligned box, stored top-left/bottom-right in screen coordinates.
    Box { top_left: Point, bottom_right: Point },
    /// Four points in canonical rotational order (see
    /// [`Annotation::new`]). Drawing them in storage order never
    /// self-intersects.
    Quad([Point; 4]),
    /// Arbitrary points, stored exactly as given.
    Polygon(Vec<Point>),
    /// Two cubic Bezier curves of four control points each
    /// (endpoint, control, control, endpoint). Curve 0 sits spatially
    /// above curve 1 by caller contract.
    Bezier([[Point; 4]; 2]),
}

impl Shape {
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Shape::Dot(_) => AnnotationKind::Dot,
            Shape::Box { .. } => AnnotationKind::Box,
            Shape::Quad(_) => AnnotationKind::Quad,
            Shape::Polygon(_) => AnnotationKind::Polygon,
            Shape::Bezier(_) => AnnotationKind::Bezier,
        }
    }

    /// Validates arity and builds the shape, normalizing Box corner order
    /// and Quad rotational order so storage is deterministic regardless of
    /// the input ordering.
    pub(crate) fn from_coords(kind: AnnotationKind, coords: &[f64]) -> Result<Shape> {
        match kind {
            AnnotationKind::Dot => {
                check_arity(kind, "2", coords.len() == 2, coords.len())?;
                Ok(Shape::Dot(Point::new(coords[0], coords[1])))
            }
            AnnotationKind::Box => {
                check_arity(kind, "4", coords.len() == 4, coords.len())?;
                let a = Point::new(coords[0], coords[1]);
                let b = Point::new(coords[2], coords[3]);
                if a.x == b.x || a.y == b.y {
                    return Err(Error::DegenerateShape(format!(
                        "box corners ({}, {}) and ({}, {}) do not span an area",
                        a.x, a.y, b.x, b.y
                    )));
                }
                Ok(Shape::Box {
                    top_left: Point::new(a.x.min(b.x), a.y.min(b.y)),
                    bottom_right: Point::new(a.x.max(b.x), a.y.max(b.y)),
                })
            }
            AnnotationKind::Quad => {
                check_arity(kind, "8", coords.len() == 8, coords.len())?;
                let mut points = geometry::pair_up(coords);
                geometry::enforce_point_order(&mut points);
                Ok(Shape::Quad([points[0], points[1], points[2], points[3]]))
            }
            AnnotationKind::Polygon => {
                check_arity(
                    kind,
                    "an even number (at least 4)",
                    coords.len() >= 4 && coords.len() % 2 == 0,
                    coords.len(),
                )?;
                Ok(Shape::Polygon(geometry::pair_up(coords)))
            }
            AnnotationKind::Bezier => {
                check_arity(kind, "16", coords.len() == 16, coords.len())?;
                let p = geometry::pair_up(coords);
                Ok(Shape::Bezier([
                    [p[0], p[1], p[2], p[3]],
                    [p[4], p[5], p[6], p[7]],
                ]))
            }
        }
    }
}

fn check_arity(kind: AnnotationKind, expected: &'static str, ok: bool, actual: usize) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(Error::InvalidArity {
            kind,
            expected,
            actual,
        })
    }
}

/// A labeled text region in an image.
///
/// Values are immutable once constructed; conversions always produce a new
/// value. That makes annotations freely shareable across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    text: String,
    language: Option<String>,
    shape: Shape,
}

impl Annotation {
    /// Builds an annotation of `kind` from a flat `[x1, y1, x2, y2, ..]`
    /// coordinate list.
    ///
    /// Arity is validated per kind (Dot 2, Box 4, Quad 8, Bezier 16,
    /// Polygon any even count >= 4). Box corners may come in any
    /// configuration and are stored top-left/bottom-right; Quad points are
    /// stored in canonical rotational order. Polygon and Bezier points are
    /// stored exactly as given.
    pub fn new(
        kind: AnnotationKind,
        text: impl Into<String>,
        language: Option<&str>,
        coords: &[f64],
    ) -> Result<Self> {
        Ok(Self {
            text: text.into(),
            language: language.map(str::to_owned),
            shape: Shape::from_coords(kind, coords)?,
        })
    }

    /// Same metadata, different geometry. Used by the conversion steps.
    pub(crate) fn with_shape(&self, shape: Shape) -> Annotation {
        Annotation {
            text: self.text.clone(),
            language: self.language.clone(),
            shape,
        }
    }

    pub fn kind(&self) -> AnnotationKind {
        self.shape.kind()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Flat coordinate list in canonical storage order.
    pub fn coordinates(&self) -> Vec<f64> {
        fn extend(out: &mut Vec<f64>, points: &[Point]) {
            for p in points {
                out.push(p.x);
                out.push(p.y);
            }
        }
        let mut out = Vec::new();
        match &self.shape {
            Shape::Dot(p) => extend(&mut out, &[*p]),
            Shape::Box {
                top_left,
                bottom_right,
            } => extend(&mut out, &[*top_left, *bottom_right]),
            Shape::Quad(points) => extend(&mut out, points),
            Shape::Polygon(points) => extend(&mut out, points),
            Shape::Bezier(curves) => {
                extend(&mut out, &curves[0]);
                extend(&mut out, &curves[1]);
            }
        }
        out
    }

    /// Coordinates as an ordered `("x1", v), ("y1", v), ("x2", v), ..`
    /// mapping in canonical storage order. Collaborators serialize these
    /// alongside [`kind`](Self::kind), [`text`](Self::text) and
    /// [`language`](Self::language).
    pub fn get_data(&self) -> Vec<(String, f64)> {
        self.coordinates()
            .chunks_exact(2)
            .enumerate()
            .flat_map(|(i, c)| [(format!("x{}", i + 1), c[0]), (format!("y{}", i + 1), c[1])])
            .collect()
    }

    /// Converts to `target` through the default conversion graph, chaining
    /// intermediate conversions when no direct one exists. Returns a clone
    /// when `target` is already this annotation's kind.
    pub fn to(&self, target: AnnotationKind) -> Result<Annotation> {
        convert::default_graph().convert(self, target)
    }

    /// Rescales into image-relative units (`x / width`, `y / height`),
    /// keeping kind and metadata.
    pub fn normalized(&self, image_width: f64, image_height: f64) -> Result<Annotation> {
        if image_width <= 0.0 || image_height <= 0.0 {
            return Err(Error::DegenerateShape(format!(
                "image dimensions {image_width}x{image_height} are not positive"
            )));
        }
        let coords: Vec<f64> = self
            .coordinates()
            .iter()
            .enumerate()
            .map(|(i, v)| {
                if i % 2 == 0 {
                    v / image_width
                } else {
                    v / image_height
                }
            })
            .collect();
        Ok(self.with_shape(Shape::from_coords(self.kind(), &coords)?))
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind(), self.text)
    }
}
