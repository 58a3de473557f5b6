//! Text-region annotations for scene-text and OCR datasets.
//!
//! A text region is labeled with one of five geometric representations:
//! a single point ([`AnnotationKind::Dot`]), an axis-aligned box, a
//! quadrilateral, an arbitrary polygon, or a pair of cubic Bezier curves.
//! Datasets disagree on which one they ship, so every [`Annotation`] can be
//! converted to another kind with [`Annotation::to`]; when no direct
//! conversion exists the [`ConversionGraph`] chains the shortest sequence
//! of intermediate kinds.
//!
//! ```
//! use textmark::{Annotation, AnnotationKind};
//!
//! let dot = Annotation::new(AnnotationKind::Dot, "hi", Some("english"), &[25.0, 100.0])?;
//! let boxed = dot.to(AnnotationKind::Box)?;
//! assert_eq!(boxed.coordinates(), vec![24.0, 99.0, 26.0, 101.0]);
//! # Ok::<(), textmark::Error>(())
//! ```
//!
//! The core owns no I/O: dataset parsers, drawing and CLI glue construct
//! annotations from flat coordinate lists and serialize them back out
//! through [`Annotation::get_data`].

mod annotation;
mod convert;
mod error;
mod geometry;

pub use annotation::{Annotation, AnnotationKind, Shape};
pub use convert::{default_graph, ConversionGraph, BEZIER_SAMPLES};
pub use error::{Error, Result};
pub use geometry::Point;
