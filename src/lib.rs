#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Geometric validation of single polygons against the `GE_P_*` rules.
//!
//! A [`Polygon`](geom::Polygon) is one exterior ring plus any number of
//! interior rings in 3D. [`validate_polygon`] runs the whole rule catalogue
//! and returns a [`ValidationReport`] with exactly one outcome per rule.
//!
//! The crate only emits `log` records; installing a logger is up to the
//! host. Enable the `parallel` feature to evaluate rules on the rayon pool.

pub mod geom;
pub mod rules;

pub use geom::{ExtractedRings, GeomError, Point3, Polygon, Ring, RingRef};
pub use rules::{
    RuleId, RuleOutcome, ValidationOptions, ValidationReport, Validator, Violation,
    validate_polygon,
};
