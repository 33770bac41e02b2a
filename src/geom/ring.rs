//! Ring and polygon input model.
//!
//! A [`Ring`] is a closed loop of [`Point3`] with the closing duplicate
//! removed. A [`Polygon`] is one exterior ring plus any number of interior
//! rings. Both are immutable once built; every rule reads them through a
//! shared reference.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::core::{Point3, Tolerance};
use super::error::GeomError;

/// Identifies one ring of a polygon in rule evidence and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RingRef {
    Exterior,
    Interior(usize),
}

impl fmt::Display for RingRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exterior => write!(f, "exterior ring"),
            Self::Interior(index) => write!(f, "interior ring {index}"),
        }
    }
}

/// A closed, ordered point loop.
///
/// The first and last points are implicitly connected; no explicit closing
/// point is stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ring {
    points: Vec<Point3>,
}

impl Ring {
    /// Build a ring from raw points.
    ///
    /// Consecutive duplicates and an explicit closing point are dropped.
    ///
    /// # Errors
    /// `NonFinitePoint` for NaN/infinite coordinates, `NotEnoughPoints` when
    /// fewer than 3 points remain after cleaning.
    pub fn new(points: Vec<Point3>) -> Result<Self, GeomError> {
        Self::with_tolerance(points, Tolerance::DEFAULT)
    }

    pub fn with_tolerance(points: Vec<Point3>, tol: Tolerance) -> Result<Self, GeomError> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(GeomError::NonFinitePoint { index });
        }

        let mut cleaned: Vec<Point3> = Vec::with_capacity(points.len());
        for p in points {
            if cleaned
                .last()
                .copied()
                .is_some_and(|prev| tol.approx_eq_point3(prev, p))
            {
                continue;
            }
            cleaned.push(p);
        }

        while cleaned.len() > 1 {
            let (Some(first), Some(last)) = (cleaned.first().copied(), cleaned.last().copied())
            else {
                break;
            };
            if !tol.approx_eq_point3(first, last) {
                break;
            }
            cleaned.pop();
        }

        if cleaned.len() < 3 {
            return Err(GeomError::NotEnoughPoints {
                count: cleaned.len(),
            });
        }

        Ok(Self { points: cleaned })
    }

    /// Build a ring from a flat `x y z x y z ...` coordinate list.
    ///
    /// # Errors
    /// `NotEnoughPoints` when the list length is not a multiple of 3, plus
    /// everything [`Ring::new`] rejects.
    pub fn from_flat_coordinates(coords: &[f64]) -> Result<Self, GeomError> {
        if coords.len() % 3 != 0 {
            return Err(GeomError::NotEnoughPoints {
                count: coords.len() / 3,
            });
        }
        let points = coords
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();
        Self::new(points)
    }

    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Same loop traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }
}

impl<'de> Deserialize<'de> for Ring {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let points = Vec::<Point3>::deserialize(deserializer)?;
        Self::new(points).map_err(serde::de::Error::custom)
    }
}

/// Raw payload handed over by a ring extractor: the exterior is a list by
/// convention and must hold exactly one ring.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractedRings {
    pub exterior: Vec<Ring>,
    #[serde(default)]
    pub interior: Vec<Ring>,
}

/// One exterior ring and its holes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    exterior: Ring,
    interiors: Vec<Ring>,
}

impl Polygon {
    #[must_use]
    pub fn new(exterior: Ring, interiors: Vec<Ring>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }

    /// # Errors
    /// `MalformedExterior` unless the payload carries exactly one exterior ring.
    pub fn from_extracted(rings: ExtractedRings) -> Result<Self, GeomError> {
        let ExtractedRings { exterior, interior } = rings;
        let count = exterior.len();
        let mut exterior = exterior.into_iter();
        match (exterior.next(), exterior.next()) {
            (Some(ring), None) => Ok(Self::new(ring, interior)),
            _ => Err(GeomError::MalformedExterior { count }),
        }
    }

    #[must_use]
    pub fn exterior(&self) -> &Ring {
        &self.exterior
    }

    #[must_use]
    pub fn interiors(&self) -> &[Ring] {
        &self.interiors
    }

    /// Resolve a ring reference against this polygon.
    #[must_use]
    pub fn ring(&self, which: RingRef) -> Option<&Ring> {
        match which {
            RingRef::Exterior => Some(&self.exterior),
            RingRef::Interior(index) => self.interiors.get(index),
        }
    }

    /// Exterior first, then interiors in input order.
    pub fn rings(&self) -> impl Iterator<Item = (RingRef, &Ring)> {
        std::iter::once((RingRef::Exterior, &self.exterior)).chain(
            self.interiors
                .iter()
                .enumerate()
                .map(|(index, ring)| (RingRef::Interior(index), ring)),
        )
    }

    #[must_use]
    pub fn ring_count(&self) -> usize {
        1 + self.interiors.len()
    }
}
