use nalgebra::{Point3, Vector3};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum GeometryError {
    #[error("Cannot build a bounding box from an empty point set")]
    EmptyPointSet,
    #[error("Padding must be a finite, non-negative distance (got {0})")]
    InvalidPadding(f64),
}

/// An axis-aligned box enclosing a point set, grown by a uniform padding on every side.
///
/// The stored extrema are the raw componentwise minimum and maximum of the input points;
/// center and size are derived on demand at full floating precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    min: Point3<f64>,
    max: Point3<f64>,
    padding: f64,
}

impl BoundingBox {
    /// Computes the padded bounding box of `points`.
    ///
    /// A single point is valid input and yields a cube of edge `2 * padding` centered on it.
    ///
    /// # Arguments
    ///
    /// * `points` - The coordinates to enclose.
    /// * `padding` - Distance in Angstroms added on each side of every axis.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyPointSet`] when `points` is empty, and
    /// [`GeometryError::InvalidPadding`] for a negative or non-finite padding.
    pub fn from_points<I>(points: I, padding: f64) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = Point3<f64>>,
    {
        if !padding.is_finite() || padding < 0.0 {
            return Err(GeometryError::InvalidPadding(padding));
        }

        let mut points = points.into_iter();
        let first = points.next().ok_or(GeometryError::EmptyPointSet)?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.inf(&p), max.sup(&p)));

        Ok(Self { min, max, padding })
    }

    pub fn min(&self) -> Point3<f64> {
        self.min
    }

    pub fn max(&self) -> Point3<f64> {
        self.max
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// The midpoint of the unpadded extrema on each axis.
    pub fn center(&self) -> Point3<f64> {
        Point3::from((self.min.coords + self.max.coords) / 2.0)
    }

    /// The edge lengths: extent plus twice the padding on each axis.
    pub fn size(&self) -> Vector3<f64> {
        (self.max - self.min).add_scalar(2.0 * self.padding)
    }
}

/// Returns the arithmetic mean of `points`, or `None` for an empty set.
pub fn centroid<I>(points: I) -> Option<Point3<f64>>
where
    I: IntoIterator<Item = Point3<f64>>,
{
    let (sum, count) = points
        .into_iter()
        .fold((Vector3::zeros(), 0usize), |(sum, count), p| {
            (sum + p.coords, count + 1)
        });
    (count > 0).then(|| Point3::from(sum / count as f64))
}

/// The rigid translation that moves `from` onto `to`.
pub fn translation_between(from: &Point3<f64>, to: &Point3<f64>) -> Vector3<f64> {
    to - from
}
