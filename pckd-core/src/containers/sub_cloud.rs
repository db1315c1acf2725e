use std::iter::FromIterator;

use nalgebra::{Vector3, Vector4};

/// Alpha value of every color in a merged buffer. PCKD stores RGB only
pub const OPAQUE_ALPHA: u8 = 255;

/// A single decoded point, exactly as it is stored in a PCKD sub-cloud body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointRecord {
    pub position: Vector3<f32>,
    pub normal: Vector3<f32>,
    pub color: Vector3<u8>,
}

impl PointRecord {
    /// Size of an encoded `PointRecord` in bytes: six `f32` values followed by three `u8` color channels
    pub const BYTE_LENGTH: usize = 6 * std::mem::size_of::<f32>() + 3;

    pub fn new(position: Vector3<f32>, normal: Vector3<f32>, color: Vector3<u8>) -> Self {
        Self {
            position,
            normal,
            color,
        }
    }

    /// Returns the color of this point as RGBA, with the alpha channel set to [OPAQUE_ALPHA]
    pub fn color_rgba(&self) -> Vector4<u8> {
        self.color.push(OPAQUE_ALPHA)
    }
}

/// All points of one sub-cloud of a PCKD container. A `SubCloud` with no points is valid
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubCloud {
    points: Vec<PointRecord>,
}

impl SubCloud {
    pub fn from_points(points: Vec<PointRecord>) -> Self {
        Self { points }
    }

    /// Creates an empty `SubCloud` that can hold `capacity` points without reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    pub fn push_point(&mut self, point: PointRecord) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[PointRecord] {
        &self.points
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<PointRecord>> for SubCloud {
    fn from(points: Vec<PointRecord>) -> Self {
        Self::from_points(points)
    }
}

impl FromIterator<PointRecord> for SubCloud {
    fn from_iter<I: IntoIterator<Item = PointRecord>>(iter: I) -> Self {
        Self::from_points(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_byte_length() {
        assert_eq!(27, PointRecord::BYTE_LENGTH);
    }

    #[test]
    fn test_color_rgba_ignores_normal() {
        let a = PointRecord::new(Vector3::zeros(), Vector3::x(), Vector3::new(1, 2, 3));
        let b = PointRecord::new(Vector3::zeros(), Vector3::new(f32::NAN, 0.0, -1.0), a.color);
        assert_eq!(Vector4::new(1, 2, 3, 255), a.color_rgba());
        assert_eq!(a.color_rgba(), b.color_rgba());
    }
}
