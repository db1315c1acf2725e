use crate::math::AABB;

use std::{any::Any, fmt::Display};

/// Trait that represents metadata of a point cloud container, i.e. everything that is known about the container
/// without decoding its point data. Besides common accessors like the bounding box and the number of points, there
/// is a generic accessor for named fields that depend on the actual container format.
pub trait Metadata: Display {
    /// Returns the bounding box of the associated `Metadata`. Formats that store no bounds return `None`
    fn bounds(&self) -> Option<AABB<f32>>;
    /// Returns the total number of points, if it is known without decoding the point data
    fn number_of_points(&self) -> Option<usize>;
    /// Returns the value of the metadata field named `field_name`, if it exists.
    fn get_named_field(&self, field_name: &str) -> Option<Box<dyn Any>>;
    /// Clone the associated `Metadata` and put it into a `Box`
    fn clone_into_box(&self) -> Box<dyn Metadata>;
}
