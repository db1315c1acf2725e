use std::convert::TryFrom;

use nalgebra::{Vector3, Vector4};

use super::{MergedGeometryBuffer, Partition, SubCloud};

/// Largest number of vertices a [MergedGeometryBuffer] can hold. Partitions and draw units use 32-bit indices
pub const MAX_VERTEX_COUNT: u64 = u32::MAX as u64;

/// Merges decoded [SubCloud]s into the flat arrays of a [MergedGeometryBuffer], remembering one [Partition]
/// per sub-cloud. Sub-clouds have to be pushed in header order.
#[derive(Debug, Clone, Default)]
pub struct GeometryAccumulator {
    positions: Vec<Vector3<f32>>,
    colors: Vec<Vector4<u8>>,
    partitions: Vec<Partition>,
}

impl GeometryAccumulator {
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates an accumulator with enough capacity for `vertex_capacity` vertices and `partition_capacity`
    /// partitions
    pub fn with_capacity(vertex_capacity: usize, partition_capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_capacity),
            colors: Vec::with_capacity(vertex_capacity),
            partitions: Vec::with_capacity(partition_capacity),
        }
    }

    /// Appends all points of `sub_cloud` and returns the [Partition] that was recorded for it. Normals are dropped,
    /// colors get an alpha of 255. An empty `sub_cloud` still records a partition with a count of zero.
    ///
    /// # Panics
    ///
    /// If the total number of vertices would exceed [MAX_VERTEX_COUNT]
    pub fn push_sub_cloud(&mut self, sub_cloud: &SubCloud) -> Partition {
        let start_index = u32::try_from(self.positions.len())
            .expect("Vertex count of GeometryAccumulator exceeds 32-bit index range");
        let count = u32::try_from(sub_cloud.point_count())
            .ok()
            .filter(|count| start_index.checked_add(*count).is_some())
            .expect("Vertex count of GeometryAccumulator exceeds 32-bit index range");

        self.positions
            .extend(sub_cloud.points().iter().map(|point| point.position));
        self.colors
            .extend(sub_cloud.points().iter().map(|point| point.color_rgba()));

        let partition = Partition::new(start_index, count);
        self.partitions.push(partition);
        partition
    }

    /// Number of vertices accumulated so far
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    /// Consumes the accumulator and turns it into a [MergedGeometryBuffer] with the given display `name`
    pub fn finish<S: Into<String>>(self, name: S) -> MergedGeometryBuffer {
        MergedGeometryBuffer::from_parts(name.into(), self.positions, self.colors, self.partitions)
    }
}

/// Merges all `sub_clouds` in iteration order into a new [MergedGeometryBuffer] named `name`
///
/// # Panics
///
/// If the total number of points exceeds [MAX_VERTEX_COUNT]
pub fn assemble<S: Into<String>, I: IntoIterator<Item = SubCloud>>(
    name: S,
    sub_clouds: I,
) -> MergedGeometryBuffer {
    let mut accumulator = GeometryAccumulator::new();
    for sub_cloud in sub_clouds {
        accumulator.push_sub_cloud(&sub_cloud);
    }
    accumulator.finish(name)
}
