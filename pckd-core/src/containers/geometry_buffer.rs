use nalgebra::{Point3, Vector3, Vector4};

use super::{DrawUnit, Partition};
use crate::math::AABB;

/// The fully decoded content of a PCKD container: flat vertex positions and RGBA colors of all sub-clouds,
/// concatenated in header order, plus one [Partition] per sub-cloud.
///
/// `positions` and `colors` always have the same length, and the partitions tile `0..vertex_count()` without
/// gaps or overlaps. Sub-clouds without points keep their slot as an empty partition, so partition `i` always
/// corresponds to sub-cloud `i` of the container.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergedGeometryBuffer {
    name: String,
    positions: Vec<Vector3<f32>>,
    colors: Vec<Vector4<u8>>,
    partitions: Vec<Partition>,
}

impl MergedGeometryBuffer {
    /// Creates a buffer from its raw parts. Use a [GeometryAccumulator](super::GeometryAccumulator) to build one
    /// from decoded sub-clouds instead.
    ///
    /// # Panics
    ///
    /// If `positions` and `colors` differ in length, or if `partitions` do not tile the vertex range in order.
    pub fn from_parts(
        name: String,
        positions: Vec<Vector3<f32>>,
        colors: Vec<Vector4<u8>>,
        partitions: Vec<Partition>,
    ) -> Self {
        assert_eq!(
            positions.len(),
            colors.len(),
            "Number of colors must match number of positions"
        );
        let covered = partitions.iter().try_fold(0u32, |next_start, partition| {
            if partition.start_index == next_start {
                partition.checked_end_index()
            } else {
                None
            }
        });
        assert_eq!(
            Some(positions.len()),
            covered.map(|end| end as usize),
            "Partitions must cover all vertices in order"
        );
        Self {
            name,
            positions,
            colors,
            partitions,
        }
    }

    /// Splits this buffer into `(name, positions, colors, partitions)`
    pub fn into_parts(
        self,
    ) -> (
        String,
        Vec<Vector3<f32>>,
        Vec<Vector4<u8>>,
        Vec<Partition>,
    ) {
        (self.name, self.positions, self.colors, self.partitions)
    }

    /// The display name of this buffer, usually the file stem of the container it was decoded from
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vector3<f32>] {
        &self.positions
    }

    pub fn colors(&self) -> &[Vector4<u8>] {
        &self.colors
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    pub fn partition(&self, index: usize) -> Option<&Partition> {
        self.partitions.get(index)
    }

    /// Iterates over all partitions that contain at least one vertex, together with their index in the
    /// partition table (which is the index of the sub-cloud in the container header)
    pub fn non_empty_partitions(&self) -> impl Iterator<Item = (usize, Partition)> + '_ {
        self.partitions
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, partition)| !partition.is_empty())
    }

    /// Positions of the vertices in the partition at `index`
    pub fn partition_positions(&self, index: usize) -> Option<&[Vector3<f32>]> {
        self.partition(index)
            .map(|partition| &self.positions[partition.vertex_range()])
    }

    /// Colors of the vertices in the partition at `index`
    pub fn partition_colors(&self, index: usize) -> Option<&[Vector4<u8>]> {
        self.partition(index)
            .map(|partition| &self.colors[partition.vertex_range()])
    }

    /// Raw bytes of the position array, tightly packed as three little-endian `f32` per vertex on little-endian
    /// hosts. Suitable for uploading into a vertex buffer
    pub fn positions_as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Raw bytes of the color array, four `u8` per vertex
    pub fn colors_as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Bounding box of all vertices. `None` if the buffer has no vertices
    pub fn bounds(&self) -> Option<AABB<f32>> {
        bounds_of(&self.positions)
    }

    /// Bounding box of the partition at `index`. `None` if there is no such partition or it is empty
    pub fn partition_bounds(&self, index: usize) -> Option<AABB<f32>> {
        self.partition_positions(index).and_then(bounds_of)
    }

    /// Creates the [DrawUnit] of the partition at `index`
    pub fn draw_unit(&self, index: usize) -> Option<DrawUnit> {
        self.partition(index).map(DrawUnit::for_partition)
    }

    /// Creates one [DrawUnit] per partition, in partition order. Empty partitions yield empty draw units
    pub fn draw_units(&self) -> Vec<DrawUnit> {
        self.partitions.iter().map(DrawUnit::for_partition).collect()
    }
}

fn bounds_of(positions: &[Vector3<f32>]) -> Option<AABB<f32>> {
    AABB::from_points(positions.iter().map(|position| Point3::from(*position)))
}
