use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A contiguous range of vertices inside a [MergedGeometryBuffer](crate::containers::MergedGeometryBuffer)
/// that belongs to exactly one sub-cloud. A partition may be empty, in which case `count` is zero and
/// `start_index` is the index at which the next non-empty partition starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Partition {
    pub start_index: u32,
    pub count: u32,
}

impl Partition {
    pub fn new(start_index: u32, count: u32) -> Self {
        Self { start_index, count }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Exclusive end index of this partition, or `None` if it does not fit into the 32-bit index range
    pub fn checked_end_index(&self) -> Option<u32> {
        self.start_index.checked_add(self.count)
    }

    /// Exclusive end index of this partition, clamped to `u32::MAX`
    pub fn end_index(&self) -> u32 {
        self.start_index.saturating_add(self.count)
    }

    /// Returns the range of vertex indices covered by this partition
    /// ```
    /// # use pckd_core::containers::Partition;
    /// assert_eq!(3..5, Partition::new(3, 2).index_range());
    /// assert!(Partition::new(7, 0).index_range().is_empty());
    /// ```
    pub fn index_range(&self) -> Range<u32> {
        self.start_index..self.end_index()
    }

    /// Same as [index_range](Partition::index_range) but usable for slicing the vertex arrays
    pub fn vertex_range(&self) -> Range<usize> {
        self.start_index as usize..self.end_index() as usize
    }
}

/// How the indices of a [DrawUnit] are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PointTopology {
    /// Every index is a single, unconnected point
    Points,
}

/// Everything a renderer needs to issue one draw call for a single [Partition]: the topology and the
/// indices into the shared vertex arrays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawUnit {
    pub topology: PointTopology,
    pub indices: Vec<u32>,
}

impl DrawUnit {
    /// Creates the `DrawUnit` for the given `Partition`. Empty partitions result in an empty index list
    pub fn for_partition(partition: &Partition) -> Self {
        Self {
            topology: PointTopology::Points,
            indices: partition.index_range().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
