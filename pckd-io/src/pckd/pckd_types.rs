use pckd_core::containers::PointRecord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use static_assertions::const_assert;

/// One entry of the offset table in the header of a PCKD file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OffsetEntry {
    /// Absolute byte offset of the spatial index of this sub-cloud. Spatial indices are not decoded, the value is
    /// kept so that it survives a read
    pub tree_offset: u64,
    /// Absolute byte offset of the body of this sub-cloud, measured from the start of the stream
    pub point_cloud_offset: u64,
}

impl OffsetEntry {
    /// Size of an encoded `OffsetEntry` in bytes
    pub const BYTE_LENGTH: usize = 16;

    pub fn new(tree_offset: u64, point_cloud_offset: u64) -> Self {
        Self {
            tree_offset,
            point_cloud_offset,
        }
    }
}

/// Header of .pckd files
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContainerHeader {
    /// Format version. Only a single layout exists, so this is informational
    pub version: u16,
    /// One entry per sub-cloud, entry `i` describes sub-cloud `i`
    pub offsets: Vec<OffsetEntry>,
}

impl ContainerHeader {
    /// Length of the fixed part of the header (version and sub-cloud count) in bytes
    pub const FIXED_BYTE_LENGTH: usize = 6;

    pub fn new(version: u16, offsets: Vec<OffsetEntry>) -> Self {
        Self { version, offsets }
    }

    pub fn sub_cloud_count(&self) -> usize {
        self.offsets.len()
    }

    /// Total length of the encoded header in bytes
    pub fn byte_length(&self) -> usize {
        Self::FIXED_BYTE_LENGTH + self.offsets.len() * OffsetEntry::BYTE_LENGTH
    }
}

/// Length of the point count that precedes every sub-cloud body
pub const SUB_CLOUD_COUNT_BYTE_LENGTH: usize = 8;

const_assert!(PointRecord::BYTE_LENGTH == 27);
const_assert!(OffsetEntry::BYTE_LENGTH == 2 * std::mem::size_of::<u64>());
const_assert!(
    ContainerHeader::FIXED_BYTE_LENGTH == std::mem::size_of::<u16>() + std::mem::size_of::<u32>()
);
