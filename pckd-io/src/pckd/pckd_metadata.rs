use std::{any::Any, convert::TryFrom, fmt::Display};

use pckd_core::{math::AABB, meta::Metadata};

use super::{ContainerHeader, OffsetEntry};

/// `Metadata` implementation for PCKD files. Holds the header together with the point count of every
/// sub-cloud, which is all that can be known without decoding point records
#[derive(Clone, Debug)]
pub struct PckdMetadata {
    header: ContainerHeader,
    point_counts: Vec<u64>,
}

impl PckdMetadata {
    /// Creates new `PckdMetadata`. `point_counts` must have one entry per sub-cloud in `header`
    pub fn new(header: ContainerHeader, point_counts: Vec<u64>) -> Self {
        debug_assert_eq!(header.sub_cloud_count(), point_counts.len());
        Self {
            header,
            point_counts,
        }
    }

    pub fn header(&self) -> &ContainerHeader {
        &self.header
    }

    pub fn version(&self) -> u16 {
        self.header.version
    }

    pub fn sub_cloud_count(&self) -> usize {
        self.header.sub_cloud_count()
    }

    pub fn offsets(&self) -> &[OffsetEntry] {
        &self.header.offsets
    }

    /// Number of points in each sub-cloud, in header order
    pub fn point_counts(&self) -> &[u64] {
        &self.point_counts
    }

    /// Sum of all sub-cloud point counts. Saturates at `u64::MAX`
    pub fn total_points(&self) -> u64 {
        self.point_counts
            .iter()
            .fold(0_u64, |total, count| total.saturating_add(*count))
    }
}

impl Metadata for PckdMetadata {
    fn bounds(&self) -> Option<AABB<f32>> {
        None
    }

    fn number_of_points(&self) -> Option<usize> {
        usize::try_from(self.total_points()).ok()
    }

    fn get_named_field(&self, field_name: &str) -> Option<Box<dyn Any>> {
        match field_name {
            "VERSION" => Some(Box::new(self.version())),
            "SUB_CLOUD_COUNT" => Some(Box::new(self.sub_cloud_count())),
            "OFFSETS" => Some(Box::new(self.header.offsets.clone())),
            "POINT_COUNTS" => Some(Box::new(self.point_counts.clone())),
            _ => None,
        }
    }

    fn clone_into_box(&self) -> Box<dyn Metadata> {
        Box::new(self.clone())
    }
}

impl Display for PckdMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "PckdMetadata {{")?;
        writeln!(f, "\t\"version\": {}", self.version())?;
        writeln!(f, "\t\"sub_clouds\": {}", self.sub_cloud_count())?;
        writeln!(f, "\t\"points\": {}", self.total_points())?;
        for (idx, (entry, count)) in self.offsets().iter().zip(&self.point_counts).enumerate() {
            writeln!(
                f,
                "\t[{}] points: {} body offset: {} tree offset: {}",
                idx, count, entry.point_cloud_offset, entry.tree_offset
            )?;
        }
        write!(f, "}}")
    }
}
