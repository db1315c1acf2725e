use std::{
    fs::File,
    io::{BufReader, Read, Seek},
    path::Path,
};

use anyhow::Result;
use log::debug;
use pckd_core::{
    containers::{GeometryAccumulator, MergedGeometryBuffer, SubCloud, MAX_VERTEX_COUNT},
    meta::Metadata,
};

use super::{
    read_header_within, read_point_count, read_sub_cloud_within, stream_length, ContainerHeader,
    DecodeError, PckdMetadata,
};
use crate::base::GeometryReader;

/// A reader for PCKD point cloud containers.
///
/// Creating a `PckdReader` reads the header and the point count of every sub-cloud, so an invalid offset table is
/// detected right away. Point records are only decoded by [read_sub_cloud](PckdReader::read_sub_cloud) and
/// [decode_geometry](PckdReader::decode_geometry).
pub struct PckdReader<R: Read + Seek> {
    reader: R,
    metadata: PckdMetadata,
    stream_length: u64,
}

impl<R: Read + Seek> PckdReader<R> {
    /// Creates a new `PckdReader` from the given stream. The header is expected at the current position of `read`,
    /// all body offsets are absolute positions within `read`
    pub fn from_read(mut read: R) -> Result<Self, DecodeError> {
        let stream_length = stream_length(&mut read)?;
        let header = read_header_within(&mut read, stream_length)?;
        let point_counts = header
            .offsets
            .iter()
            .map(|entry| read_point_count(&mut read, entry, stream_length))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            reader: read,
            metadata: PckdMetadata::new(header, point_counts),
            stream_length,
        })
    }

    pub fn header(&self) -> &ContainerHeader {
        self.metadata.header()
    }

    pub fn metadata(&self) -> &PckdMetadata {
        &self.metadata
    }

    /// Decodes the sub-cloud at `index` in the offset table
    pub fn read_sub_cloud(&mut self, index: usize) -> Result<SubCloud, DecodeError> {
        let entry = *self.header().offsets.get(index).ok_or_else(|| {
            DecodeError::SubCloudIndexOutOfRange {
                index,
                count: self.metadata.sub_cloud_count(),
            }
        })?;
        let sub_cloud = read_sub_cloud_within(&mut self.reader, &entry, self.stream_length)?;
        debug!("Sub-cloud {}: {} points", index, sub_cloud.point_count());
        Ok(sub_cloud)
    }

    /// Decodes all sub-clouds in header order
    pub fn read_sub_clouds(&mut self) -> Result<Vec<SubCloud>, DecodeError> {
        (0..self.metadata.sub_cloud_count())
            .map(|index| self.read_sub_cloud(index))
            .collect()
    }

    /// Decodes all sub-clouds and merges them into a [MergedGeometryBuffer] named `name`. Either the whole
    /// container decodes or an error is returned, there is no partial result
    pub fn decode_geometry(&mut self, name: &str) -> Result<MergedGeometryBuffer, DecodeError> {
        let total = self.metadata.total_points();
        if total > MAX_VERTEX_COUNT {
            return Err(DecodeError::TooManyPoints { total });
        }

        let mut accumulator =
            GeometryAccumulator::with_capacity(total as usize, self.metadata.sub_cloud_count());
        for index in 0..self.metadata.sub_cloud_count() {
            let sub_cloud = self.read_sub_cloud(index)?;
            let merged_total = accumulator.vertex_count() as u64 + sub_cloud.point_count() as u64;
            if merged_total > MAX_VERTEX_COUNT {
                return Err(DecodeError::TooManyPoints {
                    total: merged_total,
                });
            }
            accumulator.push_sub_cloud(&sub_cloud);
        }
        Ok(accumulator.finish(name))
    }

    /// Unwraps this `PckdReader`, returning the underlying stream
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl PckdReader<BufReader<File>> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DecodeError> {
        let reader = BufReader::new(File::open(path)?);
        Self::from_read(reader)
    }
}

impl<R: Read + Seek> GeometryReader for PckdReader<R> {
    fn read_geometry(&mut self, name: &str) -> Result<MergedGeometryBuffer> {
        Ok(self.decode_geometry(name)?)
    }

    fn get_metadata(&self) -> &dyn Metadata {
        &self.metadata
    }
}

/// Decodes a whole PCKD container from `read` into a [MergedGeometryBuffer] with the given display name
pub fn decode<R: Read + Seek>(read: R, display_name: &str) -> Result<MergedGeometryBuffer, DecodeError> {
    PckdReader::from_read(read)?.decode_geometry(display_name)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::pckd::{encode_container, test_sub_cloud, BOGUS_TREE_OFFSET};
    use pckd_core::containers::Partition;

    #[test]
    fn test_decode_two_sub_clouds() {
        let a = test_sub_cloud(3);
        let b = test_sub_cloud(2);
        let bytes = encode_container(1, &[a.clone(), b.clone()], false);

        let buffer = decode(Cursor::new(bytes), "two").expect("Could not decode container");

        let expected_positions = a
            .points()
            .iter()
            .chain(b.points())
            .map(|point| point.position)
            .collect::<Vec<_>>();
        assert_eq!(expected_positions.as_slice(), buffer.positions());
        assert_eq!(&[Partition::new(0, 3), Partition::new(3, 2)], buffer.partitions());
        assert_eq!("two", buffer.name());
    }

    #[test]
    fn test_metadata_without_decoding() {
        let bytes = encode_container(9, &[test_sub_cloud(4), test_sub_cloud(0), test_sub_cloud(6)], true);
        let reader = PckdReader::from_read(Cursor::new(bytes)).unwrap();

        assert_eq!(&[4_u64, 0, 6], reader.metadata().point_counts());
        assert_eq!(Some(10), reader.get_metadata().number_of_points());
        assert_eq!(9, reader.header().version);
        assert!(reader
            .header()
            .offsets
            .iter()
            .all(|entry| entry.tree_offset == BOGUS_TREE_OFFSET));
    }

    #[test]
    fn test_read_single_sub_cloud() {
        let sub_clouds = [test_sub_cloud(1), test_sub_cloud(5)];
        let bytes = encode_container(1, &sub_clouds, false);
        let mut reader = PckdReader::from_read(Cursor::new(bytes)).unwrap();

        assert_eq!(sub_clouds[1], reader.read_sub_cloud(1).unwrap());
        assert_eq!(sub_clouds.to_vec(), reader.read_sub_clouds().unwrap());
        match reader.read_sub_cloud(2) {
            Err(DecodeError::SubCloudIndexOutOfRange { index, count }) => {
                assert_eq!((2, 2), (index, count))
            }
            other => panic!("Unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_body_offset_outside_of_stream() {
        let mut bytes = encode_container(1, &[test_sub_cloud(1)], false);
        let offset_position = 6 + 8;
        bytes[offset_position..offset_position + 8].copy_from_slice(&4096_u64.to_le_bytes());

        let err = PckdReader::from_read(Cursor::new(bytes)).err().unwrap();
        assert!(err.is_truncation(), "{}", err);
    }

    #[test]
    fn test_empty_container() {
        let bytes = encode_container(1, &[], false);
        let buffer = decode(Cursor::new(bytes), "empty").unwrap();
        assert!(buffer.is_empty());
        assert_eq!(0, buffer.partition_count());
    }
}
