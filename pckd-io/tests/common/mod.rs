use std::ops::Range;

use byteorder::{LittleEndian, WriteBytesExt};
use pckd_core::{
    containers::{PointRecord, SubCloud},
    nalgebra::Vector3,
};
use rand::{distributions::Uniform, prelude::Distribution, Rng};

/// Header bytes before the offset table: u16 version + u32 sub-cloud count
pub const FIXED_HEADER_LENGTH: usize = 6;
pub const OFFSET_ENTRY_LENGTH: usize = 16;
pub const POINT_COUNT_LENGTH: usize = 8;
pub const RECORD_LENGTH: usize = 27;

/// Generates point records with positions in a fixed cube and arbitrary normals and colors
pub struct TestPointDistribution;

impl Distribution<PointRecord> for TestPointDistribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PointRecord {
        let coordinate = Uniform::new(-100.0_f32, 100.0);
        PointRecord::new(
            Vector3::new(rng.sample(coordinate), rng.sample(coordinate), rng.sample(coordinate)),
            Vector3::new(rng.gen(), rng.gen(), rng.gen()),
            Vector3::new(rng.gen(), rng.gen(), rng.gen()),
        )
    }
}

pub fn random_sub_cloud<R: Rng>(rng: &mut R, count: usize) -> SubCloud {
    (0..count).map(|_| rng.sample(TestPointDistribution)).collect()
}

/// A PCKD container encoded in memory, together with the information where each body ended up
pub struct EncodedContainer {
    pub bytes: Vec<u8>,
    pub body_offsets: Vec<u64>,
}

impl EncodedContainer {
    /// Byte range of the record at `record_index` within the body of sub-cloud `sub_cloud_index`
    pub fn record_range(&self, sub_cloud_index: usize, record_index: usize) -> Range<usize> {
        let start = self.body_offsets[sub_cloud_index] as usize
            + POINT_COUNT_LENGTH
            + record_index * RECORD_LENGTH;
        start..start + RECORD_LENGTH
    }

    /// Byte range of the normal of the given record
    pub fn normal_range(&self, sub_cloud_index: usize, record_index: usize) -> Range<usize> {
        let record = self.record_range(sub_cloud_index, record_index);
        record.start + 12..record.start + 24
    }
}

/// Where the bodies of the sub-clouds are placed within the file
#[derive(Copy, Clone, Debug)]
pub enum BodyLayout {
    /// Bodies follow the header in header order
    InOrder,
    /// Bodies follow the header in reverse header order
    Reversed,
    /// Like `InOrder`, but with the given number of junk bytes before each body
    Padded(usize),
}

pub fn encode_container(
    version: u16,
    tree_offsets: &[u64],
    sub_clouds: &[SubCloud],
    layout: BodyLayout,
) -> EncodedContainer {
    assert_eq!(tree_offsets.len(), sub_clouds.len());
    let header_length = FIXED_HEADER_LENGTH + sub_clouds.len() * OFFSET_ENTRY_LENGTH;

    let mut order = (0..sub_clouds.len()).collect::<Vec<_>>();
    if let BodyLayout::Reversed = layout {
        order.reverse();
    }
    let padding = match layout {
        BodyLayout::Padded(padding) => padding,
        _ => 0,
    };

    let mut body = Vec::new();
    let mut body_offsets = vec![0_u64; sub_clouds.len()];
    for idx in order {
        body.extend(std::iter::repeat(0xAB_u8).take(padding));
        body_offsets[idx] = (header_length + body.len()) as u64;

        let sub_cloud = &sub_clouds[idx];
        body.write_u64::<LittleEndian>(sub_cloud.point_count() as u64)
            .unwrap();
        for record in sub_cloud.points() {
            for value in record.position.iter().chain(record.normal.iter()) {
                body.write_f32::<LittleEndian>(*value).unwrap();
            }
            body.extend_from_slice(record.color.as_slice());
        }
    }

    let mut bytes = Vec::with_capacity(header_length + body.len());
    bytes.write_u16::<LittleEndian>(version).unwrap();
    bytes.write_u32::<LittleEndian>(sub_clouds.len() as u32).unwrap();
    for (tree_offset, body_offset) in tree_offsets.iter().zip(&body_offsets) {
        bytes.write_u64::<LittleEndian>(*tree_offset).unwrap();
        bytes.write_u64::<LittleEndian>(*body_offset).unwrap();
    }
    bytes.extend(body);

    EncodedContainer {
        bytes,
        body_offsets,
    }
}

/// Encodes the given sub-clouds with version 1, zero tree offsets and bodies in header order
pub fn encode_simple(sub_clouds: &[SubCloud]) -> EncodedContainer {
    encode_container(
        1,
        &vec![0; sub_clouds.len()],
        sub_clouds,
        BodyLayout::InOrder,
    )
}
