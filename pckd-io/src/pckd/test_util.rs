use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use pckd_core::{
    containers::{PointRecord, SubCloud},
    nalgebra::Vector3,
};

use super::{ContainerHeader, OffsetEntry, SUB_CLOUD_COUNT_BYTE_LENGTH};

/// Tree offset written for every sub-cloud. It points far outside of any test file, so reading it would fail
pub(crate) const BOGUS_TREE_OFFSET: u64 = u64::MAX - 1;

/// Returns a deterministic sub-cloud with `count` points. Values depend on the point index so that
/// order mistakes show up in comparisons
pub(crate) fn test_sub_cloud(count: usize) -> SubCloud {
    (0..count)
        .map(|idx| {
            let v = idx as f32;
            PointRecord::new(
                Vector3::new(v, v * 2.0, -v),
                Vector3::new(0.0, 1.0, v),
                Vector3::new(idx as u8, (idx * 3) as u8, 255 - idx as u8),
            )
        })
        .collect()
}

pub(crate) fn write_point_record<W: Write>(writer: &mut W, record: &PointRecord) -> std::io::Result<()> {
    for value in record.position.iter().chain(record.normal.iter()) {
        writer.write_f32::<LittleEndian>(*value)?;
    }
    writer.write_all(record.color.as_slice())
}

/// Encodes the given sub-clouds as a PCKD container. Bodies follow the header directly, in header order or, if
/// `reverse_bodies` is set, in reverse order
pub(crate) fn encode_container(version: u16, sub_clouds: &[SubCloud], reverse_bodies: bool) -> Vec<u8> {
    let header_length =
        ContainerHeader::FIXED_BYTE_LENGTH + sub_clouds.len() * OffsetEntry::BYTE_LENGTH;
    let body_length = |sub_cloud: &SubCloud| {
        SUB_CLOUD_COUNT_BYTE_LENGTH + sub_cloud.point_count() * PointRecord::BYTE_LENGTH
    };

    let mut body_order = (0..sub_clouds.len()).collect::<Vec<_>>();
    if reverse_bodies {
        body_order.reverse();
    }

    let mut offsets = vec![0_u64; sub_clouds.len()];
    let mut next_offset = header_length as u64;
    for idx in body_order.iter().copied() {
        offsets[idx] = next_offset;
        next_offset += body_length(&sub_clouds[idx]) as u64;
    }

    let mut bytes = Vec::with_capacity(next_offset as usize);
    bytes.write_u16::<LittleEndian>(version).unwrap();
    bytes.write_u32::<LittleEndian>(sub_clouds.len() as u32).unwrap();
    for offset in &offsets {
        bytes.write_u64::<LittleEndian>(BOGUS_TREE_OFFSET).unwrap();
        bytes.write_u64::<LittleEndian>(*offset).unwrap();
    }
    for idx in body_order {
        let sub_cloud = &sub_clouds[idx];
        bytes
            .write_u64::<LittleEndian>(sub_cloud.point_count() as u64)
            .unwrap();
        for record in sub_cloud.points() {
            write_point_record(&mut bytes, record).unwrap();
        }
    }
    bytes
}
