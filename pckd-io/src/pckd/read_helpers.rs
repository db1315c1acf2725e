use std::convert::TryFrom;
use std::io::{Read, Seek, SeekFrom};

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use log::debug;
use pckd_core::{
    containers::{PointRecord, SubCloud},
    nalgebra::Vector3,
};

use super::{
    map_read_err, ContainerHeader, DecodeError, OffsetEntry, SUB_CLOUD_COUNT_BYTE_LENGTH,
};

/// Returns the total length of the given stream in bytes. The stream position is left unchanged
pub fn stream_length<R: Seek>(reader: &mut R) -> std::io::Result<u64> {
    let current_position = reader.stream_position()?;
    let length = reader.seek(SeekFrom::End(0))?;
    if length != current_position {
        reader.seek(SeekFrom::Start(current_position))?;
    }
    Ok(length)
}

/// Fails with `TruncatedStream` unless `byte_count` bytes starting at `offset` lie within the stream. A
/// `byte_count` of `None` means the size computation overflowed
fn ensure_available(
    what: &'static str,
    offset: u64,
    byte_count: Option<u64>,
    stream_length: u64,
) -> Result<(), DecodeError> {
    match byte_count.and_then(|count| offset.checked_add(count)) {
        Some(end) if end <= stream_length => Ok(()),
        _ => Err(DecodeError::TruncatedStream { what, offset }),
    }
}

/// Reads the header of a PCKD container, starting at the current position of `reader`. Afterwards, `reader`
/// is positioned right behind the offset table.
///
/// The length of the stream is measured with [stream_length] first, which seeks to the end and back. Use
/// [read_header_within] if the length is already known, it only ever reads forward
pub fn read_header<R: Read + Seek>(reader: &mut R) -> Result<ContainerHeader, DecodeError> {
    let stream_length = stream_length(reader)?;
    read_header_within(reader, stream_length)
}

/// Like [read_header], for a stream whose total length in bytes is `stream_length`
pub fn read_header_within<R: Read + Seek>(
    reader: &mut R,
    stream_length: u64,
) -> Result<ContainerHeader, DecodeError> {
    let header_start = reader.stream_position()?;

    let version = reader
        .read_u16::<LittleEndian>()
        .map_err(map_read_err("header version", header_start))?;
    let sub_cloud_count = reader
        .read_u32::<LittleEndian>()
        .map_err(map_read_err("sub-cloud count", header_start + 2))?;

    let table_start = header_start + ContainerHeader::FIXED_BYTE_LENGTH as u64;
    let entry_length = OffsetEntry::BYTE_LENGTH as u64;
    // Check before allocating, a corrupt count would otherwise reserve a huge table
    ensure_available(
        "offset table",
        table_start,
        u64::from(sub_cloud_count).checked_mul(entry_length),
        stream_length,
    )?;

    let offsets = (0..u64::from(sub_cloud_count))
        .map(|index| {
            let entry_start = table_start + index * entry_length;
            let tree_offset = reader
                .read_u64::<LittleEndian>()
                .map_err(map_read_err("offset table entry", entry_start))?;
            let point_cloud_offset = reader
                .read_u64::<LittleEndian>()
                .map_err(map_read_err("offset table entry", entry_start + 8))?;
            Ok(OffsetEntry::new(tree_offset, point_cloud_offset))
        })
        .collect::<Result<Vec<_>, DecodeError>>()?;

    debug!(
        "Read PCKD header: version {}, {} sub-clouds",
        version, sub_cloud_count
    );
    Ok(ContainerHeader::new(version, offsets))
}

/// Seeks to the body of the sub-cloud described by `entry` and reads its point count. Fails if the stream is too
/// short to hold that many point records. Afterwards, `reader` is positioned at the first point record
pub(crate) fn read_point_count<R: Read + Seek>(
    reader: &mut R,
    entry: &OffsetEntry,
    stream_length: u64,
) -> Result<u64, DecodeError> {
    let body_start = entry.point_cloud_offset;
    reader.seek(SeekFrom::Start(body_start))?;
    let point_count = reader
        .read_u64::<LittleEndian>()
        .map_err(map_read_err("sub-cloud point count", body_start))?;

    ensure_available(
        "point records",
        body_start + SUB_CLOUD_COUNT_BYTE_LENGTH as u64,
        point_count.checked_mul(PointRecord::BYTE_LENGTH as u64),
        stream_length,
    )?;
    Ok(point_count)
}

/// Decodes a single encoded point record
pub fn decode_point_record(bytes: &[u8; PointRecord::BYTE_LENGTH]) -> PointRecord {
    let mut floats = [0.0_f32; 6];
    LittleEndian::read_f32_into(&bytes[..24], &mut floats);
    PointRecord::new(
        Vector3::new(floats[0], floats[1], floats[2]),
        Vector3::new(floats[3], floats[4], floats[5]),
        Vector3::new(bytes[24], bytes[25], bytes[26]),
    )
}

pub(crate) fn read_sub_cloud_within<R: Read + Seek>(
    reader: &mut R,
    entry: &OffsetEntry,
    stream_length: u64,
) -> Result<SubCloud, DecodeError> {
    let point_count = read_point_count(reader, entry, stream_length)?;
    let records_start = entry.point_cloud_offset + SUB_CLOUD_COUNT_BYTE_LENGTH as u64;
    let capacity = usize::try_from(point_count)
        .map_err(|_| DecodeError::TooManyPoints { total: point_count })?;

    let mut sub_cloud = SubCloud::with_capacity(capacity);
    let mut record = [0_u8; PointRecord::BYTE_LENGTH];
    for index in 0..point_count {
        reader.read_exact(&mut record).map_err(map_read_err(
            "point record",
            records_start + index * PointRecord::BYTE_LENGTH as u64,
        ))?;
        sub_cloud.push_point(decode_point_record(&record));
    }
    Ok(sub_cloud)
}

/// Reads the body of the sub-cloud described by `entry`. The body is located by an absolute seek, so the current
/// position of `reader` does not matter. The tree offset of `entry` is not used
pub fn read_sub_cloud<R: Read + Seek>(
    reader: &mut R,
    entry: &OffsetEntry,
) -> Result<SubCloud, DecodeError> {
    let stream_length = stream_length(reader)?;
    read_sub_cloud_within(reader, entry, stream_length)
}
