#![warn(clippy::all)]

//! Core data structures for PCKD point cloud containers
//!
//! A PCKD container stores several independent sub-clouds. This crate holds the in-memory side of things: the
//! decoded [SubCloud](crate::containers::SubCloud)s, the [GeometryAccumulator](crate::containers::GeometryAccumulator)
//! that merges them, and the resulting [MergedGeometryBuffer](crate::containers::MergedGeometryBuffer) with one
//! [Partition](crate::containers::Partition) per sub-cloud. Reading the binary format lives in `pckd-io`.

pub extern crate nalgebra;

/// Decoded sub-clouds and the merged geometry buffer
pub mod containers;
/// Useful mathematical tools when working with point cloud data
pub mod math;
/// Data structures for handling point cloud metadata
pub mod meta;
