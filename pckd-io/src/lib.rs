#![warn(clippy::all)]

//! Reading support for PCKD point cloud containers
//!
//! A PCKD file starts with a small header holding a format version and an offset table with one entry per
//! sub-cloud. Each entry points to the body of a sub-cloud somewhere in the file, so reading requires a
//! seekable stream. The [pckd] module contains the format reader, [base] contains format-independent entry
//! points such as [import_file](base::import_file).

/// Format-independent reading API
pub mod base;
/// The PCKD binary format
pub mod pckd;
