use anyhow::{Context, Result};
use log::error;
use pckd_core::containers::MergedGeometryBuffer;
use std::path::Path;

mod reader;
pub use self::reader::*;

mod io_factory;
pub use self::io_factory::*;

/// Imports the point cloud container at `path` into a [MergedGeometryBuffer]. The buffer is named after the file
/// stem of `path`.
///
/// The file is closed before this function returns, on success as well as on failure. On failure, the error is
/// logged as `Failed importing <path>: <reason>` and returned with the same context. Nothing of the file is
/// returned in that case.
pub fn import_file<P: AsRef<Path>>(path: P) -> Result<MergedGeometryBuffer> {
    let path = path.as_ref();
    let result = read_geometry_from_file(path)
        .with_context(|| format!("Failed importing {}", path.display()));
    if let Err(why) = &result {
        error!("{:#}", why);
    }
    result
}

/// Name that [import_file] gives to the buffer decoded from `path`: the file stem, or an empty string if there is none
pub fn geometry_name_for_path<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn read_geometry_from_file(path: &Path) -> Result<MergedGeometryBuffer> {
    let mut reader = open_file(path)?;
    reader.read_geometry(&geometry_name_for_path(path))
}
