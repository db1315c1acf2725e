use std::{fs::File, io::BufReader, path::Path};

use anyhow::{anyhow, bail, Context, Result};

use crate::pckd::PckdReader;

#[derive(Debug)]
enum SupportedFileExtensions {
    Pckd,
}

/// Returns a lookup value for the file extension of the given file path
fn get_extension_lookup(path: &Path) -> Result<Option<SupportedFileExtensions>> {
    let extension = match path.extension() {
        Some(ex) => ex,
        None => return Ok(None),
    };
    let extension_str = extension.to_str().ok_or_else(|| {
        anyhow!(
            "File extension of path {} is no valid Unicode string",
            path.display()
        )
    })?;
    match extension_str.to_lowercase().as_str() {
        "pckd" => Ok(Some(SupportedFileExtensions::Pckd)),
        _ => Ok(None),
    }
}

/// Checks whether the given `path` has a file extension that can be read by [open_file]. `Err` is returned only if
/// the extension of `path` is no valid Unicode
pub fn is_supported_file<P: AsRef<Path>>(path: P) -> Result<bool> {
    Ok(get_extension_lookup(path.as_ref())?.is_some())
}

/// Opens the point cloud container at `path` with the reader matching its file extension
pub fn open_file<P: AsRef<Path>>(path: P) -> Result<PckdReader<BufReader<File>>> {
    let path = path.as_ref();
    match get_extension_lookup(path)? {
        Some(SupportedFileExtensions::Pckd) => PckdReader::from_path(path)
            .with_context(|| format!("Could not open PCKD file {}", path.display())),
        None => bail!("Unsupported file format of file {}", path.display()),
    }
}
