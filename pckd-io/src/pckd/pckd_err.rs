use thiserror::Error;

/// Errors that can occur while decoding a PCKD container
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The stream ended before `what` could be read completely. `offset` is the absolute byte offset at which
    /// `what` starts
    #[error("Stream ended while reading {what} at byte offset {offset}")]
    TruncatedStream { what: &'static str, offset: u64 },

    /// The merged point count does not fit into 32-bit vertex indices
    #[error("Container holds {total} points, which exceeds the 32-bit index range")]
    TooManyPoints { total: u64 },

    /// A sub-cloud was requested that the header does not describe
    #[error("Sub-cloud index {index} is out of range, container has {count} sub-clouds")]
    SubCloudIndexOutOfRange { index: usize, count: usize },

    /// [std::io::Error]
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// Is this a truncation error?
    pub fn is_truncation(&self) -> bool {
        matches!(self, DecodeError::TruncatedStream { .. })
    }
}

/// Maps an `UnexpectedEof` from reading `what` at `offset` to [DecodeError::TruncatedStream], all other IO errors
/// to [DecodeError::Io]
pub(crate) fn map_read_err(what: &'static str, offset: u64) -> impl FnOnce(std::io::Error) -> DecodeError {
    move |err| match err.kind() {
        std::io::ErrorKind::UnexpectedEof => DecodeError::TruncatedStream { what, offset },
        _ => DecodeError::Io(err),
    }
}
