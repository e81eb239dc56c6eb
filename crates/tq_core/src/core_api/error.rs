use thiserror::Error;

/// Fatal failures at the facade boundary.
///
/// `Io` covers open/read/write failures; `Format` covers everything that
/// makes a file unparseable (tag mismatch, malformed length-prefixed string,
/// region never located). Advisory conditions such as a failed diagnostic
/// listing are reported, not raised through this type.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid save data: {0}")]
    Format(String),
}
