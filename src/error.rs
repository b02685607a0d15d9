#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Any I/O failure other than the file being absent.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Input was not UTF-8 and [`Encoding::Utf8`](crate::Encoding::Utf8) was requested.
    #[error("invalid UTF-8 input: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),
}

impl Error {
    /// The wrapped I/O error, if this is one.
    pub fn as_io(&self) -> Option<&std::io::Error> {
        match self {
            Self::Io(err) => Some(err),
            Self::InvalidEncoding(_) => None,
        }
    }
}
