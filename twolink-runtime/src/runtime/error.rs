use std::{error, fmt, io};

use crate::core::InvalidLinkLength;

#[derive(Debug)]
pub enum Error {
    /// Input or configuration file could not be read.
    Io(io::Error),
    /// Static configuration is invalid.
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Config(e) => write!(f, "configuration error: {}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Config(_) => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Error::Io(value)
    }
}

impl From<InvalidLinkLength> for Error {
    fn from(value: InvalidLinkLength) -> Self {
        Error::Config(value.to_string())
    }
}
