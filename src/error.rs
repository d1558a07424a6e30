use std::error;
use std::fmt;
use std::io;
use std::result;

/// Errors raised outside the tree operations themselves. A missing key is never an error; it is
/// reported as `false` or `None` by the operation that looked for it.
#[derive(Debug)]
pub enum Error {
    IOError(io::Error),
    InvalidPriorityRange { low: u64, high: u64 },
    InvalidCommand(String),
    InvalidKey(String),
}

pub type Result<T> = result::Result<T, Error>;

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::IOError(err)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::IOError(error) => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::IOError(error) => write!(f, "{}", error),
            Error::InvalidPriorityRange { low, high } => {
                write!(f, "invalid priority range: {} is greater than {}", low, high)
            },
            Error::InvalidCommand(command) => write!(f, "invalid command: {:?}", command),
            Error::InvalidKey(key) => write!(f, "invalid key: {:?} is not a single character", key),
        }
    }
}
