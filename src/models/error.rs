use std::fmt;

#[derive(Debug)]
pub enum Error {
    ConfigError(String),
    ParserError(String),
    RecordDecodeError(String),
    OrderingError(String),
    OutputWriteError(String),
    IoError(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConfigError(msg) => write!(f, "Config Error: {}", msg),
            Error::ParserError(msg) => write!(f, "Parser Error: {}", msg),
            Error::RecordDecodeError(msg) => write!(f, "Record Decode Error: {}", msg),
            Error::OrderingError(msg) => write!(f, "Ordering Error: {}", msg),
            Error::OutputWriteError(msg) => write!(f, "Output Write Error: {}", msg),
            Error::IoError(err) => write!(f, "IO Error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::IoError(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Error {
        Error::ParserError(err.to_string())
    }
}
