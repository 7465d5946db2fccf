use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    InvalidDimension(String),
    InvalidTopology(String),
    InvalidLearningRate(String),
    DimensionMismatch(String),
    ShapeMismatch(String),
    TopologyMismatch(String),
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDimension(msg) => write!(f, "invalid dimension: {msg}"),
            Error::InvalidTopology(msg) => write!(f, "invalid topology: {msg}"),
            Error::InvalidLearningRate(msg) => write!(f, "invalid learning rate: {msg}"),
            Error::DimensionMismatch(msg) => write!(f, "dimension mismatch: {msg}"),
            Error::ShapeMismatch(msg) => write!(f, "shape mismatch: {msg}"),
            Error::TopologyMismatch(msg) => write!(f, "topology mismatch: {msg}"),
            Error::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
