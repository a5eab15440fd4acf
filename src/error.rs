use thiserror::Error;

/// Errors produced while parsing an input file into an [`crate::model::Af`].
#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing header line (expected `p af N`)")]
    MissingHeader,
    #[error("malformed header line: {0:?}")]
    MalformedHeader(String),
    #[error("malformed attack line: {0:?}")]
    MalformedAttack(String),
    #[error("argument id {0} is out of range for an AF of size {1}")]
    ArgumentOutOfRange(usize, usize),
    #[error("missing `#` separator between argument and attack sections")]
    MissingSeparator,
    #[error("unknown argument name {0:?}")]
    UnknownArgument(String),
    #[error("failed to parse integer: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}

/// Errors in how the engine was asked to run, independent of any input file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown track {0:?}")]
    UnknownTrack(String),
    #[error("unknown format {0:?}")]
    UnknownFormat(String),
    #[error("track {0} requires a query argument (-a)")]
    MissingArgument(String),
    #[error("query argument {0:?} does not exist in this framework")]
    NoSuchArgument(String),
    #[error("the process back-end requires a SAT solver path (-sat)")]
    MissingSatPath,
    #[error("the embedded SAT back-end was not compiled into this binary (build with --features embedded)")]
    EmbeddedBackendUnavailable,
}

/// Errors surfaced by a [`crate::sat::SatBackend`].
#[derive(Error, Debug)]
pub enum SatError {
    #[error("failed to spawn external SAT solver at {0:?}: {1}")]
    Spawn(std::path::PathBuf, std::io::Error),
    #[error("failed to write DIMACS to external solver: {0}")]
    Write(std::io::Error),
    #[error("failed to read output of external solver: {0}")]
    Read(std::io::Error),
    #[error("external solver produced neither `s SATISFIABLE` nor `s UNSATISFIABLE`")]
    NoStatusLine,
    #[error("embedded solver reported an internal inconsistency")]
    Inconsistent,
}

/// Top-level error type unifying every failure mode the crate can produce.
#[derive(Error, Debug)]
pub enum DungError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sat(#[from] SatError),
}

pub type Result<T> = std::result::Result<T, DungError>;
