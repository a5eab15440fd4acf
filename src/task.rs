//! Track identifiers, run options, and the witness type shared by every task.

use std::fmt;
use std::path::PathBuf;

use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Semantics {
    Grounded,
    Complete,
    Preferred,
    Stable,
    SemiStable,
    Stage,
    Ideal,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Problem {
    /// Single extension.
    Se,
    /// Enumerate all extensions (grounded only has one; used for `EE-GR`).
    Ee,
    /// Credulous acceptance.
    Dc,
    /// Skeptical acceptance.
    Ds,
    /// Count extensions.
    Ce,
    /// Enumerate skeptically-accepted arguments.
    Ea,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Track {
    pub problem: Problem,
    pub semantics: Semantics,
}

impl Track {
    pub const fn new(problem: Problem, semantics: Semantics) -> Self {
        Track { problem, semantics }
    }

    pub fn requires_argument(&self) -> bool {
        matches!(self.problem, Problem::Dc | Problem::Ds)
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = match self.problem {
            Problem::Se => "SE",
            Problem::Ee => "EE",
            Problem::Dc => "DC",
            Problem::Ds => "DS",
            Problem::Ce => "CE",
            Problem::Ea => "EA",
        };
        let s = match self.semantics {
            Semantics::Grounded => "GR",
            Semantics::Complete => "CO",
            Semantics::Preferred => "PR",
            Semantics::Stable => "ST",
            Semantics::SemiStable => "SST",
            Semantics::Stage => "STG",
            Semantics::Ideal => "ID",
        };
        write!(f, "{}-{}", p, s)
    }
}

/// Every track this engine advertises via `--problems`.
pub const ALL_TRACKS: &[Track] = &[
    Track::new(Problem::Se, Semantics::Grounded),
    Track::new(Problem::Ee, Semantics::Grounded),
    Track::new(Problem::Dc, Semantics::Grounded),
    Track::new(Problem::Ds, Semantics::Grounded),
    Track::new(Problem::Se, Semantics::Complete),
    Track::new(Problem::Ds, Semantics::Complete),
    Track::new(Problem::Dc, Semantics::Complete),
    Track::new(Problem::Se, Semantics::Preferred),
    Track::new(Problem::Dc, Semantics::Preferred),
    Track::new(Problem::Ds, Semantics::Preferred),
    Track::new(Problem::Se, Semantics::Stable),
    Track::new(Problem::Dc, Semantics::Stable),
    Track::new(Problem::Ds, Semantics::Stable),
    Track::new(Problem::Se, Semantics::Ideal),
    Track::new(Problem::Dc, Semantics::Ideal),
    Track::new(Problem::Ds, Semantics::Ideal),
    Track::new(Problem::Se, Semantics::SemiStable),
    Track::new(Problem::Dc, Semantics::SemiStable),
    Track::new(Problem::Ds, Semantics::SemiStable),
    Track::new(Problem::Se, Semantics::Stage),
    Track::new(Problem::Dc, Semantics::Stage),
    Track::new(Problem::Ds, Semantics::Stage),
    Track::new(Problem::Ce, Semantics::Complete),
    Track::new(Problem::Ce, Semantics::Stable),
    Track::new(Problem::Ce, Semantics::Preferred),
    Track::new(Problem::Ea, Semantics::Preferred),
];

pub fn parse_track(s: &str) -> Result<Track, ConfigError> {
    for t in ALL_TRACKS {
        if t.to_string() == s {
            return Ok(*t);
        }
    }
    Err(ConfigError::UnknownTrack(s.to_string()))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Format {
    I23,
    Tgf,
}

pub fn parse_format(s: &str) -> Result<Format, ConfigError> {
    match s {
        "i23" => Ok(Format::I23),
        "tgf" => Ok(Format::Tgf),
        other => Err(ConfigError::UnknownFormat(other.to_string())),
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Backend {
    Embedded,
    Process,
}

/// Immutable knobs threaded by reference into every task function.
#[derive(Clone, Debug)]
pub struct RunOptions {
    pub witness: bool,
    pub backend: Backend,
    pub sat_path: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            witness: false,
            backend: Backend::Embedded,
            sat_path: None,
        }
    }
}

/// Either a yes/no decision or an extension (a list of argument ids).
#[derive(Clone, Debug)]
pub enum Answer {
    Yes(Option<Vec<usize>>),
    No(Option<Vec<usize>>),
    Extension(Option<Vec<usize>>),
    Count(usize),
}
