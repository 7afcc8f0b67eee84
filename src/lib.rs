//! Plain-text Hockey Roster
//!
//! Teams are stored one per line in a flat text file and queried with linear
//! scans over an in-memory roster.

pub mod domain;
pub use domain::{
    Attacker, Config, EmptyDirectoryError, MalformedPolicy, Sequence, TeamDirectory, TeamName,
    TeamRecord,
};

/// Text codec and file storage for the roster.
pub mod storage;
pub use storage::{FormatError, LoadError, RosterFile};
