//! Domain models for the hockey roster.
//!
//! This module contains the filesystem-agnostic types: the linked
//! [`Sequence`] container, team records, the in-memory [`TeamDirectory`],
//! and configuration.

/// Singly linked, front-inserting sequence.
pub mod sequence;
pub use sequence::Sequence;

mod team;
pub use team::{Attacker, InvalidNameError, SEPARATOR, TeamName, TeamRecord, TeamView};

mod team_directory;
pub use team_directory::{EmptyDirectoryError, TeamDirectory};

mod config;
pub use config::{CONFIG_FILE, Config, MalformedPolicy};
