use std::{fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;
use serde::Serialize;

use crate::domain::Sequence;

/// The token separating attackers from the team name in a stored record.
pub const SEPARATOR: &str = "|";

/// A validated attacker name.
///
/// Attacker names are single tokens: non-empty, free of whitespace, and never
/// equal to the reserved [`SEPARATOR`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct Attacker(NonEmptyString);

impl Attacker {
    /// Creates a new `Attacker` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidNameError`] if the name is empty, contains whitespace,
    /// or is the reserved separator token.
    pub fn new(name: String) -> Result<Self, InvalidNameError> {
        if name.chars().any(char::is_whitespace) {
            return Err(InvalidNameError::Whitespace(name));
        }
        if name == SEPARATOR {
            return Err(InvalidNameError::Reserved);
        }
        NonEmptyString::new(name)
            .map(Self)
            .map_err(|_| InvalidNameError::Empty)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for Attacker {
    type Err = InvalidNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<&str> for Attacker {
    type Error = InvalidNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl Deref for Attacker {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for Attacker {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Attacker> for String {
    fn from(attacker: Attacker) -> Self {
        attacker.0.into_inner()
    }
}

/// A validated team name.
///
/// A team name is one or more whitespace-separated words, none of which is
/// the reserved [`SEPARATOR`]. Runs of whitespace are collapsed to a single
/// space, so `" Arizona   Coyotes "` is stored as `"Arizona Coyotes"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct TeamName(NonEmptyString);

impl TeamName {
    /// Creates a new `TeamName`, normalizing its whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidNameError`] if the name has no words or if any word is
    /// the reserved separator token.
    pub fn new(name: &str) -> Result<Self, InvalidNameError> {
        let words: Vec<&str> = name.split_whitespace().collect();
        if words.contains(&SEPARATOR) {
            return Err(InvalidNameError::Reserved);
        }
        NonEmptyString::new(words.join(" "))
            .map(Self)
            .map_err(|_| InvalidNameError::Empty)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for TeamName {
    type Err = InvalidNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Deref for TeamName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<TeamName> for String {
    fn from(name: TeamName) -> Self {
        name.0.into_inner()
    }
}

/// Error returned when an attacker or team name cannot be stored.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidNameError {
    /// The name was empty or only whitespace.
    #[error("name must not be empty")]
    Empty,
    /// An attacker name contained whitespace.
    #[error("attacker name '{0}' must be a single word")]
    Whitespace(String),
    /// The name used the reserved separator token.
    #[error("'|' is reserved and cannot be used as a name")]
    Reserved,
}

/// A hockey team: its attackers, its name, and the goals it has scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRecord {
    attackers: Sequence<Attacker>,
    name: TeamName,
    goals: i64,
}

impl TeamRecord {
    /// Creates a team record.
    #[must_use]
    pub const fn new(attackers: Sequence<Attacker>, name: TeamName, goals: i64) -> Self {
        Self {
            attackers,
            name,
            goals,
        }
    }

    /// The team's attackers, front to back.
    #[must_use]
    pub const fn attackers(&self) -> &Sequence<Attacker> {
        &self.attackers
    }

    /// The team's name.
    #[must_use]
    pub const fn name(&self) -> &TeamName {
        &self.name
    }

    /// The number of goals scored by the team.
    #[must_use]
    pub const fn goals(&self) -> i64 {
        self.goals
    }

    /// Returns `true` if an attacker is named exactly `last_name`.
    ///
    /// The comparison is case-sensitive.
    #[must_use]
    pub fn has_attacker(&self, last_name: &str) -> bool {
        self.attackers
            .iter()
            .any(|attacker| attacker.as_str() == last_name)
    }
}

impl fmt::Display for TeamRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({} goals)", self.name, self.goals)?;
        if !self.attackers.is_empty() {
            let names: Vec<&str> = self.attackers.iter().map(Attacker::as_str).collect();
            write!(f, ": {}", names.join(", "))?;
        }
        Ok(())
    }
}

/// Serializable projection of a [`TeamRecord`], used for JSON output.
#[derive(Debug, Serialize)]
pub struct TeamView<'a> {
    /// The team name.
    pub name: &'a TeamName,
    /// Goals scored.
    pub goals: i64,
    /// Attackers, front to back.
    pub attackers: Vec<&'a Attacker>,
}

impl<'a> From<&'a TeamRecord> for TeamView<'a> {
    fn from(team: &'a TeamRecord) -> Self {
        Self {
            name: &team.name,
            goals: team.goals,
            attackers: team.attackers.iter().collect(),
        }
    }
}
