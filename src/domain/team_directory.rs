//! In-memory roster of hockey teams
//!
//! The [`TeamDirectory`] knows nothing about the filesystem. It holds teams in
//! a [`Sequence`], most recently added first, and answers the roster queries
//! with linear scans.

use thiserror::Error;
use tracing::instrument;

use crate::domain::{Sequence, TeamRecord};

/// Error returned when a query needs at least one team but the roster is
/// empty.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("the team directory is empty")]
pub struct EmptyDirectoryError;

/// An ordered roster of teams.
///
/// Teams are kept in reverse chronological order: the most recently added
/// team is at the front. Duplicate team names are allowed and never merged.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TeamDirectory {
    teams: Sequence<TeamRecord>,
}

impl TeamDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            teams: Sequence::new(),
        }
    }

    /// Returns the number of teams.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.teams.len()
    }

    /// Returns `true` if there are no teams.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Iterates over the teams, most recently added first.
    pub fn iter(&self) -> impl Iterator<Item = &TeamRecord> + '_ {
        self.teams.iter()
    }

    /// Borrows the underlying sequence of teams.
    #[must_use]
    pub const fn teams(&self) -> &Sequence<TeamRecord> {
        &self.teams
    }

    /// Adds a team at the front of the roster.
    pub fn add(&mut self, team: TeamRecord) {
        tracing::debug!(team = %team.name(), "adding team");
        self.teams.push_front(team);
    }

    /// Removes the most recently added team and returns it.
    ///
    /// This never targets a chosen team: it always drops the front of the
    /// roster. Returns `None` if the roster was already empty.
    pub fn del(&mut self) -> Option<TeamRecord> {
        let removed = self.teams.pop_front();
        if let Some(team) = &removed {
            tracing::debug!(team = %team.name(), "removed team");
        }
        removed
    }

    /// Finds the first team with an attacker named exactly `last_name`.
    ///
    /// Teams are scanned front to back and each team's attackers in their own
    /// order, so the most recently added matching team wins. Returns `None`
    /// when no attacker matches.
    #[instrument(level = "trace", skip(self))]
    #[must_use]
    pub fn search_by_last_name(&self, last_name: &str) -> Option<&TeamRecord> {
        self.teams.iter().find(|team| team.has_attacker(last_name))
    }

    /// Returns the team with the most goals.
    ///
    /// Ties go to the team scanned first (the most recently added one); a later
    /// team replaces the current best only with strictly more goals.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyDirectoryError`] if there are no teams.
    #[instrument(level = "trace", skip(self))]
    pub fn most_scoring(&self) -> Result<&TeamRecord, EmptyDirectoryError> {
        let mut teams = self.teams.iter();
        let first = teams.next().ok_or(EmptyDirectoryError)?;

        Ok(teams.fold(first, |best, team| {
            if team.goals() > best.goals() {
                team
            } else {
                best
            }
        }))
    }
}

impl From<Sequence<TeamRecord>> for TeamDirectory {
    fn from(teams: Sequence<TeamRecord>) -> Self {
        Self { teams }
    }
}

/// Collects teams in iteration order: the first team yielded becomes the
/// front of the roster.
impl FromIterator<TeamRecord> for TeamDirectory {
    fn from_iter<I: IntoIterator<Item = TeamRecord>>(iter: I) -> Self {
        Self {
            teams: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TeamDirectory {
    type Item = &'a TeamRecord;
    type IntoIter = crate::domain::sequence::Iter<'a, TeamRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.teams.iter()
    }
}
