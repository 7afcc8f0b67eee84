//! Line-oriented text format for the roster.
//!
//! Each team is one line:
//!
//! ```text
//! <attacker> <attacker> ... | <team name> <goals>
//! ```
//!
//! Tokens before the reserved `|` are attackers. After it, the last token is
//! the goal count and everything in between is the team name.

use std::{
    io::{self, BufRead, Write},
    num::ParseIntError,
};

use crate::domain::{
    Attacker, InvalidNameError, MalformedPolicy, SEPARATOR, Sequence, TeamDirectory, TeamName,
    TeamRecord,
};

/// A record that could not be parsed.
///
/// Every variant carries the 1-based line number of the record.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormatError {
    /// The line has no `|` separating attackers from the team.
    #[error("line {line}: missing '|' separator")]
    MissingSeparator {
        /// Line number of the record.
        line: usize,
    },
    /// The separator is not followed by both a team name and a goal count.
    #[error("line {line}: expected a team name and a goal count after '|'")]
    Incomplete {
        /// Line number of the record.
        line: usize,
    },
    /// The goal count is not an integer.
    #[error("line {line}: invalid goal count '{value}'")]
    InvalidGoals {
        /// Line number of the record.
        line: usize,
        /// The offending token.
        value: String,
        /// Why the token was rejected.
        #[source]
        source: ParseIntError,
    },
    /// The team name or an attacker name is not acceptable.
    #[error("line {line}: {source}")]
    InvalidName {
        /// Line number of the record.
        line: usize,
        /// Why the name was rejected.
        #[source]
        source: InvalidNameError,
    },
}

/// Errors that can occur when loading a roster.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A record could not be parsed.
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Writes a single team as one line.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_record<W: Write>(team: &TeamRecord, writer: &mut W) -> io::Result<()> {
    for attacker in team.attackers() {
        write!(writer, "{attacker} ")?;
    }
    writeln!(writer, "{SEPARATOR} {} {}", team.name(), team.goals())
}

/// Writes every team, front to back, one line each.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_directory<W: Write>(directory: &TeamDirectory, writer: &mut W) -> io::Result<()> {
    directory
        .iter()
        .try_for_each(|team| write_record(team, writer))
}

/// Parses one line of the roster file.
///
/// Returns `Ok(None)` for a blank line.
///
/// # Errors
///
/// Returns a [`FormatError`] if the line is not a valid record.
pub fn parse_record(line_number: usize, line: &str) -> Result<Option<TeamRecord>, FormatError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(None);
    }

    let separator = tokens
        .iter()
        .position(|token| *token == SEPARATOR)
        .ok_or(FormatError::MissingSeparator { line: line_number })?;
    let (attackers, rest) = (&tokens[..separator], &tokens[separator + 1..]);

    let Some((goals, name)) = rest.split_last() else {
        return Err(FormatError::Incomplete { line: line_number });
    };
    if name.is_empty() {
        return Err(FormatError::Incomplete { line: line_number });
    }

    let invalid_name = |source| FormatError::InvalidName {
        line: line_number,
        source,
    };

    let goals = goals
        .parse::<i64>()
        .map_err(|source| FormatError::InvalidGoals {
            line: line_number,
            value: (*goals).to_string(),
            source,
        })?;
    let name = TeamName::new(&name.join(" ")).map_err(invalid_name)?;
    let attackers = attackers
        .iter()
        .map(|token| Attacker::try_from(*token))
        .collect::<Result<Sequence<_>, _>>()
        .map_err(invalid_name)?;

    Ok(Some(TeamRecord::new(attackers, name, goals)))
}

/// Reads a roster, preserving the order of the records.
///
/// The first record becomes the front of the directory, and each team's
/// attackers keep the order in which they are written.
///
/// # Errors
///
/// Returns an error if reading fails, or if a record is malformed and the
/// policy is [`MalformedPolicy::Abort`].
pub fn read_directory<R: BufRead>(
    reader: R,
    policy: MalformedPolicy,
) -> Result<TeamDirectory, LoadError> {
    let mut teams = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        match parse_record(index + 1, &line) {
            Ok(Some(team)) => teams.push(team),
            Ok(None) => {}
            Err(error) => match policy {
                MalformedPolicy::Abort => return Err(error.into()),
                MalformedPolicy::Skip => tracing::warn!("Skipping malformed record: {error}"),
            },
        }
    }

    Ok(teams.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn team(attackers: &[&str], name: &str, goals: i64) -> TeamRecord {
        let attackers = attackers
            .iter()
            .map(|attacker| Attacker::try_from(*attacker).unwrap())
            .collect();
        TeamRecord::new(attackers, TeamName::new(name).unwrap(), goals)
    }

    fn attacker_names(team: &TeamRecord) -> Vec<&str> {
        team.attackers().iter().map(Attacker::as_str).collect()
    }

    #[test]
    fn parses_record_with_multi_word_team_name() {
        let directory = read_directory(
            Cursor::new("Gibson Martin | Arizona Coyotes 5\n"),
            MalformedPolicy::Abort,
        )
        .unwrap();

        assert_eq!(directory.len(), 1);
        let team = directory.iter().next().unwrap();
        assert_eq!(attacker_names(team), ["Gibson", "Martin"]);
        assert_eq!(team.name().as_str(), "Arizona Coyotes");
        assert_eq!(team.goals(), 5);
    }

    #[test]
    fn parses_single_word_team_name() {
        let team = parse_record(1, "Williams Peters | Ducks 3").unwrap().unwrap();
        assert_eq!(team.name().as_str(), "Ducks");
        assert_eq!(attacker_names(&team), ["Williams", "Peters"]);
    }

    #[test]
    fn parses_team_without_attackers() {
        let team = parse_record(1, "| Boston Bruins -2").unwrap().unwrap();
        assert!(team.attackers().is_empty());
        assert_eq!(team.goals(), -2);
    }

    #[test]
    fn blank_line_is_not_a_record() {
        assert_eq!(parse_record(1, "   \t "), Ok(None));
    }

    #[test]
    fn missing_separator_is_rejected() {
        assert_eq!(
            parse_record(4, "Gibson Martin Coyotes 5"),
            Err(FormatError::MissingSeparator { line: 4 })
        );
    }

    #[test]
    fn missing_name_or_goals_is_rejected() {
        assert_eq!(
            parse_record(2, "Gibson |"),
            Err(FormatError::Incomplete { line: 2 })
        );
        assert_eq!(
            parse_record(3, "Gibson | 5"),
            Err(FormatError::Incomplete { line: 3 })
        );
    }

    #[test]
    fn non_integer_goals_are_rejected() {
        let error = parse_record(7, "Gibson | Arizona Coyotes five").unwrap_err();
        assert!(matches!(
            error,
            FormatError::InvalidGoals { line: 7, ref value, .. } if value == "five"
        ));
    }

    #[test]
    fn second_separator_in_team_name_is_rejected() {
        let error = parse_record(1, "Gibson | Arizona | Coyotes 5").unwrap_err();
        assert_eq!(
            error,
            FormatError::InvalidName {
                line: 1,
                source: InvalidNameError::Reserved,
            }
        );
    }

    #[test]
    fn abort_policy_fails_the_load() {
        let input = "A | Ducks 3\nB | Coyotes x\n";
        let result = read_directory(Cursor::new(input), MalformedPolicy::Abort);

        assert!(matches!(
            result,
            Err(LoadError::Format(FormatError::InvalidGoals { line: 2, .. }))
        ));
    }

    #[test]
    fn skip_policy_drops_only_the_bad_record() {
        let input = "A | Ducks 3\nB | Coyotes x\n\nC | Bruins 1\n";
        let directory = read_directory(Cursor::new(input), MalformedPolicy::Skip).unwrap();

        let names: Vec<_> = directory.iter().map(|t| t.name().as_str()).collect();
        assert_eq!(names, ["Ducks", "Bruins"]);
    }

    #[test]
    fn writes_documented_layout() {
        let mut directory = TeamDirectory::new();
        directory.add(team(&[], "Boston Bruins", 0));
        directory.add(team(&["Gibson", "Martin"], "Arizona Coyotes", 5));

        let mut bytes = Vec::new();
        write_directory(&directory, &mut bytes).unwrap();

        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "Gibson Martin | Arizona Coyotes 5\n| Boston Bruins 0\n"
        );
    }

    #[test]
    fn write_then_read_preserves_teams_and_order() {
        let mut directory = TeamDirectory::new();
        directory.add(team(&["Williams", "Peters"], "Anaheim Ducks", 3));
        directory.add(team(&["Gibson", "Martin"], "Arizona Coyotes", 5));
        directory.add(team(&[], "Ducks", 3));

        let mut bytes = Vec::new();
        write_directory(&directory, &mut bytes).unwrap();
        let reloaded = read_directory(Cursor::new(bytes), MalformedPolicy::Abort).unwrap();

        assert_eq!(reloaded, directory);
    }

    #[test]
    fn empty_input_is_an_empty_directory() {
        let directory = read_directory(Cursor::new(""), MalformedPolicy::Abort).unwrap();
        assert!(directory.is_empty());
    }
}
