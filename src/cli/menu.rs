//! The interactive numbered menu
//!
//! Each command re-reads the roster file, and mutating commands write it back
//! before the next prompt. A failing command prints its error and the loop
//! carries on.

use std::io::{BufRead, Write};

use anyhow::Context;
use roster::{Attacker, RosterFile, Sequence, TeamName, TeamRecord};
use tracing::instrument;

const MAX_ATTACKERS: usize = 64;

const MENU: &str = "\
Menu:
  0 - exit
  1 - print the roster file
  2 - add a team
  3 - delete the most recently added team
  4 - search for a team by attacker last name
  5 - show the team with the most goals
";

/// Drives the menu over any line-oriented input and output.
pub struct Menu<R, W> {
    input: R,
    output: W,
    roster: RosterFile,
}

enum Flow {
    Continue,
    Exit,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub const fn new(input: R, output: W, roster: RosterFile) -> Self {
        Self {
            input,
            output,
            roster,
        }
    }

    /// Runs until the user picks `0` or the input ends.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            write!(self.output, "{MENU}Enter command: ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                return Ok(());
            };

            match self.dispatch(line.trim()) {
                Ok(Flow::Exit) => return Ok(()),
                Ok(Flow::Continue) => {}
                Err(error) => {
                    tracing::debug!("menu command failed: {error:#}");
                    writeln!(self.output, "error: {error:#}")?;
                }
            }
            writeln!(self.output)?;
        }
    }

    fn dispatch(&mut self, command: &str) -> anyhow::Result<Flow> {
        match command.parse::<i64>() {
            Ok(0) => return Ok(Flow::Exit),
            Ok(1) => self.print_file()?,
            Ok(2) => self.add_team()?,
            Ok(3) => self.delete_team()?,
            Ok(4) => self.search()?,
            Ok(5) => self.best()?,
            _ => writeln!(self.output, "unsupported command")?,
        }
        Ok(Flow::Continue)
    }

    #[instrument(level = "debug", skip(self))]
    fn print_file(&mut self) -> anyhow::Result<()> {
        let contents = self.roster.contents()?;
        self.output.write_all(contents.as_bytes())?;
        Ok(())
    }

    /// Collects every answer before validating any of them, so a rejected
    /// team never leaves unread answers behind for the command prompt.
    #[instrument(level = "debug", skip(self))]
    fn add_team(&mut self) -> anyhow::Result<()> {
        let count = self.attacker_count()?;
        let names = (1..=count)
            .map(|index| self.prompt(&format!("Attacker {index} last name: ")))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let team = self.prompt("Team name: ")?;
        let goals = self.prompt("Goals scored: ")?;

        let attackers = names
            .into_iter()
            .map(Attacker::new)
            .collect::<Result<Sequence<_>, _>>()?;
        let name = TeamName::new(&team)?;
        let goals: i64 = goals.parse().context("goals must be an integer")?;

        let mut directory = self.roster.load()?;
        directory.add(TeamRecord::new(attackers, name.clone(), goals));
        self.roster.save(&directory)?;

        writeln!(self.output, "Added team {name}")?;
        Ok(())
    }

    /// Asks for the attacker count until the answer is usable.
    fn attacker_count(&mut self) -> anyhow::Result<usize> {
        loop {
            match self.prompt("Number of attackers: ")?.parse::<usize>() {
                Ok(count) if count <= MAX_ATTACKERS => return Ok(count),
                Ok(_) => writeln!(
                    self.output,
                    "a team can have at most {MAX_ATTACKERS} attackers"
                )?,
                Err(_) => writeln!(
                    self.output,
                    "attacker count must be a non-negative integer"
                )?,
            }
        }
    }

    #[instrument(level = "debug", skip(self))]
    fn delete_team(&mut self) -> anyhow::Result<()> {
        let mut directory = self.roster.load()?;

        match directory.del() {
            Some(team) => {
                self.roster.save(&directory)?;
                writeln!(self.output, "Deleted team {}", team.name())?;
            }
            None => writeln!(self.output, "Roster is empty, nothing to delete")?,
        }
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn search(&mut self) -> anyhow::Result<()> {
        let last_name = self.prompt("Attacker last name: ")?;
        let directory = self.roster.load()?;

        match directory.search_by_last_name(&last_name) {
            Some(team) => writeln!(self.output, "Team {last_name}: {team}")?,
            None => writeln!(self.output, "not found")?,
        }
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn best(&mut self) -> anyhow::Result<()> {
        let directory = self.roster.load()?;

        match directory.most_scoring() {
            Ok(team) => writeln!(self.output, "Team with the best stats: {team}")?,
            Err(_) => writeln!(self.output, "not found")?,
        }
        Ok(())
    }

    /// Writes `question` and reads a trimmed answer.
    fn prompt(&mut self, question: &str) -> anyhow::Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        self.read_line()?
            .map(|line| line.trim().to_string())
            .context("unexpected end of input")
    }

    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let mut line = String::new();
        match self.input.read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }
}
