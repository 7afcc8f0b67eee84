use std::path::Path;

use clap::Parser;
use roster::{Attacker, TeamDirectory, TeamRecord, domain::TeamView};
use tracing::instrument;

use super::terminal::{Colorize, is_narrow};

#[derive(Debug, Parser, Default)]
#[command(about = "List every team in the roster")]
pub struct List {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl List {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let directory = super::open_roster(root).load()?;

        match self.output {
            OutputFormat::Json => println!("{}", render_json(&directory)?),
            OutputFormat::Table => {
                if directory.is_empty() {
                    println!("No teams yet. Add one with 'roster add'.");
                    return Ok(());
                }
                for line in render_table(&directory, is_narrow()) {
                    println!("{line}");
                }
            }
        }

        Ok(())
    }
}

fn render_json(directory: &TeamDirectory) -> serde_json::Result<String> {
    let teams: Vec<TeamView<'_>> = directory.iter().map(TeamView::from).collect();
    serde_json::to_string_pretty(&teams)
}

/// Width of the name column, in characters rather than bytes so that padding
/// lines up for accented names.
fn name_width(directory: &TeamDirectory) -> usize {
    directory
        .iter()
        .map(|team| team.name().as_str().chars().count())
        .max()
        .unwrap_or(0)
}

fn render_table(directory: &TeamDirectory, narrow: bool) -> Vec<String> {
    let width = name_width(directory);

    directory
        .iter()
        .map(|team| {
            if narrow {
                format!("{} {}", team.name().as_str().highlight(), team.goals())
            } else {
                let padded = format!("{:<width$}", team.name().as_str());
                format!(
                    "{}  {:>4}  {}",
                    padded.highlight(),
                    team.goals(),
                    attacker_list(team).dim()
                )
            }
        })
        .collect()
}

fn attacker_list(team: &TeamRecord) -> String {
    if team.attackers().is_empty() {
        return "(no attackers)".to_string();
    }
    team.attackers()
        .iter()
        .map(Attacker::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
