use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

mod list;
mod menu;
mod terminal;

use clap::ArgAction;
use list::List;
use menu::Menu;
use roster::{Attacker, Config, RosterFile, TeamName, TeamRecord};
use terminal::Colorize;
use tracing::instrument;

/// Opens the roster described by the configuration in `root`.
fn open_roster(root: &Path) -> RosterFile {
    let config = Config::load_or_default(root);
    RosterFile::from_config(root, &config)
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The directory holding the roster and its `roster.toml`
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command.unwrap_or(Command::Menu).run(&self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // The menu owns stdout, so logs go to stderr.
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Run the interactive numbered menu (default)
    Menu,

    /// Print the raw contents of the roster file
    Show,

    /// Add a team to the front of the roster
    Add(Add),

    /// Delete the most recently added team
    ///
    /// This always removes the newest team; it never asks which one.
    Delete,

    /// Find the most recently added team with the given attacker
    Search(Search),

    /// Show the team that scored the most goals
    Best,

    /// List every team, most recently added first
    List(List),
}

impl Command {
    fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::Menu => Self::menu(root)?,
            Self::Show => Self::show(root)?,
            Self::Add(command) => command.run(root)?,
            Self::Delete => Self::delete(root)?,
            Self::Search(command) => command.run(root)?,
            Self::Best => Self::best(root)?,
            Self::List(command) => command.run(root)?,
        }
        Ok(())
    }

    #[instrument]
    fn menu(root: &Path) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        Menu::new(stdin.lock(), stdout.lock(), open_roster(root)).run()
    }

    #[instrument]
    fn show(root: &Path) -> anyhow::Result<()> {
        let contents = open_roster(root).contents()?;
        let mut stdout = io::stdout().lock();
        stdout.write_all(contents.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    #[instrument]
    fn delete(root: &Path) -> anyhow::Result<()> {
        let roster = open_roster(root);
        let mut directory = roster.load()?;

        let Some(team) = directory.del() else {
            println!("{}", "Roster is empty, nothing to delete".dim());
            return Ok(());
        };
        roster.save(&directory)?;

        println!("{}", format!("✅ Deleted team {}", team.name()).success());
        Ok(())
    }

    #[instrument]
    fn best(root: &Path) -> anyhow::Result<()> {
        let directory = open_roster(root).load()?;

        match directory.most_scoring() {
            Ok(team) => println!("Team with the best stats: {team}"),
            Err(_) => println!("{}", "not found".warning()),
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Add {
    /// Last name of an attacker (repeat for each attacker)
    #[arg(long = "attacker", short, value_name = "NAME")]
    attackers: Vec<Attacker>,

    /// The team name (quote names containing spaces)
    team: TeamName,

    /// The number of goals the team scored
    #[arg(allow_negative_numbers = true)]
    goals: i64,
}

impl Add {
    #[instrument]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let roster = open_roster(root);
        let mut directory = roster.load()?;

        let name = self.team.clone();
        directory.add(TeamRecord::new(
            self.attackers.into_iter().collect(),
            self.team,
            self.goals,
        ));
        roster.save(&directory)?;

        println!("{}", format!("✅ Added team {name}").success());
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Search {
    /// The attacker's last name (exact, case-sensitive)
    last_name: String,
}

impl Search {
    #[instrument]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let directory = open_roster(root).load()?;

        let Some(team) = directory.search_by_last_name(&self.last_name) else {
            println!("{}", "not found".warning());
            return Ok(());
        };

        println!("Team {}: {team}", self.last_name);
        Ok(())
    }
}
