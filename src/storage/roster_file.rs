//! A roster stored in a single text file
//!
//! Every operation re-reads the whole file. Writes go to a temporary file in
//! the same directory which is then renamed over the target, so a reader
//! never observes a half-written roster.

use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::instrument;

use crate::{
    domain::{Config, MalformedPolicy, TeamDirectory},
    storage::text::{self, LoadError},
};

/// A filesystem backed roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterFile {
    path: PathBuf,
    policy: MalformedPolicy,
}

impl RosterFile {
    /// Creates a handle to the roster at `path`.
    ///
    /// Nothing is read until [`RosterFile::load`] is called.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, policy: MalformedPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
        }
    }

    /// Creates a handle using the data file and policy from `config`.
    #[must_use]
    pub fn from_config(root: &Path, config: &Config) -> Self {
        Self::new(config.data_path(root), config.on_malformed)
    }

    /// The path of the roster file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the roster from disk.
    ///
    /// A missing file is an empty roster, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, or if it holds
    /// a malformed record and the policy is [`MalformedPolicy::Abort`].
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<TeamDirectory, LoadError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("Roster file not found, starting empty");
                return Ok(TeamDirectory::new());
            }
            Err(e) => return Err(e.into()),
        };

        let directory = text::read_directory(BufReader::new(file), self.policy)?;
        tracing::debug!(teams = directory.len(), "Loaded roster");
        Ok(directory)
    }

    /// Writes the whole roster to disk, replacing the previous contents.
    ///
    /// Parent directories are created automatically if they don't exist. An
    /// existing roster file keeps its permissions.
    ///
    /// Only the teams in `directory` are written: records dropped while loading
    /// under [`MalformedPolicy::Skip`] are gone from the file afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be written or renamed
    /// over the roster file.
    #[instrument(level = "debug", skip(self, directory), fields(path = %self.path.display()))]
    pub fn save(&self, directory: &TeamDirectory) -> io::Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut temp = NamedTempFile::new_in(parent)?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            text::write_directory(directory, &mut writer)?;
            writer.flush()?;
        }
        match fs::metadata(&self.path) {
            Ok(metadata) => temp.as_file().set_permissions(metadata.permissions())?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(teams = directory.len(), "Saved roster");
        Ok(())
    }

    /// Returns the raw text of the roster file.
    ///
    /// A missing file reads as an empty string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn contents(&self) -> io::Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{
        domain::{Attacker, TeamName, TeamRecord},
        storage::FormatError,
    };

    fn team(attackers: &[&str], name: &str, goals: i64) -> TeamRecord {
        let attackers = attackers
            .iter()
            .map(|attacker| Attacker::try_from(*attacker).unwrap())
            .collect();
        TeamRecord::new(attackers, TeamName::new(name).unwrap(), goals)
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let tmp = TempDir::new().unwrap();
        let roster = RosterFile::new(tmp.path().join("teams.txt"), MalformedPolicy::Abort);

        assert!(roster.load().unwrap().is_empty());
        assert_eq!(roster.contents().unwrap(), "");
    }

    #[test]
    fn save_then_load() {
        let tmp = TempDir::new().unwrap();
        let roster = RosterFile::new(tmp.path().join("teams.txt"), MalformedPolicy::Abort);

        let mut directory = TeamDirectory::new();
        directory.add(team(&["Williams", "Peters"], "Anaheim Ducks", 3));
        directory.add(team(&["Gibson", "Martin"], "Arizona Coyotes", 5));
        roster.save(&directory).unwrap();

        assert_eq!(roster.load().unwrap(), directory);
        assert_eq!(
            roster.contents().unwrap(),
            "Gibson Martin | Arizona Coyotes 5\nWilliams Peters | Anaheim Ducks 3\n"
        );
    }

    #[test]
    fn save_replaces_previous_contents() {
        let tmp = TempDir::new().unwrap();
        let roster = RosterFile::new(tmp.path().join("teams.txt"), MalformedPolicy::Abort);

        let mut directory = TeamDirectory::new();
        directory.add(team(&["A"], "First", 1));
        directory.add(team(&["B"], "Second", 2));
        roster.save(&directory).unwrap();

        directory.del();
        roster.save(&directory).unwrap();

        assert_eq!(roster.contents().unwrap(), "A | First 1\n");
    }

    #[test]
    fn save_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("league").join("east").join("teams.txt");
        let roster = RosterFile::new(&path, MalformedPolicy::Abort);

        roster.save(&TeamDirectory::new()).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn save_leaves_no_temporary_files_behind() {
        let tmp = TempDir::new().unwrap();
        let roster = RosterFile::new(tmp.path().join("teams.txt"), MalformedPolicy::Abort);

        roster.save(&TeamDirectory::new()).unwrap();

        let entries: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn malformed_file_respects_policy() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("teams.txt");
        fs::write(&path, "A | Ducks 3\nB | Coyotes many\n").unwrap();

        let strict = RosterFile::new(&path, MalformedPolicy::Abort);
        assert!(matches!(
            strict.load(),
            Err(LoadError::Format(FormatError::InvalidGoals { line: 2, .. }))
        ));

        let lenient = RosterFile::new(&path, MalformedPolicy::Skip);
        assert_eq!(lenient.load().unwrap().len(), 1);
    }

    #[test]
    fn skip_policy_drops_bad_records_on_next_save() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("teams.txt");
        fs::write(&path, "A | Ducks 3\nB | Coyotes many\n").unwrap();
        let roster = RosterFile::new(&path, MalformedPolicy::Skip);

        let mut directory = roster.load().unwrap();
        directory.add(team(&["C"], "Bruins", 1));
        roster.save(&directory).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "C | Bruins 1\nA | Ducks 3\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn save_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("teams.txt");
        fs::write(&path, "A | Ducks 3\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let roster = RosterFile::new(&path, MalformedPolicy::Abort);
        let mut directory = roster.load().unwrap();
        directory.del();
        roster.save(&directory).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn from_config_resolves_against_root() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.set_data_file("nhl.txt");
        config.on_malformed = MalformedPolicy::Skip;

        let roster = RosterFile::from_config(tmp.path(), &config);

        assert_eq!(roster.path(), tmp.path().join("nhl.txt"));
        assert_eq!(roster, RosterFile::new(tmp.path().join("nhl.txt"), MalformedPolicy::Skip));
    }
}
