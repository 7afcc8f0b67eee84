mod roster_file;
/// Text serialization for the roster.
pub mod text;

pub use roster_file::RosterFile;
pub use text::{FormatError, LoadError};
