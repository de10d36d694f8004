pub mod config;
pub mod discovery;
pub mod error;
pub mod executor;
pub mod identity;
pub mod pairing;
pub mod preflight;
pub mod rename_engine;
pub mod report;

pub use error::{ExecuteError, Phase, PreflightError, PreflightIssue};
pub use executor::{ExecutionSummary, FileMover, StdMover, execute, execute_with};
pub use identity::{Identity, TaggedFile, extract_identity};
pub use pairing::{FilePair, Pairing, pair_files};
pub use preflight::preflight;
pub use rename_engine::{RenameInstruction, plan_renames};
pub use report::{ConsoleReporter, Reporter};
