use thiserror::Error;

#[derive(Error, Debug)]
pub enum StackError {
    /// No grammar derivation exists for the input; processing stops here.
    #[error("Parsing failed: {0}")]
    Parse(String),

    /// Every grounded conjunction across every reading failed legality pruning.
    #[error("Found no interpretation")]
    NoInterpretation,

    /// A disambiguation index outside the candidate range. Never fatal:
    /// the caller re-prompts and resumes the session.
    #[error("Selection {index} is out of range (0..{count})")]
    InvalidSelection { index: usize, count: usize },

    /// `choose` was called while no selection was pending.
    #[error("No pending choice to resume")]
    NoPendingChoice,

    /// A command tree violated the parser contract (e.g. `move` without a
    /// target location).
    #[error("Malformed command tree: {0}")]
    MalformedCommand(String),

    /// A world file referenced an id it never defined, or defined one twice.
    #[error("Malformed world: {0}")]
    MalformedWorld(String),

    #[error("Unknown object: {0}")]
    UnknownObject(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StackError>;
