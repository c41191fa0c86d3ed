use std::path::PathBuf;

/// Where, if anywhere, log lines are emitted as JSON
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum JsonLogBehaviour {
    /// Human readable lines on stderr
    #[default]
    None,
    /// JSON lines on stderr
    Stderr,
    /// JSON lines appended to a file
    File(PathBuf),
}
