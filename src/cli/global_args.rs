use crate::cli::arbitrary_values;
use crate::cli::json_log_behaviour::JsonLogBehaviour;
use crate::cli::to_args::ToArgs;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::Level;

#[derive(Args, Arbitrary, Clone, Default, PartialEq, Debug)]
pub struct GlobalArgs {
    /// Enable debug logging
    #[clap(long)]
    pub debug: bool,

    /// Emit log lines as JSON on stderr
    #[clap(long)]
    pub json: bool,

    /// Write JSON log lines to this file instead of stderr
    #[clap(long, value_name = "PATH")]
    #[arbitrary(with = arbitrary_values::optional_path)]
    pub log_file: Option<PathBuf>,
}

impl GlobalArgs {
    #[must_use]
    pub fn log_level(&self) -> Level {
        if self.debug { Level::DEBUG } else { Level::WARN }
    }

    #[must_use]
    pub fn json_log_behaviour(&self) -> JsonLogBehaviour {
        match (&self.log_file, self.json) {
            (Some(path), _) => JsonLogBehaviour::File(path.clone()),
            (None, true) => JsonLogBehaviour::Stderr,
            (None, false) => JsonLogBehaviour::None,
        }
    }
}

impl ToArgs for GlobalArgs {
    fn to_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        if self.debug {
            args.push("--debug".into());
        }
        if self.json {
            args.push("--json".into());
        }
        if let Some(path) = &self.log_file {
            args.push("--log-file".into());
            args.push(path.into());
        }
        args
    }
}
