use crate::cli::json_log_behaviour::JsonLogBehaviour;
use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `level` when set. Logs never go to stdout,
/// which is reserved for progress lines.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is already installed.
pub fn init_tracing(level: Level, json: JsonLogBehaviour) -> eyre::Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false);

    let result = match json {
        JsonLogBehaviour::None => builder
            .with_ansi(std::io::stderr().is_terminal())
            .with_writer(std::io::stderr)
            .try_init(),
        JsonLogBehaviour::Stderr => builder.json().with_writer(std::io::stderr).try_init(),
        JsonLogBehaviour::File(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            builder.json().with_writer(Mutex::new(file)).try_init()
        }
    };
    result.map_err(|e| eyre::eyre!("Failed to initialize tracing: {e}"))
}
