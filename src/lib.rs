#![deny(clippy::disallowed_methods)]

pub mod cli;
pub mod error;
pub mod geometry;
pub mod metadata;
pub mod resample_filter;
pub mod sync;
pub mod thumbnail;
pub mod tracing;

use crate::cli::Cli;
use clap::CommandFactory;
use clap::FromArgMatches;
pub use error::*;
pub use geometry::*;

pub fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = match Cli::command().try_get_matches() {
        Ok(matches) => Cli::from_arg_matches(&matches)?,
        Err(e) => exit_on_parse_error(&e),
    };

    // Initialize tracing based on global args (debug and --json/--log-file)
    crate::tracing::init_tracing(
        cli.global_args.log_level(),
        cli.global_args.json_log_behaviour(),
    )?;

    cli.invoke()?;
    Ok(())
}

/// Print a clap failure and exit; malformed or missing arguments exit with 1.
fn exit_on_parse_error(e: &clap::Error) -> ! {
    if e.use_stderr() {
        let _ = e.print();
        std::process::exit(1);
    }
    // --help / --version
    e.exit()
}
