use std::ffi::OsString;

/// Turn a parsed argument struct back into the command line that produces it
pub trait ToArgs {
    fn to_args(&self) -> Vec<OsString>;
}
