use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "An interactive in-memory filesystem persisted to a text snapshot")]
pub struct Cli {
    /// Snapshot file loaded at startup and rewritten on exit
    #[clap(long, short, default_value = "sample.dat")]
    pub snapshot: PathBuf,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}
