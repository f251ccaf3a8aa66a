use snafu::Snafu;
use snafu::prelude::*;
use tracing::debug;

use crate::application::RuntimeConfig;
use crate::repl::Repl;
use crate::snapshot::{self, SnapshotError};

pub struct Application;

impl Application {
    /// Loads the snapshot, runs the command loop to completion and writes
    /// the snapshot back. Only the final save can fail the process.
    pub async fn run(config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let config: RuntimeConfig = config.into();
        let tree = snapshot::load(&config.snapshot_path).await;
        debug!("filesystem ready, entering the command loop");

        let mut repl = Repl::new(tree);
        repl.run();

        snapshot::save(&config.snapshot_path, repl.tree())
            .await
            .context(SaveSnafu)?;
        println!("File system saved. Exiting...");

        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure while saving the filesystem snapshot"))]
    SaveError { source: SnapshotError },
}
