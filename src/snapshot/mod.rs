//! Persistence of the filesystem tree as a flat text snapshot.
//!
//! One record per line: `DIR <name>`, `FILE <name> <content>`, `ENDDIR`.
//! The whole tree is written at exit and read back at startup.

mod codec;

pub use codec::{SnapshotError, decode, encode, load, save};
