//! Save/load persistence with integrity verification
//!
//! Features:
//! - JSON snapshot of prizes, participants and winners
//! - MD5 checksum over the winners, verified on load
//! - One data file per session name, written via tmp file + rename

pub mod envelope;
pub mod store;

pub use envelope::{SaveData, TIMESTAMP_FORMAT, winners_checksum};
pub use store::DataStore;
