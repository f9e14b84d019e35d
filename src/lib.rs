//! Lucky Draw - prize draw sessions
//!
//! Core modules:
//! - `session`: Draw / revoke / redraw state machine behind a single lock
//! - `sampling`: Uniform selection without replacement
//! - `records`: Prize and participant rows for bulk loads
//! - `persistence`: Save/load with integrity verification
//! - `config`: Data directory and RNG seeding

pub mod config;
pub mod error;
pub mod model;
pub mod persistence;
pub mod records;
pub mod sampling;
pub mod session;

pub use config::Config;
pub use error::{DrawError, Result};
pub use model::{Participant, Prize, PrizeNo, PrizeState};
pub use persistence::{DataStore, SaveData, winners_checksum};
pub use session::{DrawSession, WinnerMap};

/// Configuration constants
pub mod consts {
    /// Data directory used when none is configured
    pub const DEFAULT_DATA_DIR: &str = "data";
}
