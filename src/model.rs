//! Prize and participant records

use serde::{Deserialize, Serialize};

/// Prize identifier (the `no` column)
pub type PrizeNo = i64;

/// A registered participant. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A prize with `amount` winner slots. Identity is `no`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prize {
    pub no: PrizeNo,
    pub name: String,
    /// Number of winner slots
    pub amount: i64,
    pub desc: String,
}

impl Prize {
    pub fn new(no: PrizeNo, name: impl Into<String>, amount: i64, desc: impl Into<String>) -> Self {
        Self {
            no,
            name: name.into(),
            amount,
            desc: desc.into(),
        }
    }
}

/// Draw state of a single prize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrizeState {
    /// No draw has happened yet
    NotDrawn,
    /// Drawn at least once; the winner list may since have been emptied
    Drawn,
}
