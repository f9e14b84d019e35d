//! Error type shared by every draw session operation

use crate::model::PrizeNo;

/// Everything that can go wrong while loading, drawing or persisting a session.
///
/// Failed operations never leave the session half-modified.
#[derive(Debug, thiserror::Error)]
pub enum DrawError {
    #[error("malformed record: expected {expected} fields, found {found}")]
    MalformedRecord { expected: usize, found: usize },
    #[error("invalid number in field `{field}`: {value:?}")]
    InvalidNumber {
        field: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("unknown prize {0}")]
    UnknownPrize(PrizeNo),
    #[error("prize {no} has invalid amount {amount}")]
    InvalidPrizeAmount { no: PrizeNo, amount: i64 },
    #[error("prize {0} has already been drawn")]
    AlreadyDrawn(PrizeNo),
    #[error("no available participants")]
    NoAvailableParticipants,
    #[error("prize {0} has no winners to revoke")]
    NoWinnersToRevoke(PrizeNo),
    #[error("prize {0} has not been drawn yet")]
    WinnersNotYetDrawn(PrizeNo),
    #[error("participant {id:?} is not a winner of prize {no}")]
    RevokedWinnerMismatch { no: PrizeNo, id: String },
    #[error("redraw of {requested} exceeds remaining capacity {remaining} of prize {no}")]
    RedrawAmountExceedsCapacity {
        no: PrizeNo,
        requested: i64,
        remaining: i64,
    },
    #[error("checksum mismatch: stored {stored}, computed {computed}")]
    ChecksumMismatch { stored: String, computed: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, DrawError>;
