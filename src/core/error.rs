//! Error types.
//!
//! Combat never propagates errors to its caller: invalid player input is a
//! no-op reported as [`ActionRefused`], and persistence failures are logged
//! and swallowed. The remaining errors belong to loading data.

use thiserror::Error;

/// Why a player action was refused. The combat state is unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ActionRefused {
    #[error("it is not the player's turn")]
    NotPlayerTurn,

    #[error("the encounter is already resolved")]
    Resolved,

    #[error("the play zone is full")]
    PlayZoneFull,

    #[error("a staked card is charm-locked")]
    CharmLocked,

    #[error("no discards left this encounter")]
    DiscardBudgetExhausted,

    #[error("no cards are staked")]
    NothingStaked,

    #[error("card is not in the hand")]
    NotInHand,

    #[error("card is not staked")]
    NotStaked,

    #[error("too many cards staked; withdraw one first")]
    Overfull,
}

/// Loading configuration or catalog data failed.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid data: {0}")]
    Invalid(String),
}

/// Encoding or decoding a session blob failed.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session encoding error: {0}")]
    Codec(#[from] bincode::Error),
}

/// The remote save store rejected or could not receive a request.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("save store unavailable: {0}")]
    Unavailable(String),

    #[error("save store rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
}
