/// Errors produced by ledger operations.
///
/// Every variant is a recoverable outcome surfaced to the caller; none of
/// the operations panic or abort. Booking itself is total and has no error
/// variant at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("no confirmed bookings")]
    NoBookings,

    #[error("seat {seat} is not booked")]
    SeatNotFound { seat: u32 },

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("no one is waiting")]
    WaitingListEmpty,

    #[error("forecast needs {need} recorded bookings, have {have}")]
    InsufficientData { have: usize, need: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LedgerError>;
