//! Seat-booking ledger for a single bus.
//!
//! This crate is the heart of busline. It provides:
//! - [`BusLedger`], the booking / cancellation / waiting-list / undo state
//!   machine
//! - Outcome records ([`BookingOutcome`], [`Cancellation`]) returned by the
//!   mutating operations
//! - [`Forecast`], a demand projection derived from the booking and
//!   cancellation history
//! - [`LedgerError`], the recoverable outcome taxonomy
//!
//! The ledger is synchronous and single-owner: mutations take `&mut self`,
//! so exclusive access is the mutual-exclusion boundary. Wrap the ledger in
//! a `Mutex` before sharing it across threads.

pub mod error;
pub mod forecast;
pub mod ledger;
pub mod records;

pub use error::LedgerError;
pub use forecast::{Forecast, MIN_FORECAST_SAMPLES};
pub use ledger::{BusLedger, DEFAULT_CAPACITY};
pub use records::{BookingOutcome, Cancellation};
