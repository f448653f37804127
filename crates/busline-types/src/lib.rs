//! Foundation types for busline.
//!
//! Every other busline crate depends on this one. It provides:
//!
//! - [`Passenger`] — a confirmed reservation (name plus seat number)
//! - [`Timestamp`] — a wall-clock instant in milliseconds since the epoch
//! - [`Clock`] — the time-source boundary, with [`SystemClock`] for
//!   production and [`ManualClock`] for tests and embedding

pub mod passenger;
pub mod temporal;

pub use passenger::Passenger;
pub use temporal::{Clock, ManualClock, SystemClock, Timestamp};
