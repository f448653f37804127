use std::fmt;

use serde::{Deserialize, Serialize};

/// A confirmed reservation: one passenger holding one seat.
///
/// Created when a booking is confirmed and removed when that seat is
/// cancelled. Names are free text and are not validated; empty and
/// duplicate names are accepted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Passenger {
    /// Passenger name, taken verbatim from the caller.
    pub name: String,
    /// Assigned seat number, 1-based.
    pub seat_no: u32,
}

impl Passenger {
    /// Create a reservation for `name` on seat `seat_no`.
    pub fn new(name: impl Into<String>, seat_no: u32) -> Self {
        Self {
            name: name.into(),
            seat_no,
        }
    }
}

impl fmt::Display for Passenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seat {}: {}", self.seat_no, self.name)
    }
}
