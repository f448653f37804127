use busline_types::Passenger;
use serde::{Deserialize, Serialize};

/// Result of a booking request.
///
/// Booking is total: below capacity it confirms a seat, at capacity it
/// queues the name. There is no failure arm.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingOutcome {
    /// A seat was assigned and the passenger is on the manifest.
    Confirmed { passenger: Passenger },
    /// The bus was full; the name joined the waiting list.
    Waitlisted {
        name: String,
        /// 1-based position in the queue at the time of joining.
        position: usize,
    },
}

impl BookingOutcome {
    /// `true` when a seat was assigned.
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }

    /// The assigned seat number, if any.
    pub fn seat(&self) -> Option<u32> {
        match self {
            Self::Confirmed { passenger } => Some(passenger.seat_no),
            Self::Waitlisted { .. } => None,
        }
    }

    /// The name the request was made for.
    pub fn name(&self) -> &str {
        match self {
            Self::Confirmed { passenger } => &passenger.name,
            Self::Waitlisted { name, .. } => name,
        }
    }
}

/// Receipt for a successful cancellation.
///
/// When the waiting list was non-empty, the freed capacity is immediately
/// re-booked for the front of the queue and that booking's own outcome is
/// carried here unmodified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cancellation {
    /// The removed reservation (name and the seat it held).
    pub passenger: Passenger,
    /// Outcome of re-booking the head of the waiting list, when one existed.
    pub reassigned: Option<BookingOutcome>,
}
