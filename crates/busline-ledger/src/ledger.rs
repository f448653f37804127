//! The booking state machine for a single bus.

use std::collections::VecDeque;
use std::sync::Arc;

use busline_types::{Clock, Passenger, SystemClock, Timestamp};
use tracing::debug;

use crate::error::{LedgerError, Result};
use crate::forecast::Forecast;
use crate::records::{BookingOutcome, Cancellation};

/// Seats on the bus unless the caller configures otherwise.
pub const DEFAULT_CAPACITY: u32 = 5;

/// In-memory booking ledger for one bus.
///
/// Owns the confirmed-seat manifest (insertion order = booking order), the
/// FIFO waiting list, the LIFO cancellation history backing undo, and the
/// append-only timestamp series behind [`Forecast`]. All state lives for
/// the lifetime of the value; dropping the ledger discards it.
///
/// Seat numbers come from a single counter: incremented on each confirmed
/// booking (the new value is the assigned seat) and decremented on each
/// cancellation. Freed numbers are not tracked in a free list, so a
/// cancellation followed by a booking re-issues the counter value even when
/// another passenger still holds it.
pub struct BusLedger {
    capacity: u32,
    booked_seats: u32,
    confirmed: Vec<Passenger>,
    waiting: VecDeque<String>,
    cancel_history: Vec<Passenger>,
    booking_times: Vec<Timestamp>,
    cancel_times: Vec<Timestamp>,
    clock: Arc<dyn Clock>,
}

impl BusLedger {
    /// Create an empty ledger for a bus with `capacity` seats, stamping
    /// history with the system clock.
    pub fn new(capacity: u32) -> Self {
        Self::with_clock(capacity, Arc::new(SystemClock))
    }

    /// Create an empty ledger reading time from `clock`.
    pub fn with_clock(capacity: u32, clock: Arc<dyn Clock>) -> Self {
        Self {
            capacity,
            booked_seats: 0,
            confirmed: Vec::new(),
            waiting: VecDeque::new(),
            cancel_history: Vec::new(),
            booking_times: Vec::new(),
            cancel_times: Vec::new(),
            clock,
        }
    }

    /// Book a ticket for `name`.
    ///
    /// Below capacity this assigns the next counter value as the seat and
    /// records a booking timestamp; at capacity the name joins the waiting
    /// list. Names are forwarded verbatim; empty and duplicate names are
    /// accepted.
    pub fn book(&mut self, name: impl Into<String>) -> BookingOutcome {
        let name = name.into();
        if self.booked_seats < self.capacity {
            self.booked_seats += 1;
            let passenger = Passenger::new(name, self.booked_seats);
            self.confirmed.push(passenger.clone());
            self.booking_times.push(self.clock.now());
            debug!(seat = passenger.seat_no, "booking confirmed");
            BookingOutcome::Confirmed { passenger }
        } else {
            self.waiting.push_back(name.clone());
            let position = self.waiting.len();
            debug!(position, "bus full, name waitlisted");
            BookingOutcome::Waitlisted { name, position }
        }
    }

    /// Cancel the booking holding `seat`.
    ///
    /// Removes the first manifest entry with that seat number, decrements
    /// the seat counter, pushes the removed reservation onto the undo
    /// history, and records a cancellation timestamp. If anyone is waiting,
    /// the head of the queue is immediately re-booked and that outcome is
    /// returned on the receipt.
    pub fn cancel(&mut self, seat: u32) -> Result<Cancellation> {
        if self.confirmed.is_empty() {
            return Err(LedgerError::NoBookings);
        }

        let index = self
            .confirmed
            .iter()
            .position(|p| p.seat_no == seat)
            .ok_or(LedgerError::SeatNotFound { seat })?;

        let passenger = self.confirmed.remove(index);
        self.booked_seats -= 1;
        self.cancel_history.push(passenger.clone());
        self.cancel_times.push(self.clock.now());
        debug!(seat, name = %passenger.name, "booking cancelled");

        let reassigned = self.waiting.pop_front().map(|next| self.book(next));

        Ok(Cancellation {
            passenger,
            reassigned,
        })
    }

    /// Undo the most recent cancellation by re-booking its name.
    ///
    /// The former seat number is not restored; the counter assigns a fresh
    /// one, and the re-booking is subject to the usual capacity and
    /// waiting-list rules. Repeatable: each call pops one history entry.
    pub fn undo_cancel(&mut self) -> Result<BookingOutcome> {
        let last = self
            .cancel_history
            .pop()
            .ok_or(LedgerError::NothingToUndo)?;
        debug!(name = %last.name, "undoing last cancellation");
        Ok(self.book(last.name))
    }

    /// Confirmed passengers in booking order.
    pub fn manifest(&self) -> Result<&[Passenger]> {
        if self.confirmed.is_empty() {
            return Err(LedgerError::NoBookings);
        }
        Ok(&self.confirmed)
    }

    /// Waitlisted names in queue order.
    pub fn waiting(&self) -> Result<Vec<String>> {
        if self.waiting.is_empty() {
            return Err(LedgerError::WaitingListEmpty);
        }
        Ok(self.waiting.iter().cloned().collect())
    }

    /// Project demand from the recorded history.
    pub fn forecast(&self) -> Result<Forecast> {
        Forecast::project(
            &self.booking_times,
            &self.cancel_times,
            self.booked_seats,
            self.capacity,
        )
    }

    /// Total seats on the bus.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Seats currently held by confirmed passengers.
    pub fn booked_seats(&self) -> u32 {
        self.booked_seats
    }

    /// Seats still free.
    pub fn remaining_seats(&self) -> u32 {
        self.capacity - self.booked_seats
    }

    /// `true` once every seat is taken.
    pub fn is_full(&self) -> bool {
        self.booked_seats == self.capacity
    }

    /// Names currently queued.
    pub fn waiting_len(&self) -> usize {
        self.waiting.len()
    }

    /// Bookings recorded since creation, cancelled ones included.
    pub fn bookings_recorded(&self) -> usize {
        self.booking_times.len()
    }

    /// Cancellations recorded since creation.
    pub fn cancellations_recorded(&self) -> usize {
        self.cancel_times.len()
    }
}

impl Default for BusLedger {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
