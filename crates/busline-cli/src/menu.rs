//! Interactive menu loop over a [`BusLedger`].
//!
//! The loop owns one explicitly constructed ledger and serializes every
//! operation: one menu choice, one ledger call, one rendered result. It is
//! written against [`BufRead`] / [`Write`] so tests can drive scripted
//! sessions; `main` hands it locked stdin/stdout.

use std::io::{BufRead, Write};

use busline_ledger::{BookingOutcome, BusLedger, LedgerError};
use colored::Colorize;

use crate::cli::{Cli, OutputFormat};

pub fn run(cli: Cli, mut input: impl BufRead, mut out: impl Write) -> anyhow::Result<()> {
    let mut ledger = BusLedger::new(cli.seats);

    loop {
        write_menu(&mut out, &ledger)?;
        let Some(choice) = prompt(&mut input, &mut out, "Choice: ")? else {
            break;
        };

        match choice.trim() {
            "1" => {
                let Some(name) = prompt(&mut input, &mut out, "Passenger name: ")? else {
                    break;
                };
                cmd_book(&mut out, &mut ledger, name)?;
            }
            "2" => {
                let Some(line) = prompt(&mut input, &mut out, "Seat number to cancel: ")?
                else {
                    break;
                };
                cmd_cancel(&mut out, &mut ledger, &line)?;
            }
            "3" => cmd_undo(&mut out, &mut ledger)?,
            "4" => cmd_bookings(&mut out, &ledger, &cli.format)?,
            "5" => cmd_waiting(&mut out, &ledger, &cli.format)?,
            "6" => cmd_forecast(&mut out, &ledger, &cli.format)?,
            "7" => {
                writeln!(out, "Exiting.")?;
                break;
            }
            other => {
                writeln!(out, "{} Unknown choice: {other}", "✗".red().bold())?;
            }
        }
    }

    Ok(())
}

fn write_menu(out: &mut impl Write, ledger: &BusLedger) -> anyhow::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        format!("--- busline ({} seats) ---", ledger.capacity()).bold()
    )?;
    writeln!(out, "1. Book ticket")?;
    writeln!(out, "2. Cancel ticket")?;
    writeln!(out, "3. Undo last cancel")?;
    writeln!(out, "4. Show bookings")?;
    writeln!(out, "5. Show waiting list")?;
    writeln!(out, "6. Predict bus status")?;
    writeln!(out, "7. Exit")?;
    Ok(())
}

/// Print `label`, then read one line. `None` means the input ended.
///
/// Only the trailing newline is stripped: names travel to the ledger
/// verbatim, empty lines included.
fn prompt(
    input: &mut impl BufRead,
    out: &mut impl Write,
    label: &str,
) -> anyhow::Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn cmd_book(out: &mut impl Write, ledger: &mut BusLedger, name: String) -> anyhow::Result<()> {
    let outcome = ledger.book(name);
    render_booking(out, &outcome)
}

fn cmd_cancel(out: &mut impl Write, ledger: &mut BusLedger, line: &str) -> anyhow::Result<()> {
    let seat = match line.trim().parse::<u32>() {
        Ok(seat) => seat,
        Err(_) => {
            writeln!(out, "{} Not a seat number: {line}", "✗".red().bold())?;
            return Ok(());
        }
    };

    match ledger.cancel(seat) {
        Ok(receipt) => {
            writeln!(
                out,
                "{} Ticket cancelled for {} | seat {}",
                "✓".green().bold(),
                receipt.passenger.name.bold(),
                receipt.passenger.seat_no
            )?;
            if let Some(outcome) = &receipt.reassigned {
                writeln!(
                    out,
                    "{} Re-booking the front of the waiting list:",
                    "→".cyan()
                )?;
                render_booking(out, outcome)?;
            }
            Ok(())
        }
        Err(err) => render_error(out, &err),
    }
}

fn cmd_undo(out: &mut impl Write, ledger: &mut BusLedger) -> anyhow::Result<()> {
    match ledger.undo_cancel() {
        Ok(outcome) => {
            writeln!(out, "{} Undoing last cancellation:", "✓".green().bold())?;
            render_booking(out, &outcome)
        }
        Err(err) => render_error(out, &err),
    }
}

fn cmd_bookings(
    out: &mut impl Write,
    ledger: &BusLedger,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    match ledger.manifest() {
        Ok(manifest) => match format {
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(manifest)?)?;
            }
            OutputFormat::Text => {
                writeln!(out, "{}", "Current bookings:".bold())?;
                for passenger in manifest {
                    writeln!(out, "  {passenger}")?;
                }
            }
        },
        Err(err) => render_error(out, &err)?,
    }
    Ok(())
}

fn cmd_waiting(
    out: &mut impl Write,
    ledger: &BusLedger,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    match ledger.waiting() {
        Ok(names) => match format {
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(&names)?)?;
            }
            OutputFormat::Text => {
                writeln!(out, "{}", "Waiting list:".bold())?;
                for (position, name) in names.iter().enumerate() {
                    writeln!(out, "  {}. {name}", position + 1)?;
                }
            }
        },
        Err(err) => render_error(out, &err)?,
    }
    Ok(())
}

fn cmd_forecast(
    out: &mut impl Write,
    ledger: &BusLedger,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    match ledger.forecast() {
        Ok(forecast) => match format {
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(&forecast)?)?;
            }
            OutputFormat::Text => {
                writeln!(out, "{}", "Prediction report:".bold())?;
                writeln!(
                    out,
                    "  Seats booked: {} / {}",
                    forecast.booked_seats, forecast.capacity
                )?;
                writeln!(
                    out,
                    "  Estimated time until full: {:.2} minutes",
                    forecast.minutes_to_full
                )?;
                writeln!(
                    out,
                    "  Cancellation probability: {:.1}%",
                    forecast.cancel_probability_percent()
                )?;
            }
        },
        Err(err) => render_error(out, &err)?,
    }
    Ok(())
}

fn render_booking(out: &mut impl Write, outcome: &BookingOutcome) -> anyhow::Result<()> {
    match outcome {
        BookingOutcome::Confirmed { passenger } => {
            writeln!(
                out,
                "{} Ticket booked for {} | seat {}",
                "✓".green().bold(),
                passenger.name.bold(),
                passenger.seat_no
            )?;
        }
        BookingOutcome::Waitlisted { name, position } => {
            writeln!(
                out,
                "{} Bus is full; {} joins the waiting list at position {}",
                "!".yellow().bold(),
                name.bold(),
                position
            )?;
        }
    }
    Ok(())
}

fn render_error(out: &mut impl Write, err: &LedgerError) -> anyhow::Result<()> {
    writeln!(out, "{} {err}", "✗".red().bold())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn run_session(seats: u32, format: OutputFormat, script: &str) -> String {
        colored::control::set_override(false);
        let cli = Cli {
            seats,
            verbose: false,
            format,
        };
        let mut out = Vec::new();
        run(cli, Cursor::new(script), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn book_then_show_bookings() {
        let out = run_session(5, OutputFormat::Text, "1\nAlice\n4\n7\n");
        assert!(out.contains("Ticket booked for Alice | seat 1"));
        assert!(out.contains("Seat 1: Alice"));
        assert!(out.contains("Exiting."));
    }

    #[test]
    fn sixth_booking_is_waitlisted() {
        let out = run_session(
            5,
            OutputFormat::Text,
            "1\nAsha\n1\nBram\n1\nCaro\n1\nDee\n1\nEvan\n1\nFern\n5\n7\n",
        );
        assert!(out.contains("Ticket booked for Evan | seat 5"));
        assert!(out.contains("Fern joins the waiting list at position 1"));
        assert!(out.contains("1. Fern"));
    }

    #[test]
    fn cancellation_reassigns_from_waiting_list() {
        let out = run_session(
            5,
            OutputFormat::Text,
            "1\nAsha\n1\nBram\n1\nCaro\n1\nDee\n1\nEvan\n1\nFern\n2\n2\n5\n7\n",
        );
        assert!(out.contains("Ticket cancelled for Bram | seat 2"));
        assert!(out.contains("Re-booking the front of the waiting list:"));
        assert!(out.contains("Ticket booked for Fern | seat 5"));
        assert!(out.contains("no one is waiting"));
    }

    #[test]
    fn cancel_errors_are_reported_and_loop_continues() {
        let out = run_session(5, OutputFormat::Text, "2\n1\n1\nAlice\n2\n9\n7\n");
        assert!(out.contains("no confirmed bookings"));
        assert!(out.contains("seat 9 is not booked"));
    }

    #[test]
    fn undo_with_no_history_is_reported() {
        let out = run_session(5, OutputFormat::Text, "3\n7\n");
        assert!(out.contains("nothing to undo"));
    }

    #[test]
    fn undo_rebooks_cancelled_passenger() {
        let out = run_session(5, OutputFormat::Text, "1\nAlice\n2\n1\n3\n7\n");
        assert!(out.contains("Ticket cancelled for Alice | seat 1"));
        assert!(out.contains("Undoing last cancellation:"));
        // Fresh seat from the counter; with the bus otherwise empty it is 1 again.
        assert!(out.contains("Ticket booked for Alice | seat 1"));
    }

    #[test]
    fn forecast_needs_two_bookings() {
        let out = run_session(5, OutputFormat::Text, "1\nAlice\n6\n7\n");
        assert!(out.contains("forecast needs 2 recorded bookings, have 1"));
    }

    #[test]
    fn forecast_report_renders_counts() {
        let out = run_session(5, OutputFormat::Text, "1\nAlice\n1\nBob\n6\n7\n");
        assert!(out.contains("Prediction report:"));
        assert!(out.contains("Seats booked: 2 / 5"));
        assert!(out.contains("Cancellation probability: 0.0%"));
    }

    #[test]
    fn invalid_choice_and_seat_keep_the_loop_alive() {
        let out = run_session(5, OutputFormat::Text, "9\n2\nabc\n1\nAlice\n7\n");
        assert!(out.contains("Unknown choice: 9"));
        assert!(out.contains("Not a seat number: abc"));
        assert!(out.contains("Ticket booked for Alice | seat 1"));
    }

    #[test]
    fn empty_name_is_forwarded_verbatim() {
        let out = run_session(5, OutputFormat::Text, "1\n\n4\n7\n");
        assert!(out.contains("Ticket booked for  | seat 1"));
        assert!(out.contains("Seat 1: "));
    }

    #[test]
    fn json_format_renders_reports_as_json() {
        let out = run_session(5, OutputFormat::Json, "1\nAlice\n1\nBob\n4\n6\n7\n");
        assert!(out.contains("\"seat_no\": 1"));
        assert!(out.contains("\"name\": \"Alice\""));
        assert!(out.contains("\"booked_seats\": 2"));
    }

    #[test]
    fn empty_reports_are_signalled_not_empty() {
        let out = run_session(5, OutputFormat::Text, "4\n5\n7\n");
        assert!(out.contains("no confirmed bookings"));
        assert!(out.contains("no one is waiting"));
    }

    #[test]
    fn eof_ends_the_session() {
        let out = run_session(5, OutputFormat::Text, "1\nAlice\n");
        assert!(out.contains("Ticket booked for Alice | seat 1"));
        assert!(!out.contains("Exiting."));
    }

    #[test]
    fn capacity_flag_reaches_the_ledger() {
        let out = run_session(1, OutputFormat::Text, "1\nAlice\n1\nBob\n7\n");
        assert!(out.contains("--- busline (1 seats) ---"));
        assert!(out.contains("Bob joins the waiting list at position 1"));
    }
}
