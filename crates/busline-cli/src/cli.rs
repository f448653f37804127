use clap::Parser;

#[derive(Parser)]
#[command(
    name = "busline",
    about = "Single-bus seat booking at the terminal",
    version,
)]
pub struct Cli {
    /// Number of seats on the bus.
    #[arg(long, default_value_t = busline_ledger::DEFAULT_CAPACITY)]
    pub seats: u32,

    #[arg(short, long)]
    pub verbose: bool,

    /// Rendering for the bookings, waiting-list, and prediction reports.
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
