use clap::Parser;

mod cli;
mod menu;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt::init();
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    menu::run(cli, stdin.lock(), stdout.lock())
}
