//! field-catalog CLI entry point
mod cli;

fn main() {
    // stderr, so catalogs on stdout stay pipeable
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();

    let command_line_interface = cli::CommandLineInterface::load();
    if let Err(error) = command_line_interface.run() {
        cli::report(&error);
        std::process::exit(1);
    }
}
