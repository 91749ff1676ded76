#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
use clap::Parser;

/// Send `tracing` output to stderr, filtered by `RUST_LOG` (default `warn`).
#[cfg(feature = "cli")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when embedded in another binary.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(feature = "cli")]
pub fn run() -> Result<(), crate::error::AppError> {
    use crate::adapters::cli::{Args, compute_output, parse_inputs, parse_today};

    init_tracing();

    let args = Args::parse();
    let (recipe, ass) = parse_inputs(&args)?;
    let today = parse_today(&args)?;

    let out = compute_output(&recipe, &ass, today);

    crate::adapters::cli::print_output(&out, &args)?;

    Ok(())
}
