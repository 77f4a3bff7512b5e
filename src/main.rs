mod cli;
mod settings;
mod workflow;

use std::io;

use anyhow::Result;
use cli::parse_cli;
use tracing_subscriber::EnvFilter;
use workflow::ViewerWorkflow;

fn main() -> Result<()> {
	let cli = parse_cli();
	init_tracing(cli.verbose);

	if cli.list_themes {
		for name in kdxview_tui::names() {
			println!("{name}");
		}
		return Ok(());
	}

	let resolved = settings::load(&cli)?;
	ViewerWorkflow::new(resolved).run()
}

/// Log to stderr only, so tree/CSV output on stdout stays clean and the
/// interactive screen is never scribbled on. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
	let default = match verbose {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.init();
}
