use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

/// Parse command line arguments into the strongly typed [`CliArgs`]
/// structure.
pub(crate) fn parse_cli() -> CliArgs {
	CliArgs::parse()
}

/// Which presentation mode the user asked for on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
	Tree,
	Csv,
	Interactive,
}

#[derive(Parser, Debug)]
#[command(
	name = "kdxview",
	version,
	about = "Terminal viewer for hierarchical credential vaults",
	color = ColorChoice::Auto
)]
/// Command-line arguments accepted by the `kdxview` binary.
pub(crate) struct CliArgs {
	#[arg(
		short = 't',
		long,
		help = "Render the vault as an indented tree (default)",
		conflicts_with_all = ["csv", "interactive"]
	)]
	pub(crate) tree: bool,
	#[arg(
		short = 'c',
		long,
		help = "Export the vault as CSV",
		conflicts_with = "interactive"
	)]
	pub(crate) csv: bool,
	#[arg(short = 'i', long, help = "Browse the vault in an interactive menu")]
	pub(crate) interactive: bool,
	#[arg(
		short = 'f',
		long = "find",
		value_name = "TERM",
		help = "Only show entries matching this case-sensitive term"
	)]
	pub(crate) find: Option<String>,
	#[arg(
		long,
		help = "Match the term against group names and field values, not just titles"
	)]
	pub(crate) all_fields: bool,
	#[arg(long, help = "Print passwords instead of masking them in tree output")]
	pub(crate) show_passwords: bool,
	#[arg(
		short = 'p',
		long,
		value_name = "PASSPHRASE",
		env = "KDXVIEW_PASSPHRASE",
		hide_env_values = true,
		help = "Vault passphrase (prompted for when required and absent)"
	)]
	pub(crate) passphrase: Option<String>,
	#[arg(long, value_name = "THEME", help = "Select a theme by name")]
	pub(crate) theme: Option<String>,
	#[arg(long, help = "List available theme names and exit")]
	pub(crate) list_themes: bool,
	#[arg(
		short = 'o',
		long,
		value_name = "FILE",
		help = "Write tree or CSV output to a file instead of stdout"
	)]
	pub(crate) output: Option<PathBuf>,
	#[arg(
		long = "config",
		value_name = "FILE",
		help = "Configuration file to load instead of the default location"
	)]
	pub(crate) config: Option<PathBuf>,
	#[arg(short = 'n', long = "no-config", help = "Skip loading configuration files")]
	pub(crate) no_config: bool,
	#[arg(
		short = 'v',
		long,
		action = ArgAction::Count,
		help = "Raise log verbosity (-v info, -vv debug, -vvv trace)"
	)]
	pub(crate) verbose: u8,
	#[arg(value_name = "FILE", required_unless_present = "list_themes")]
	pub(crate) file: Option<PathBuf>,
}

impl CliArgs {
	/// The mode explicitly selected by flags, if any. Config defaults fill
	/// the gap when none was given.
	pub(crate) fn mode(&self) -> Option<Mode> {
		if self.tree {
			Some(Mode::Tree)
		} else if self.csv {
			Some(Mode::Csv)
		} else if self.interactive {
			Some(Mode::Interactive)
		} else {
			None
		}
	}
}
