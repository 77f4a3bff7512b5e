use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use config::{Config, File};
use kdxview_core::filter::{SearchCriteria, SearchScope};
use kdxview_core::render::DisplayOptions;
use kdxview_tui::{Theme, by_name, names};
use serde::Deserialize;
use tracing::debug;

use crate::cli::{CliArgs, Mode};

const CONFIG_DIR_ENV: &str = "KDXVIEW_CONFIG_DIR";
const CONFIG_FILE_NAME: &str = "config.toml";

/// File-backed settings, everything optional so the CLI can fill the gaps.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
	display: DisplaySection,
	output: OutputSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct DisplaySection {
	mask_passwords: Option<bool>,
	theme: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct OutputSection {
	mode: Option<String>,
}

/// Everything the workflow needs, resolved from CLI over config file over
/// defaults.
#[derive(Debug)]
pub(crate) struct ResolvedConfig {
	pub(crate) file: PathBuf,
	pub(crate) mode: Mode,
	pub(crate) criteria: SearchCriteria,
	pub(crate) options: DisplayOptions,
	pub(crate) theme: Theme,
	pub(crate) output: Option<PathBuf>,
	pub(crate) passphrase: Option<String>,
}

/// Merge defaults, the optional config file, and CLI arguments.
pub(crate) fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let raw = if cli.no_config {
		RawConfig::default()
	} else {
		read_config_file(cli)?
	};

	let file = cli
		.file
		.clone()
		.ok_or_else(|| anyhow!("missing vault FILE argument"))?;

	let mode = resolve_mode(cli, &raw)?;
	let criteria = resolve_criteria(cli);

	// Search short-circuits interactive browsing to the tree view; the
	// navigator itself never filters.
	let mode = if mode == Mode::Interactive && criteria.term().is_some() {
		debug!("search term given, falling back from interactive to tree mode");
		Mode::Tree
	} else {
		mode
	};

	let mask_secrets = if cli.show_passwords {
		false
	} else {
		raw.display.mask_passwords.unwrap_or(true)
	};

	let theme_name = cli.theme.clone().or_else(|| raw.display.theme.clone());
	let theme = resolve_theme(theme_name.as_deref())?;

	Ok(ResolvedConfig {
		file,
		mode,
		criteria,
		options: DisplayOptions { mask_secrets },
		theme,
		output: cli.output.clone(),
		passphrase: cli.passphrase.clone(),
	})
}

fn read_config_file(cli: &CliArgs) -> Result<RawConfig> {
	let mut builder = Config::builder();
	match &cli.config {
		Some(path) => {
			builder = builder.add_source(File::from(path.clone()).required(true));
		}
		None => {
			if let Some(path) = default_config_path() {
				builder = builder.add_source(File::from(path).required(false));
			}
		}
	}
	builder
		.build()
		.context("failed to read configuration")?
		.try_deserialize()
		.context("failed to parse configuration")
}

/// Platform config location, overridable through `KDXVIEW_CONFIG_DIR`.
fn default_config_path() -> Option<PathBuf> {
	if let Some(dir) = env::var_os(CONFIG_DIR_ENV).filter(|value| !value.is_empty()) {
		return Some(PathBuf::from(dir).join(CONFIG_FILE_NAME));
	}
	directories::ProjectDirs::from("io", "kdxview", "kdxview")
		.map(|dirs| dirs.config_local_dir().join(CONFIG_FILE_NAME))
}

fn resolve_mode(cli: &CliArgs, raw: &RawConfig) -> Result<Mode> {
	if let Some(mode) = cli.mode() {
		return Ok(mode);
	}
	match raw.output.mode.as_deref() {
		None | Some("tree") => Ok(Mode::Tree),
		Some("csv") => Ok(Mode::Csv),
		Some("interactive") => Ok(Mode::Interactive),
		Some(other) => bail!("unknown output mode in configuration: {other}"),
	}
}

fn resolve_criteria(cli: &CliArgs) -> SearchCriteria {
	let scope = if cli.all_fields {
		SearchScope::AllFields
	} else {
		SearchScope::TitleOnly
	};
	SearchCriteria::new(cli.find.clone(), scope)
}

fn resolve_theme(name: Option<&str>) -> Result<Theme> {
	match name {
		None => Ok(Theme::default()),
		Some(name) => by_name(name).ok_or_else(|| {
			anyhow!(
				"unknown theme {name:?}, available themes: {}",
				names().join(", ")
			)
		}),
	}
}
