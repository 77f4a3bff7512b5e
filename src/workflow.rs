use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use kdxview_core::render::{render_csv, render_tree};
use kdxview_core::tree::KeyTree;
use kdxview_core::{JsonEngine, VaultEngine};
use kdxview_tui::{KeyboardInput, Session, prompt, run_interactive};
use tracing::{debug, warn};

use crate::cli::Mode;
use crate::settings::ResolvedConfig;

/// Runs exactly one presentation mode over the loaded tree.
pub(crate) struct ViewerWorkflow {
	config: ResolvedConfig,
}

impl ViewerWorkflow {
	pub(crate) fn new(config: ResolvedConfig) -> Self {
		Self { config }
	}

	pub(crate) fn run(self) -> Result<()> {
		let engine = JsonEngine;
		let tree = load_tree(&engine, &self.config)?;
		debug!(entries = tree.entry_count(), "vault loaded");

		match self.config.mode {
			Mode::Tree => {
				let mut sink = open_sink(self.config.output.as_deref())?;
				render_tree(&tree, &self.config.criteria, self.config.options, &mut sink)
					.context("failed to write tree output")?;
				sink.flush().context("failed to flush output")?;
			}
			Mode::Csv => {
				let mut sink = open_sink(self.config.output.as_deref())?;
				render_csv(&tree, &self.config.criteria, &mut sink)
					.context("failed to write CSV output")?;
				sink.flush().context("failed to flush output")?;
			}
			Mode::Interactive => {
				if self.config.output.is_some() {
					warn!("--output is ignored in interactive mode");
				}
				let mut session = Session::acquire()?;
				let mut input = KeyboardInput;
				run_interactive(
					&tree,
					self.config.options,
					&mut session,
					&mut input,
					&self.config.theme,
				)?;
			}
		}
		Ok(())
	}
}

fn load_tree(engine: &dyn VaultEngine, config: &ResolvedConfig) -> Result<KeyTree> {
	let file = File::open(&config.file)
		.with_context(|| format!("failed to open vault {}", config.file.display()))?;
	let mut reader: Box<dyn Read> = Box::new(BufReader::new(file));

	let passphrase = match &config.passphrase {
		Some(passphrase) => passphrase.clone(),
		None if engine.requires_passphrase() => prompt::read_passphrase("Passphrase: ")?,
		None => String::new(),
	};

	engine
		.load(&mut reader, &passphrase)
		.with_context(|| format!("failed to load vault {}", config.file.display()))
}

fn open_sink(path: Option<&Path>) -> Result<Box<dyn Write>> {
	match path {
		Some(path) => {
			let file = File::create(path)
				.with_context(|| format!("failed to create output file {}", path.display()))?;
			Ok(Box::new(BufWriter::new(file)))
		}
		None => Ok(Box::new(io::stdout().lock())),
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write as _;

	use clap::Parser;

	use super::*;
	use crate::cli::CliArgs;
	use crate::settings;

	const SAMPLE_VAULT: &str = r#"{
		"name": "Root",
		"groups": [
			{
				"name": "internet",
				"entries": [
					{
						"title": "github",
						"fields": [
							{ "name": "UserName", "value": "octo" },
							{ "name": "Password", "value": "hunter2" }
						]
					}
				]
			}
		]
	}"#;

	fn resolved_for(vault: &Path, extra: &[&str]) -> ResolvedConfig {
		let mut argv = vec!["kdxview", "-n"];
		argv.extend_from_slice(extra);
		let vault = vault.to_str().unwrap();
		argv.push(vault);
		settings::load(&CliArgs::parse_from(argv)).unwrap()
	}

	fn sample_file() -> tempfile::NamedTempFile {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(SAMPLE_VAULT.as_bytes()).unwrap();
		file
	}

	#[test]
	fn loads_and_renders_a_vault_file_end_to_end() {
		let vault = sample_file();
		let config = resolved_for(vault.path(), &[]);
		let tree = load_tree(&JsonEngine, &config).unwrap();

		let mut out = Vec::new();
		render_tree(&tree, &config.criteria, config.options, &mut out).unwrap();
		let out = String::from_utf8(out).unwrap();
		assert!(out.contains("github"));
		assert!(out.contains("UserName: octo"));
		assert!(!out.contains("hunter2"), "masked by default");
	}

	#[test]
	fn missing_vault_files_carry_the_path_in_the_error() {
		let config = resolved_for(Path::new("/nonexistent/vault.json"), &[]);
		let err = load_tree(&JsonEngine, &config).unwrap_err();
		assert!(format!("{err:#}").contains("/nonexistent/vault.json"));
	}

	#[test]
	fn output_files_receive_the_rendering() {
		let vault = sample_file();
		let out = tempfile::NamedTempFile::new().unwrap();
		let out_path = out.path().to_path_buf();
		let config = resolved_for(
			vault.path(),
			&["-c", "-o", out_path.to_str().unwrap()],
		);

		ViewerWorkflow::new(config).run().unwrap();
		let written = std::fs::read_to_string(&out_path).unwrap();
		assert!(written.starts_with("\"Group\",\"Title\""));
		assert!(written.contains("hunter2"), "CSV never masks");
	}
}
