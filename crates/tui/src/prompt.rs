//! Echo-free passphrase prompt.
//!
//! Used by the binary before the vault engine runs, outside of any
//! [`Session`](crate::session::Session): raw mode is held only for the
//! duration of the read and released on every path out, including errors.

use std::io::{self, Write};

use anyhow::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::crossterm::terminal::{disable_raw_mode, enable_raw_mode};

/// Prompt on stderr and read a passphrase without echoing it.
///
/// Backspace edits, Enter submits, Ctrl-C aborts with an error.
pub fn read_passphrase(prompt: &str) -> Result<String> {
	eprint!("{prompt}");
	io::stderr().flush()?;

	let raw_mode = RawModeGuard::enable()?;
	let mut passphrase = String::new();
	loop {
		let Event::Key(key) = event::read()? else {
			continue;
		};
		if key.kind != KeyEventKind::Press {
			continue;
		}
		match key.code {
			KeyCode::Enter => break,
			KeyCode::Backspace => {
				passphrase.pop();
			}
			KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
				anyhow::bail!("passphrase entry aborted");
			}
			KeyCode::Char(ch) => passphrase.push(ch),
			_ => {}
		}
	}
	drop(raw_mode);
	eprintln!();
	Ok(passphrase)
}

struct RawModeGuard;

impl RawModeGuard {
	fn enable() -> Result<Self> {
		enable_raw_mode()?;
		Ok(Self)
	}
}

impl Drop for RawModeGuard {
	fn drop(&mut self) {
		let _ = disable_raw_mode();
	}
}
