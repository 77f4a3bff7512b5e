//! Scoped ownership of the terminal screen.
//!
//! One [`Session`] is acquired for an entire interactive run and restores
//! the terminal exactly once when it goes out of scope, on every exit path:
//! early cancellation, an error mid-draw, or a normal quit. Nothing else in
//! this crate touches global terminal state.

use std::io::Stdout;

use anyhow::Result;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::{Frame, Terminal};

/// An exclusive claim on a terminal surface.
pub struct Session<B: Backend> {
	terminal: Terminal<B>,
	restore_on_drop: bool,
}

impl Session<CrosstermBackend<Stdout>> {
	/// Take over the real terminal: alternate screen, raw mode, no echo,
	/// hidden cursor. Dropping the session undoes all of it; `ratatui`'s
	/// panic hook covers aborts mid-draw.
	pub fn acquire() -> Result<Self> {
		let mut terminal = ratatui::init();
		terminal.hide_cursor()?;
		Ok(Self {
			terminal,
			restore_on_drop: true,
		})
	}
}

impl<B: Backend> Session<B> {
	/// Wrap an already-built terminal, typically a
	/// [`TestBackend`](ratatui::backend::TestBackend) one. No global state
	/// is touched on drop.
	pub fn from_terminal(terminal: Terminal<B>) -> Self {
		Self {
			terminal,
			restore_on_drop: false,
		}
	}

	/// Draw one frame.
	pub fn draw(&mut self, render: impl FnOnce(&mut Frame<'_>)) -> Result<()> {
		self.terminal.draw(render)?;
		Ok(())
	}

	/// The wrapped terminal, for inspecting the backend in tests.
	#[must_use]
	pub fn terminal(&self) -> &Terminal<B> {
		&self.terminal
	}
}

impl<B: Backend> Drop for Session<B> {
	fn drop(&mut self) {
		if self.restore_on_drop {
			let _ = self.terminal.show_cursor();
			ratatui::restore();
		}
	}
}
