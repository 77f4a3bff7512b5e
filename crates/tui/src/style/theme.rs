//! Theme definitions and the built-in theme table.

use ratatui::style::{Color, Modifier, Style};

/// Styles for the interactive browser's surfaces.
///
/// The distinction that matters to callers: group rows are visually distinct
/// from entry rows, and masked field values are visually distinct from plain
/// ones.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
	/// Menu and view borders.
	pub border: Style,
	/// Titles centered in the top border.
	pub title: Style,
	/// Entry rows and plain field lines.
	pub item: Style,
	/// Group (folder) rows.
	pub group: Style,
	/// The highlighted menu row.
	pub highlight: Style,
	/// Masked secret values.
	pub masked: Style,
	/// Key hints at the bottom of a view.
	pub hint: Style,
}

impl Default for Theme {
	fn default() -> Self {
		default_theme()
	}
}

/// The default `slate` theme.
#[must_use]
pub fn default_theme() -> Theme {
	Theme {
		border: Style::new().fg(Color::DarkGray),
		title: Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
		item: Style::new().fg(Color::Gray),
		group: Style::new().fg(Color::Cyan),
		highlight: Style::new()
			.fg(Color::Black)
			.bg(Color::Cyan)
			.add_modifier(Modifier::BOLD),
		masked: Style::new().fg(Color::DarkGray).add_modifier(Modifier::DIM),
		hint: Style::new().fg(Color::DarkGray),
	}
}

/// White-on-red menus in the style of old curses password tools.
fn crimson() -> Theme {
	Theme {
		border: Style::new().fg(Color::White).bg(Color::Red),
		title: Style::new()
			.fg(Color::White)
			.bg(Color::Red)
			.add_modifier(Modifier::BOLD),
		item: Style::new().fg(Color::White).bg(Color::Red),
		group: Style::new()
			.fg(Color::White)
			.bg(Color::Red)
			.add_modifier(Modifier::BOLD),
		highlight: Style::new().fg(Color::Red).bg(Color::White),
		masked: Style::new().fg(Color::Red).bg(Color::Red),
		hint: Style::new().fg(Color::White).bg(Color::Red),
	}
}

/// Names accepted by [`by_name`], default first.
#[must_use]
pub fn names() -> &'static [&'static str] {
	&["slate", "crimson"]
}

/// Look a built-in theme up by name.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
	match name {
		"slate" => Some(default_theme()),
		"crimson" => Some(crimson()),
		_ => None,
	}
}
