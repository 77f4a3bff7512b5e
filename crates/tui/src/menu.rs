//! Bordered single-select menu sessions.
//!
//! A [`Menu`] owns nothing beyond its title and choice labels; each call to
//! [`Menu::run`] builds fresh highlight state, drives one draw/read loop on
//! the caller's [`Session`], and tears down with the returned outcome.
//! Sessions are strictly sequential, so menus can be opened and closed any
//! number of times without leaking state into the next one.

use anyhow::Result;
use ratatui::Frame;
use ratatui::backend::Backend;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, HighlightSpacing, List, ListItem, ListState};
use unicode_width::UnicodeWidthStr;

use crate::components::{ScrollMetrics, render_scrollbar};
use crate::input::{InputSource, MenuAction};
use crate::session::Session;
use crate::style::Theme;

/// Mark placed to the left of the highlighted choice.
pub const CHOICE_MARK: &str = "> ";

/// How a menu session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuOutcome {
	/// The user confirmed the choice at this zero-based index.
	Chosen(usize),
	/// The user backed out, or there was nothing to choose from.
	Cancelled,
}

/// One selectable row.
#[derive(Clone, Debug)]
pub struct MenuItem {
	label: String,
	style: Option<Style>,
}

impl MenuItem {
	pub fn new(label: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			style: None,
		}
	}

	/// A row with its own style instead of the theme's item style.
	pub fn styled(label: impl Into<String>, style: Style) -> Self {
		Self {
			label: label.into(),
			style: Some(style),
		}
	}

	#[must_use]
	pub fn label(&self) -> &str {
		&self.label
	}
}

/// Highlight position and scroll offset for one running menu.
#[derive(Debug, Default)]
pub struct MenuState {
	len: usize,
	list: ListState,
}

impl MenuState {
	#[must_use]
	pub fn new(len: usize) -> Self {
		Self {
			len,
			list: ListState::default().with_selected(Some(0)),
		}
	}

	#[must_use]
	pub fn selected(&self) -> usize {
		self.list.selected().unwrap_or(0)
	}

	/// Move the highlight up one row, stopping at the top.
	pub fn move_up(&mut self) {
		let index = self.selected().saturating_sub(1);
		self.list.select(Some(index));
	}

	/// Move the highlight down one row, stopping at the bottom.
	pub fn move_down(&mut self) {
		let index = (self.selected() + 1).min(self.len.saturating_sub(1));
		self.list.select(Some(index));
	}
}

/// A bordered, titled, scrollable single-select list.
#[derive(Debug)]
pub struct Menu {
	title: String,
	choices: Vec<MenuItem>,
	area: Option<Rect>,
}

impl Menu {
	pub fn new(title: impl Into<String>, choices: Vec<MenuItem>) -> Self {
		Self {
			title: title.into(),
			choices,
			area: None,
		}
	}

	/// Pin the menu to an explicit area instead of centering it in the
	/// frame.
	#[must_use]
	pub fn with_area(mut self, area: Rect) -> Self {
		self.area = Some(area);
		self
	}

	/// Drive one menu session to completion.
	///
	/// An empty choice list cancels immediately: the input source is never
	/// consulted and nothing is drawn, so callers can treat `Cancelled` as
	/// the single "nothing happened here" result.
	pub fn run<B: Backend>(
		&self,
		session: &mut Session<B>,
		input: &mut dyn InputSource,
		theme: &Theme,
	) -> Result<MenuOutcome> {
		if self.choices.is_empty() {
			return Ok(MenuOutcome::Cancelled);
		}

		let mut state = MenuState::new(self.choices.len());
		loop {
			session.draw(|frame| {
				let area = self.target_area(frame.area());
				self.render(frame, area, &mut state, theme);
			})?;

			match input.next_action()? {
				MenuAction::Up => state.move_up(),
				MenuAction::Down => state.move_down(),
				MenuAction::Confirm => return Ok(MenuOutcome::Chosen(state.selected())),
				MenuAction::Cancel => return Ok(MenuOutcome::Cancelled),
			}
		}
	}

	/// The pinned area, or one centered in `frame_area` and sized to the
	/// choices, clamped to fit.
	#[must_use]
	pub fn target_area(&self, frame_area: Rect) -> Rect {
		if let Some(area) = self.area {
			return area;
		}

		let label_width = self
			.choices
			.iter()
			.map(|choice| choice.label.width())
			.max()
			.unwrap_or(0)
			+ CHOICE_MARK.width();
		let width = (label_width.max(self.title.width() + 2) + 2).min(frame_area.width as usize);
		let height = (self.choices.len() + 2).min(frame_area.height as usize);
		let width = width as u16;
		let height = height as u16;

		Rect {
			x: frame_area.x + (frame_area.width - width) / 2,
			y: frame_area.y + (frame_area.height - height) / 2,
			width,
			height,
		}
	}

	pub(crate) fn render(
		&self,
		frame: &mut Frame<'_>,
		area: Rect,
		state: &mut MenuState,
		theme: &Theme,
	) {
		frame.render_widget(Clear, area);

		let block = Block::default()
			.borders(Borders::ALL)
			.border_set(ratatui::symbols::border::ROUNDED)
			.border_style(theme.border)
			.title(Line::styled(format!(" {} ", self.title), theme.title))
			.title_alignment(Alignment::Center);
		let inner = block.inner(area);
		frame.render_widget(block, area);

		let metrics = ScrollMetrics::compute(self.choices.len(), inner.height as usize);
		let list_area = if metrics.overflowing {
			Rect {
				width: inner.width.saturating_sub(1),
				..inner
			}
		} else {
			inner
		};

		let rows: Vec<ListItem<'_>> = self
			.choices
			.iter()
			.map(|choice| {
				ListItem::new(choice.label.clone()).style(choice.style.unwrap_or(theme.item))
			})
			.collect();
		let list = List::new(rows)
			.highlight_style(theme.highlight)
			.highlight_symbol(CHOICE_MARK)
			.highlight_spacing(HighlightSpacing::Always);
		frame.render_stateful_widget(list, list_area, &mut state.list);

		render_scrollbar(frame, inner, metrics, state.list.offset(), theme);
	}
}
