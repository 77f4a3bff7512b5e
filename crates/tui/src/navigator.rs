//! Interactive drill-down browsing of the credential tree.
//!
//! A state machine over three states: browsing a group, viewing one entry,
//! and exited. Browsing opens one [`Menu`] session per visit; viewing shows
//! the entry's fields with the same masking rules the tree renderer uses.
//! Cancellation anywhere, including an empty menu, exits the whole browser;
//! the caller's [`Session`] guard restores the terminal.

use anyhow::Result;
use ratatui::Frame;
use ratatui::backend::Backend;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use kdxview_core::filter::{SearchCriteria, matches};
use kdxview_core::render::{DisplayOptions, entry_lines};
use kdxview_core::tree::{EntryId, GroupId, KeyTree};

use crate::input::{InputSource, MenuAction};
use crate::menu::{Menu, MenuItem, MenuOutcome};
use crate::session::Session;
use crate::style::Theme;

const BACK_LABEL: &str = "..";
const VIEW_HINT: &str = "enter: back";
/// Prefix of the line `entry_lines` emits for the secret field; only the
/// style depends on it, never the content.
const SECRET_LINE_PREFIX: &str = "Password: ";

/// The group being browsed plus the trail that led to it.
#[derive(Debug)]
pub struct NavigationState {
	current: GroupId,
	stack: Vec<GroupId>,
}

impl NavigationState {
	fn new(root: GroupId) -> Self {
		Self {
			current: root,
			stack: Vec::new(),
		}
	}

	/// The group the browser currently lists.
	#[must_use]
	pub fn current(&self) -> GroupId {
		self.current
	}

	/// How many ancestors are on the back stack; zero at the root.
	#[must_use]
	pub fn depth(&self) -> usize {
		self.stack.len()
	}

	fn descend(&mut self, child: GroupId) {
		self.stack.push(self.current);
		self.current = child;
	}

	fn ascend(&mut self) {
		if let Some(parent) = self.stack.pop() {
			self.current = parent;
		}
	}
}

/// What confirming a given menu row does.
#[derive(Clone, Copy, Debug)]
enum Choice {
	Back,
	Group(GroupId),
	Entry(EntryId),
}

/// The interactive browser over one tree.
pub struct Navigator<'a> {
	tree: &'a KeyTree,
	options: DisplayOptions,
	state: NavigationState,
}

impl<'a> Navigator<'a> {
	#[must_use]
	pub fn new(tree: &'a KeyTree, options: DisplayOptions) -> Self {
		Self {
			tree,
			options,
			state: NavigationState::new(tree.root()),
		}
	}

	#[must_use]
	pub fn state(&self) -> &NavigationState {
		&self.state
	}

	/// Run the browser until the user exits.
	///
	/// One menu session is open at a time; each group visit builds its
	/// choices fresh, so a long browse accumulates nothing.
	pub fn run<B: Backend>(
		&mut self,
		session: &mut Session<B>,
		input: &mut dyn InputSource,
		theme: &Theme,
	) -> Result<()> {
		loop {
			let (items, actions) = self.choices(theme);
			let title = self.tree.group_path(self.state.current);
			match Menu::new(title, items).run(session, input, theme)? {
				MenuOutcome::Cancelled => return Ok(()),
				MenuOutcome::Chosen(index) => match actions[index] {
					Choice::Back => self.state.ascend(),
					Choice::Group(child) => self.state.descend(child),
					Choice::Entry(entry) => self.view_entry(session, input, theme, entry)?,
				},
			}
		}
	}

	/// Menu rows for the current group: `..` unless at the root, then child
	/// groups marked as folders, then entries that pass the (always-true)
	/// browse criteria.
	fn choices(&self, theme: &Theme) -> (Vec<MenuItem>, Vec<Choice>) {
		let mut items = Vec::new();
		let mut actions = Vec::new();
		let browse_all = SearchCriteria::match_all();

		if self.state.depth() > 0 {
			items.push(MenuItem::new(BACK_LABEL));
			actions.push(Choice::Back);
		}
		let group = self.tree.group(self.state.current);
		for child in group.groups() {
			let label = format!("{}/", self.tree.group(*child).name());
			items.push(MenuItem::styled(label, theme.group));
			actions.push(Choice::Group(*child));
		}
		for entry in group.entries() {
			if matches(self.tree, *entry, &browse_all) {
				items.push(MenuItem::new(self.tree.entry(*entry).title()));
				actions.push(Choice::Entry(*entry));
			}
		}
		(items, actions)
	}

	/// Show one entry's fields until the user backs out.
	fn view_entry<B: Backend>(
		&self,
		session: &mut Session<B>,
		input: &mut dyn InputSource,
		theme: &Theme,
		entry: EntryId,
	) -> Result<()> {
		let title = self.tree.entry(entry).title().to_owned();
		let masking = self.options.mask_secrets;
		let lines: Vec<Line<'_>> = entry_lines(self.tree, entry, self.options)
			.into_iter()
			.map(|line| {
				if masking && line.starts_with(SECRET_LINE_PREFIX) {
					Line::styled(line, theme.masked)
				} else {
					Line::styled(line, theme.item)
				}
			})
			.collect();

		loop {
			session.draw(|frame| render_entry_view(frame, &title, &lines, theme))?;
			match input.next_action()? {
				MenuAction::Confirm | MenuAction::Cancel => return Ok(()),
				MenuAction::Up | MenuAction::Down => {}
			}
		}
	}
}

fn render_entry_view(frame: &mut Frame<'_>, title: &str, lines: &[Line<'_>], theme: &Theme) {
	let hint = Line::styled(VIEW_HINT, theme.hint).alignment(Alignment::Right);
	let content_width = lines
		.iter()
		.map(Line::width)
		.max()
		.unwrap_or(0)
		.max(title.width() + 2)
		.max(VIEW_HINT.len());
	let frame_area = frame.area();
	let width = ((content_width + 2) as u16).min(frame_area.width);
	let height = ((lines.len() + 3) as u16).min(frame_area.height);
	let area = Rect {
		x: frame_area.x + (frame_area.width - width) / 2,
		y: frame_area.y + (frame_area.height - height) / 2,
		width,
		height,
	};

	frame.render_widget(Clear, area);
	let block = Block::default()
		.borders(Borders::ALL)
		.border_set(ratatui::symbols::border::ROUNDED)
		.border_style(theme.border)
		.title(Line::styled(format!(" {title} "), theme.title))
		.title_alignment(Alignment::Center)
		.title_bottom(hint);
	let inner = block.inner(area);
	frame.render_widget(block, area);
	frame.render_widget(Paragraph::new(lines.to_vec()), inner);
}

/// Entry point for the binary: browse `tree` inside `session` until the
/// user exits.
pub fn run_interactive<B: Backend>(
	tree: &KeyTree,
	options: DisplayOptions,
	session: &mut Session<B>,
	input: &mut dyn InputSource,
	theme: &Theme,
) -> Result<()> {
	Navigator::new(tree, options).run(session, input, theme)
}
