//! Input actions for menu sessions.
//!
//! The browser consumes exactly four actions. [`InputSource`] keeps the
//! state machine independent of where they come from: the real keyboard in
//! the binary, a scripted sequence in tests. Reads block the whole process;
//! there is no background input thread and no polling timeout.

use anyhow::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

/// One user action inside a menu or entry view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
	Up,
	Down,
	Confirm,
	Cancel,
}

/// A blocking source of [`MenuAction`]s.
pub trait InputSource {
	/// Block until the user produces the next action.
	fn next_action(&mut self) -> Result<MenuAction>;
}

/// The real keyboard, read through crossterm events.
///
/// Arrow keys and vi keys move, Enter confirms, Esc or `q` cancels; every
/// other event is swallowed.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyboardInput;

impl InputSource for KeyboardInput {
	fn next_action(&mut self) -> Result<MenuAction> {
		loop {
			if let Event::Key(key) = event::read()?
				&& key.kind == KeyEventKind::Press
				&& let Some(action) = action_for(key.code)
			{
				return Ok(action);
			}
		}
	}
}

fn action_for(code: KeyCode) -> Option<MenuAction> {
	match code {
		KeyCode::Up | KeyCode::Char('k') => Some(MenuAction::Up),
		KeyCode::Down | KeyCode::Char('j') => Some(MenuAction::Down),
		KeyCode::Enter => Some(MenuAction::Confirm),
		KeyCode::Esc | KeyCode::Char('q') => Some(MenuAction::Cancel),
		_ => None,
	}
}

/// Scripted actions for driving menus headless in tests.
///
/// An exhausted script cancels forever rather than blocking, so a test with
/// a short script unwinds instead of hanging.
#[cfg(test)]
pub(crate) struct ScriptedInput {
	actions: std::collections::VecDeque<MenuAction>,
}

#[cfg(test)]
impl ScriptedInput {
	pub(crate) fn new(actions: impl IntoIterator<Item = MenuAction>) -> Self {
		Self {
			actions: actions.into_iter().collect(),
		}
	}
}

#[cfg(test)]
impl InputSource for ScriptedInput {
	fn next_action(&mut self) -> Result<MenuAction> {
		Ok(self.actions.pop_front().unwrap_or(MenuAction::Cancel))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keys_map_to_the_four_actions() {
		assert_eq!(action_for(KeyCode::Up), Some(MenuAction::Up));
		assert_eq!(action_for(KeyCode::Char('k')), Some(MenuAction::Up));
		assert_eq!(action_for(KeyCode::Down), Some(MenuAction::Down));
		assert_eq!(action_for(KeyCode::Char('j')), Some(MenuAction::Down));
		assert_eq!(action_for(KeyCode::Enter), Some(MenuAction::Confirm));
		assert_eq!(action_for(KeyCode::Esc), Some(MenuAction::Cancel));
		assert_eq!(action_for(KeyCode::Char('q')), Some(MenuAction::Cancel));
		assert_eq!(action_for(KeyCode::Tab), None);
	}

	#[test]
	fn exhausted_scripts_cancel() {
		let mut input = ScriptedInput::new([MenuAction::Down]);
		assert_eq!(input.next_action().unwrap(), MenuAction::Down);
		assert_eq!(input.next_action().unwrap(), MenuAction::Cancel);
		assert_eq!(input.next_action().unwrap(), MenuAction::Cancel);
	}
}
