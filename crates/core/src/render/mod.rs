//! Traversal-driven rendering of the credential tree.
//!
//! Both output modes share one filtered pre-order walk: a group's heading
//! and entries first, then each child subtree completely, then the next
//! sibling. The walk iterates over an explicit stack instead of recursing so
//! deep or wide trees cannot exhaust the call stack.

mod csv;
mod tree;

pub use csv::{CSV_COLUMNS, escape, render_csv};
pub use tree::render_tree;

use crate::filter::{SearchCriteria, matches};
use crate::tree::{EntryId, GroupId, KeyTree, NOTES_FIELD};

/// Placeholder emitted in place of a masked secret.
///
/// Fixed width: the rendered form reveals neither the secret's bytes nor its
/// length. Masking is a display transform only; the tree itself is untouched.
pub const MASK: &str = "******";

/// Display-time switches for the tree renderer and the interactive viewer.
#[derive(Clone, Copy, Debug)]
pub struct DisplayOptions {
	/// Replace secret field values with [`MASK`]. On unless the user
	/// explicitly asks for plaintext.
	pub mask_secrets: bool,
}

impl Default for DisplayOptions {
	fn default() -> Self {
		Self { mask_secrets: true }
	}
}

/// Pre-order walk over every group, yielding `(group, depth)`.
///
/// Children are pushed in reverse declaration order so the stack pops them
/// in declaration order: heading, entries, first child subtree, next
/// sibling. This is the one traversal order every renderer and test pins.
pub(crate) fn walk(tree: &KeyTree) -> Walk<'_> {
	Walk {
		tree,
		stack: vec![(tree.root(), 0)],
	}
}

pub(crate) struct Walk<'a> {
	tree: &'a KeyTree,
	stack: Vec<(GroupId, usize)>,
}

impl Iterator for Walk<'_> {
	type Item = (GroupId, usize);

	fn next(&mut self) -> Option<Self::Item> {
		let (id, depth) = self.stack.pop()?;
		let group = self.tree.group(id);
		for child in group.groups().iter().rev() {
			self.stack.push((*child, depth + 1));
		}
		Some((id, depth))
	}
}

/// Entries of `group` that satisfy `criteria`, in declaration order.
pub(crate) fn matching_entries<'a>(
	tree: &'a KeyTree,
	group: GroupId,
	criteria: &'a SearchCriteria,
) -> impl Iterator<Item = EntryId> + 'a {
	tree.group(group)
		.entries()
		.iter()
		.copied()
		.filter(move |entry| matches(tree, *entry, criteria))
}

/// Render the field block of one entry, one string per output line.
///
/// Lines carry no indentation; the tree renderer indents them to the field
/// level and the interactive entry view shows them as-is. Fields with absent
/// values produce no line. `Notes` values are emitted raw, without the
/// `name:` prefix, one output line per embedded line. Secret values are
/// replaced by [`MASK`] when `options.mask_secrets` is set.
#[must_use]
pub fn entry_lines(tree: &KeyTree, entry: EntryId, options: DisplayOptions) -> Vec<String> {
	let mut lines = Vec::new();
	for id in tree.entry(entry).fields() {
		let field = tree.field(*id);
		let Some(value) = field.value() else {
			continue;
		};
		if field.name() == NOTES_FIELD {
			lines.extend(value.lines().map(str::to_owned));
		} else if field.is_secret() && options.mask_secrets {
			lines.push(format!("{}: {MASK}", field.name()));
		} else {
			lines.push(format!("{}: {value}", field.name()));
		}
	}
	lines
}
