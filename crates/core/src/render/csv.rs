//! Quoted CSV export.

use std::io::{self, Write};

use crate::filter::SearchCriteria;
use crate::render::{matching_entries, walk};
use crate::tree::KeyTree;

/// The six fixed columns, in output order. The last four name the fields
/// looked up on each entry (first match wins, absent values export empty).
pub const CSV_COLUMNS: [&str; 6] = ["Group", "Title", "UserName", "Password", "URL", "Notes"];

/// Escape one cell value for quoted CSV output.
///
/// Every literal `"` is doubled; nothing else changes and the surrounding
/// quotes are the caller's job. The output buffer grows by exactly one byte
/// per quote in the input, so the worst case (all quotes) doubles the
/// allocation; `String` handles that without a precomputed multiplier.
#[must_use]
pub fn escape(value: &str) -> String {
	let mut escaped = String::with_capacity(value.len());
	for ch in value.chars() {
		escaped.push(ch);
		if ch == '"' {
			escaped.push('"');
		}
	}
	escaped
}

/// Write the filtered entries as CSV to `sink`: a quoted header row, then
/// one row per matching entry in traversal order.
///
/// The Password column is never masked here: a CSV export exists to move
/// the data, and a masked export would silently destroy it. The divergence
/// from tree mode is deliberate and covered by tests.
pub fn render_csv(tree: &KeyTree, criteria: &SearchCriteria, sink: &mut dyn Write) -> io::Result<()> {
	write_row(sink, CSV_COLUMNS.iter().map(|name| (*name).to_owned()))?;
	for (group, _) in walk(tree) {
		let group_name = tree.group(group).name();
		for entry in matching_entries(tree, group, criteria) {
			let cells = [
				group_name.to_owned(),
				tree.entry(entry).title().to_owned(),
				lookup(tree, entry, "UserName"),
				lookup(tree, entry, "Password"),
				lookup(tree, entry, "URL"),
				lookup(tree, entry, "Notes"),
			];
			write_row(sink, cells)?;
		}
	}
	Ok(())
}

/// Field value by name; an absent value exports as an empty cell.
fn lookup(tree: &KeyTree, entry: crate::tree::EntryId, name: &str) -> String {
	tree.field_value(entry, name).unwrap_or_default().to_owned()
}

fn write_row(sink: &mut dyn Write, cells: impl IntoIterator<Item = String>) -> io::Result<()> {
	let mut first = true;
	for cell in cells {
		if !first {
			sink.write_all(b",")?;
		}
		first = false;
		write!(sink, "\"{}\"", escape(&cell))?;
	}
	sink.write_all(b"\n")
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;
	use crate::filter::SearchScope;
	use crate::render::{DisplayOptions, render_tree};
	use crate::tree::PASSWORD_FIELD;

	fn rendered(tree: &KeyTree, criteria: &SearchCriteria) -> String {
		let mut sink = Vec::new();
		render_csv(tree, criteria, &mut sink).unwrap();
		String::from_utf8(sink).unwrap()
	}

	/// Split one CSV row produced by [`render_csv`] back into cell values.
	///
	/// Understands exactly the emitted dialect: every cell quoted, quotes
	/// doubled, cells joined by commas.
	fn split_row(row: &str) -> Vec<String> {
		let mut cells = Vec::new();
		let mut current = String::new();
		let mut chars = row.chars().peekable();
		assert_eq!(chars.next(), Some('"'), "row must start quoted: {row}");
		while let Some(ch) = chars.next() {
			match ch {
				'"' => match chars.next() {
					Some('"') => current.push('"'),
					Some(',') => {
						cells.push(std::mem::take(&mut current));
						assert_eq!(chars.next(), Some('"'), "cell must start quoted");
					}
					None => cells.push(std::mem::take(&mut current)),
					Some(other) => panic!("unexpected {other:?} after closing quote"),
				},
				other => current.push(other),
			}
		}
		cells
	}

	#[test]
	fn header_row_comes_first() {
		let tree = KeyTree::new("Root");
		let out = rendered(&tree, &SearchCriteria::match_all());
		assert_eq!(out, "\"Group\",\"Title\",\"UserName\",\"Password\",\"URL\",\"Notes\"\n");
	}

	#[test]
	fn rows_follow_traversal_order_with_one_row_per_entry() {
		let mut tree = KeyTree::new("Root");
		let a = tree.add_group(tree.root(), "A");
		tree.add_group(tree.root(), "B");
		let a1 = tree.add_group(a, "A1");
		tree.add_entry(a, "first");
		tree.add_entry(a1, "second");
		tree.add_entry(tree.group(tree.root()).groups()[1], "third");

		let out = rendered(&tree, &SearchCriteria::match_all());
		let titles: Vec<String> = out
			.lines()
			.skip(1)
			.map(|row| split_row(row)[1].clone())
			.collect();
		assert_eq!(titles, ["first", "second", "third"]);
	}

	#[test]
	fn quotes_and_commas_round_trip() {
		let mut tree = KeyTree::new("Root");
		let entry = tree.add_entry(tree.root(), r#"say "hello", world"#);
		tree.add_field(entry, "UserName", Some("a,b".into()));
		tree.add_field(entry, "Notes", Some(r#"1" drive"#.into()));

		let out = rendered(&tree, &SearchCriteria::match_all());
		let row = out.lines().nth(1).unwrap();
		let cells = split_row(row);
		assert_eq!(cells[1], r#"say "hello", world"#);
		assert_eq!(cells[2], "a,b");
		assert_eq!(cells[5], r#"1" drive"#);
	}

	#[test]
	fn absent_fields_export_as_empty_cells() {
		let mut tree = KeyTree::new("Root");
		let entry = tree.add_entry(tree.root(), "bare");
		tree.add_field(entry, "URL", None);

		let out = rendered(&tree, &SearchCriteria::match_all());
		let cells = split_row(out.lines().nth(1).unwrap());
		assert_eq!(cells, ["Root", "bare", "", "", "", ""]);
	}

	#[test]
	fn csv_never_masks_and_honors_the_filter() {
		let mut tree = KeyTree::new("Root");
		let entry = tree.add_entry(tree.root(), "github");
		tree.add_field(entry, PASSWORD_FIELD, Some("hunter2".into()));
		tree.add_entry(tree.root(), "unmatched");

		let criteria = SearchCriteria::new(Some("github".into()), SearchScope::TitleOnly);
		let out = rendered(&tree, &criteria);
		assert!(out.contains("hunter2"));
		assert!(!out.contains("unmatched"));

		// The masking flag only exists for tree mode; CSV output is
		// identical either way, while the tree hides the same secret.
		let mut masked_tree_out = Vec::new();
		render_tree(
			&tree,
			&criteria,
			DisplayOptions { mask_secrets: true },
			&mut masked_tree_out,
		)
		.unwrap();
		assert!(!String::from_utf8(masked_tree_out).unwrap().contains("hunter2"));
	}

	proptest! {
		#[test]
		fn escaping_round_trips(value in "[ -~\n]{0,64}") {
			let escaped = escape(&value);
			// Doubling each quote means quote runs in the escaped text have
			// even length; halving them restores the input.
			prop_assert_eq!(escaped.replace("\"\"", "\""), value);
		}

		// Newline-free values so the test can split rows by line; embedded
		// newlines stay raw inside the quotes and are covered above.
		#[test]
		fn row_cells_round_trip(value in "[ -~]{0,64}") {
			let mut tree = KeyTree::new("Root");
			let entry = tree.add_entry(tree.root(), value.clone());
			tree.add_field(entry, "UserName", Some(value.clone()));
			let out = rendered(&tree, &SearchCriteria::match_all());
			let cells = split_row(out.lines().nth(1).unwrap());
			prop_assert_eq!(&cells[1], &value);
			prop_assert_eq!(&cells[2], &value);
		}
	}
}
