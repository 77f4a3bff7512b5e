//! Indented tree output.

use std::io::{self, Write};

use crate::filter::SearchCriteria;
use crate::render::{DisplayOptions, entry_lines, matching_entries, walk};
use crate::tree::KeyTree;

const INDENT: &str = "  ";

/// Write the filtered tree to `sink`.
///
/// Every group heading is emitted, indented by depth, even when all of its
/// entries are filtered out; matching entries follow as a title line plus
/// one line per present field value. The only failure mode is the sink
/// itself.
pub fn render_tree(
	tree: &KeyTree,
	criteria: &SearchCriteria,
	options: DisplayOptions,
	sink: &mut dyn Write,
) -> io::Result<()> {
	for (group, depth) in walk(tree) {
		write_indented(sink, depth, tree.group(group).name())?;
		for entry in matching_entries(tree, group, criteria) {
			write_indented(sink, depth + 1, tree.entry(entry).title())?;
			for line in entry_lines(tree, entry, options) {
				write_indented(sink, depth + 2, &line)?;
			}
		}
	}
	Ok(())
}

fn write_indented(sink: &mut dyn Write, depth: usize, text: &str) -> io::Result<()> {
	for _ in 0..depth {
		sink.write_all(INDENT.as_bytes())?;
	}
	writeln!(sink, "{text}")
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::filter::SearchScope;
	use crate::render::MASK;
	use crate::tree::{EntryId, PASSWORD_FIELD};

	fn rendered(tree: &KeyTree, criteria: &SearchCriteria, options: DisplayOptions) -> String {
		let mut sink = Vec::new();
		render_tree(tree, criteria, options, &mut sink).unwrap();
		String::from_utf8(sink).unwrap()
	}

	fn sample() -> (KeyTree, EntryId) {
		let mut tree = KeyTree::new("Root");
		let a = tree.add_group(tree.root(), "A");
		tree.add_group(a, "A1");
		tree.add_group(tree.root(), "B");
		let entry = tree.add_entry(a, "github");
		tree.add_field(entry, "UserName", Some("octo".into()));
		tree.add_field(entry, PASSWORD_FIELD, Some("hunter2".into()));
		tree.add_field(entry, "Notes", Some("team account\nrotate monthly".into()));
		(tree, entry)
	}

	#[test]
	fn renders_the_exact_traversal_sequence() {
		let (tree, _) = sample();
		let out = rendered(&tree, &SearchCriteria::match_all(), DisplayOptions::default());

		// A's entry block and A's child subtree both come before sibling B.
		let expected = "\
Root
  A
    github
      UserName: octo
      Password: ******
      team account
      rotate monthly
    A1
  B
";
		assert_eq!(out, expected);
	}

	#[test]
	fn masked_and_unmasked_output_differ_only_in_the_password_line() {
		let (tree, _) = sample();
		let criteria = SearchCriteria::match_all();
		let masked = rendered(&tree, &criteria, DisplayOptions { mask_secrets: true });
		let plain = rendered(&tree, &criteria, DisplayOptions { mask_secrets: false });

		assert!(!masked.contains("hunter2"));
		assert!(plain.contains("hunter2"));

		let differing: Vec<(&str, &str)> = masked
			.lines()
			.zip(plain.lines())
			.filter(|(m, p)| m != p)
			.collect();
		assert_eq!(
			differing,
			[(
				format!("      Password: {MASK}").as_str(),
				"      Password: hunter2"
			)]
		);
	}

	#[test]
	fn filtered_out_entries_leave_headings_behind() {
		let (tree, _) = sample();
		let criteria = SearchCriteria::new(Some("nomatch".into()), SearchScope::AllFields);
		let out = rendered(&tree, &criteria, DisplayOptions::default());

		assert_eq!(out, "Root\n  A\n    A1\n  B\n");
	}

	#[test]
	fn search_narrows_entries_not_groups() {
		let (mut tree, _) = sample();
		let b = tree.group(tree.root()).groups()[1];
		let other = tree.add_entry(b, "gitlab");
		tree.add_field(other, "UserName", Some("octo".into()));

		let criteria = SearchCriteria::new(Some("github".into()), SearchScope::TitleOnly);
		let out = rendered(&tree, &criteria, DisplayOptions::default());
		assert!(out.contains("github"));
		assert!(!out.contains("gitlab"));
	}
}
