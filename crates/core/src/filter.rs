//! Entry matching against search criteria.
//!
//! [`matches`] is the single predicate both renderers consult. It is total
//! and side-effect free: a well-formed tree in, a boolean out. Criteria are
//! explicit values threaded through every call, never process-wide state.

use crate::tree::{EntryId, KeyTree};

/// Where a search term is allowed to match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchScope {
	/// Match only the entry title.
	#[default]
	TitleOnly,
	/// Also check ancestor group names and all present field values.
	AllFields,
}

/// An optional substring term plus its scope.
///
/// Matching is exact byte containment: case-sensitive, no wildcards, no
/// regular expressions.
#[derive(Clone, Debug, Default)]
pub struct SearchCriteria {
	term: Option<String>,
	scope: SearchScope,
}

impl SearchCriteria {
	#[must_use]
	pub fn new(term: Option<String>, scope: SearchScope) -> Self {
		Self { term, scope }
	}

	/// Criteria without a term; every entry matches.
	#[must_use]
	pub fn match_all() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn term(&self) -> Option<&str> {
		self.term.as_deref()
	}

	#[must_use]
	pub fn scope(&self) -> SearchScope {
		self.scope
	}
}

/// Does `entry` satisfy `criteria`?
///
/// The checks run cheapest-first: title, then ancestor group names (starting
/// at the owning group, up to and including the root), then field values in
/// declaration order. Absent field values are skipped, never treated as
/// empty strings.
#[must_use]
pub fn matches(tree: &KeyTree, entry: EntryId, criteria: &SearchCriteria) -> bool {
	let Some(term) = criteria.term() else {
		return true;
	};

	let entry = tree.entry(entry);
	if entry.title().contains(term) {
		return true;
	}
	if criteria.scope() == SearchScope::TitleOnly {
		return false;
	}

	if tree
		.ancestors(entry.group())
		.any(|group| group.name().contains(term))
	{
		return true;
	}

	entry
		.fields()
		.iter()
		.filter_map(|id| tree.field(*id).value())
		.any(|value| value.contains(term))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn criteria(term: &str, scope: SearchScope) -> SearchCriteria {
		SearchCriteria::new(Some(term.into()), scope)
	}

	fn sample() -> (KeyTree, EntryId) {
		let mut tree = KeyTree::new("Root");
		let banking = tree.add_group(tree.root(), "banking");
		let entry = tree.add_entry(banking, "checking account");
		tree.add_field(entry, "UserName", Some("alice".into()));
		tree.add_field(entry, "URL", Some("https://bank.example".into()));
		(tree, entry)
	}

	#[test]
	fn no_term_always_matches() {
		let (tree, entry) = sample();
		assert!(matches(&tree, entry, &SearchCriteria::match_all()));
		assert!(matches(
			&tree,
			entry,
			&SearchCriteria::new(None, SearchScope::AllFields)
		));
	}

	#[test]
	fn title_substring_matches_in_both_scopes() {
		let (tree, entry) = sample();
		assert!(matches(&tree, entry, &criteria("check", SearchScope::TitleOnly)));
		assert!(matches(&tree, entry, &criteria("check", SearchScope::AllFields)));
	}

	#[test]
	fn matching_is_case_sensitive() {
		let (tree, entry) = sample();
		assert!(!matches(&tree, entry, &criteria("Checking", SearchScope::AllFields)));
	}

	#[test]
	fn title_only_never_inspects_fields_or_group_names() {
		// Field value and group name both contain the term; the title does
		// not. TitleOnly must still reject it.
		let (tree, entry) = sample();
		assert!(!matches(&tree, entry, &criteria("alice", SearchScope::TitleOnly)));
		assert!(!matches(&tree, entry, &criteria("banking", SearchScope::TitleOnly)));
	}

	#[test]
	fn all_fields_walks_ancestor_group_names() {
		let mut tree = KeyTree::new("vaults");
		let inner = tree.add_group(tree.root(), "personal");
		let deeper = tree.add_group(inner, "sites");
		let entry = tree.add_entry(deeper, "forum");

		// Owning group, intermediate ancestor, and the root all count.
		assert!(matches(&tree, entry, &criteria("sites", SearchScope::AllFields)));
		assert!(matches(&tree, entry, &criteria("personal", SearchScope::AllFields)));
		assert!(matches(&tree, entry, &criteria("vaults", SearchScope::AllFields)));
		assert!(!matches(&tree, entry, &criteria("work", SearchScope::AllFields)));
	}

	#[test]
	fn all_fields_checks_present_values_only() {
		let mut tree = KeyTree::new("Root");
		let entry = tree.add_entry(tree.root(), "plain");
		tree.add_field(entry, "Notes", None);

		// An absent value is skipped entirely, not treated as "".
		assert!(!matches(&tree, entry, &criteria("secret", SearchScope::AllFields)));

		let mut tree = KeyTree::new("Root");
		let entry = tree.add_entry(tree.root(), "plain");
		tree.add_field(entry, "Notes", Some("the secret place".into()));
		assert!(matches(&tree, entry, &criteria("secret", SearchScope::AllFields)));
	}
}
