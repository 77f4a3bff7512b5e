//! Arena-backed credential tree.
//!
//! Groups, entries, and fields live in flat vectors owned by [`KeyTree`] and
//! reference each other through typed indices. Ordered child vectors stand in
//! for the sibling chains of the on-disk format, so declaration order is
//! preserved everywhere it is observable: traversal, menu listings, and
//! first-match-wins field lookup. Parent ids give every group a chain back to
//! the root, which the search scope rules walk.
//!
//! Ids are only meaningful for the tree that issued them. The tree is never
//! mutated after the vault engine finishes building it.

/// Name of the field whose value is masked by default.
pub const PASSWORD_FIELD: &str = "Password";

/// Name of the field rendered raw, without a `name:` prefix.
pub const NOTES_FIELD: &str = "Notes";

/// Index of a [`Group`] inside its [`KeyTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GroupId(usize);

/// Index of an [`Entry`] inside its [`KeyTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntryId(usize);

/// Index of a [`Field`] inside its [`KeyTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldId(usize);

/// A folder-like node containing entries and sub-groups.
#[derive(Debug, Clone)]
pub struct Group {
	name: String,
	parent: Option<GroupId>,
	entries: Vec<EntryId>,
	groups: Vec<GroupId>,
}

impl Group {
	/// The group's display name. Uniqueness among siblings is not guaranteed.
	#[must_use]
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Parent group, `None` only for the root.
	#[must_use]
	pub fn parent(&self) -> Option<GroupId> {
		self.parent
	}

	/// Child entries in declaration order.
	#[must_use]
	pub fn entries(&self) -> &[EntryId] {
		&self.entries
	}

	/// Child groups in declaration order.
	#[must_use]
	pub fn groups(&self) -> &[GroupId] {
		&self.groups
	}
}

/// A named credential record.
#[derive(Debug, Clone)]
pub struct Entry {
	title: String,
	group: GroupId,
	fields: Vec<FieldId>,
}

impl Entry {
	/// The entry's title.
	#[must_use]
	pub fn title(&self) -> &str {
		&self.title
	}

	/// The group that owns this entry.
	#[must_use]
	pub fn group(&self) -> GroupId {
		self.group
	}

	/// Fields in declaration order.
	#[must_use]
	pub fn fields(&self) -> &[FieldId] {
		&self.fields
	}
}

/// A name/value pair inside an entry.
///
/// An absent value is distinct from an empty string: it never matches a
/// search term and never renders a value line.
#[derive(Debug, Clone)]
pub struct Field {
	name: String,
	value: Option<String>,
}

impl Field {
	#[must_use]
	pub fn name(&self) -> &str {
		&self.name
	}

	#[must_use]
	pub fn value(&self) -> Option<&str> {
		self.value.as_deref()
	}

	/// Whether this field is subject to display masking.
	#[must_use]
	pub fn is_secret(&self) -> bool {
		self.name == PASSWORD_FIELD
	}
}

/// The materialized credential store.
#[derive(Debug, Clone)]
pub struct KeyTree {
	groups: Vec<Group>,
	entries: Vec<Entry>,
	fields: Vec<Field>,
	root: GroupId,
}

impl KeyTree {
	/// Create a tree holding a single empty root group.
	#[must_use]
	pub fn new(root_name: impl Into<String>) -> Self {
		let root = Group {
			name: root_name.into(),
			parent: None,
			entries: Vec::new(),
			groups: Vec::new(),
		};
		Self {
			groups: vec![root],
			entries: Vec::new(),
			fields: Vec::new(),
			root: GroupId(0),
		}
	}

	/// The root group.
	#[must_use]
	pub fn root(&self) -> GroupId {
		self.root
	}

	/// Append a sub-group under `parent` and return its id.
	pub fn add_group(&mut self, parent: GroupId, name: impl Into<String>) -> GroupId {
		let id = GroupId(self.groups.len());
		self.groups.push(Group {
			name: name.into(),
			parent: Some(parent),
			entries: Vec::new(),
			groups: Vec::new(),
		});
		self.groups[parent.0].groups.push(id);
		id
	}

	/// Append an entry under `group` and return its id.
	pub fn add_entry(&mut self, group: GroupId, title: impl Into<String>) -> EntryId {
		let id = EntryId(self.entries.len());
		self.entries.push(Entry {
			title: title.into(),
			group,
			fields: Vec::new(),
		});
		self.groups[group.0].entries.push(id);
		id
	}

	/// Append a field to `entry` and return its id.
	pub fn add_field(
		&mut self,
		entry: EntryId,
		name: impl Into<String>,
		value: Option<String>,
	) -> FieldId {
		let id = FieldId(self.fields.len());
		self.fields.push(Field {
			name: name.into(),
			value,
		});
		self.entries[entry.0].fields.push(id);
		id
	}

	#[must_use]
	pub fn group(&self, id: GroupId) -> &Group {
		&self.groups[id.0]
	}

	#[must_use]
	pub fn entry(&self, id: EntryId) -> &Entry {
		&self.entries[id.0]
	}

	#[must_use]
	pub fn field(&self, id: FieldId) -> &Field {
		&self.fields[id.0]
	}

	/// Number of entries in the whole tree.
	#[must_use]
	pub fn entry_count(&self) -> usize {
		self.entries.len()
	}

	/// First field of `entry` called `name`, in declaration order.
	///
	/// Duplicate field names are legal in the source format; the first one
	/// wins, matching the historical lookup behavior.
	#[must_use]
	pub fn find_field(&self, entry: EntryId, name: &str) -> Option<&Field> {
		self.entry(entry)
			.fields
			.iter()
			.map(|id| self.field(*id))
			.find(|field| field.name == name)
	}

	/// Present value of the first field of `entry` called `name`.
	#[must_use]
	pub fn field_value(&self, entry: EntryId, name: &str) -> Option<&str> {
		self.find_field(entry, name).and_then(Field::value)
	}

	/// Walk from `group` up to and including the root.
	pub fn ancestors(&self, group: GroupId) -> impl Iterator<Item = &Group> {
		Ancestors {
			tree: self,
			next: Some(group),
		}
	}

	/// Slash-joined names from the root down to `group`.
	///
	/// This is the trail the interactive browser shows as its title.
	#[must_use]
	pub fn group_path(&self, group: GroupId) -> String {
		let mut names: Vec<&str> = self.ancestors(group).map(Group::name).collect();
		names.reverse();
		names.join("/")
	}
}

struct Ancestors<'a> {
	tree: &'a KeyTree,
	next: Option<GroupId>,
}

impl<'a> Iterator for Ancestors<'a> {
	type Item = &'a Group;

	fn next(&mut self) -> Option<Self::Item> {
		let group = self.tree.group(self.next?);
		self.next = group.parent;
		Some(group)
	}
}
