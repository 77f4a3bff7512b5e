//! The vault-engine boundary.
//!
//! A [`VaultEngine`] turns a raw byte stream plus a passphrase into a
//! materialized [`KeyTree`], or a typed failure. The viewer core consumes
//! only the resulting tree, never the raw bytes or the passphrase, so the
//! binary credential format and its decryption stay behind this trait.
//!
//! [`JsonEngine`] is the in-repo implementation: a plaintext JSON document
//! of nested groups. It needs no passphrase and exists so the viewer is
//! runnable and testable end to end; an encrypted-format engine would plug
//! into the same seam.

use std::io::{self, Read};

use serde::Deserialize;
use thiserror::Error;

use crate::tree::{GroupId, KeyTree};

/// Why a vault could not be materialized.
#[derive(Debug, Error)]
pub enum EngineError {
	/// The byte stream is not a vault in this engine's format.
	#[error("malformed vault: {0}")]
	Malformed(String),
	/// The format was recognized but the passphrase failed verification.
	#[error("wrong passphrase")]
	WrongPassphrase,
	#[error(transparent)]
	Io(#[from] io::Error),
}

/// A reader of one vault format.
pub trait VaultEngine {
	/// Whether [`load`](Self::load) makes any use of the passphrase. The
	/// caller skips prompting when it does not.
	fn requires_passphrase(&self) -> bool {
		true
	}

	/// Materialize the tree from `reader`.
	fn load(&self, reader: &mut dyn Read, passphrase: &str) -> Result<KeyTree, EngineError>;
}

/// Plaintext JSON vault reader.
///
/// The document is a single root group object:
///
/// ```json
/// {
///   "name": "Root",
///   "entries": [
///     { "title": "github",
///       "fields": [ { "name": "UserName", "value": "octo" } ] }
///   ],
///   "groups": [ { "name": "internet" } ]
/// }
/// ```
///
/// A field without a `"value"` key (or with `null`) stays absent, which is
/// distinct from `""` everywhere downstream.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonEngine;

#[derive(Debug, Deserialize)]
struct GroupDoc {
	name: String,
	#[serde(default)]
	entries: Vec<EntryDoc>,
	#[serde(default)]
	groups: Vec<GroupDoc>,
}

#[derive(Debug, Deserialize)]
struct EntryDoc {
	title: String,
	#[serde(default)]
	fields: Vec<FieldDoc>,
}

#[derive(Debug, Deserialize)]
struct FieldDoc {
	name: String,
	#[serde(default)]
	value: Option<String>,
}

impl VaultEngine for JsonEngine {
	fn requires_passphrase(&self) -> bool {
		false
	}

	fn load(&self, reader: &mut dyn Read, _passphrase: &str) -> Result<KeyTree, EngineError> {
		let root: GroupDoc = serde_json::from_reader(reader).map_err(|err| {
			if err.is_io() {
				EngineError::Io(io::Error::other(err))
			} else {
				EngineError::Malformed(err.to_string())
			}
		})?;
		Ok(materialize(root))
	}
}

/// Build the arena from the parsed document without recursing: a work stack
/// pairs each pending document group with its already-created arena id.
fn materialize(root: GroupDoc) -> KeyTree {
	let mut tree = KeyTree::new(root.name.clone());
	let mut pending: Vec<(GroupDoc, GroupId)> = vec![(root, tree.root())];

	while let Some((doc, id)) = pending.pop() {
		for entry_doc in doc.entries {
			let entry = tree.add_entry(id, entry_doc.title);
			for field in entry_doc.fields {
				tree.add_field(entry, field.name, field.value);
			}
		}
		// Reverse so the stack pops children in declaration order; entry
		// and field order inside each group is already settled above.
		for child in doc.groups.into_iter().rev() {
			let child_id = tree.add_group(id, child.name.clone());
			pending.push((child, child_id));
		}
	}
	tree
}
