//! Visual styling utilities.
//!
//! Every color the interactive browser uses comes out of a [`Theme`] value
//! injected by the caller; no widget hard-codes a color pair. Built-in
//! themes live in the `theme` submodule and are looked up by name.

mod theme;

pub use theme::{Theme, by_name, default_theme, names};
