//! Interactive terminal UI for `kdxview`.
//!
//! The crate splits along the seams the browser needs: a scoped terminal
//! [`Session`], a blocking [`InputSource`], the reusable bordered [`Menu`]
//! widget, and the [`Navigator`] state machine that drills through the
//! credential tree. Styling is injected through [`Theme`] values; nothing
//! here hard-codes a color.

pub mod components;
pub mod input;
pub mod menu;
pub mod navigator;
pub mod prompt;
pub mod session;
pub mod style;

pub use input::{InputSource, KeyboardInput, MenuAction};
pub use menu::{Menu, MenuItem, MenuOutcome};
pub use navigator::{NavigationState, Navigator, run_interactive};
pub use session::Session;
pub use style::{Theme, by_name, default_theme, names};
