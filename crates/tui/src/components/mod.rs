//! UI building blocks shared by the menu and the entry view.

pub mod scrollbar;

pub use scrollbar::{ScrollMetrics, render_scrollbar};
