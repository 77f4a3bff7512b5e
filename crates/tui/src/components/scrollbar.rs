//! Scrollbar rendering for overflowing viewports.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::style::Theme;

/// Scrolling facts for a list viewport.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollMetrics {
	/// Total number of rows in the content.
	pub content_len: usize,
	/// Rows visible at once.
	pub viewport_len: usize,
	/// Whether the content overflows the viewport.
	pub overflowing: bool,
}

impl ScrollMetrics {
	/// Compute metrics for `content_len` rows in a viewport of
	/// `viewport_len` rows. Zero on either side means nothing to scroll.
	#[must_use]
	pub fn compute(content_len: usize, viewport_len: usize) -> Self {
		if content_len == 0 || viewport_len == 0 {
			return Self::default();
		}
		Self {
			content_len,
			viewport_len: viewport_len.min(content_len),
			overflowing: content_len > viewport_len,
		}
	}
}

/// Render a themed scrollbar along the right edge of `area` and return the
/// reduced area left for content. When nothing overflows the area comes
/// back untouched and no scrollbar is drawn.
pub fn render_scrollbar(
	frame: &mut Frame<'_>,
	area: Rect,
	metrics: ScrollMetrics,
	offset: usize,
	theme: &Theme,
) -> Rect {
	if !metrics.overflowing || area.width == 0 {
		return area;
	}

	let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
		.begin_symbol(None)
		.end_symbol(None)
		.track_symbol(Some("│"))
		.style(theme.border);

	let mut state = ScrollbarState::new(metrics.content_len)
		.viewport_content_length(metrics.viewport_len)
		.position(offset);

	let bar_area = Rect {
		x: area.x + area.width - 1,
		y: area.y,
		width: 1,
		height: area.height,
	};
	frame.render_stateful_widget(scrollbar, bar_area, &mut state);

	Rect {
		width: area.width - 1,
		..area
	}
}
