use crate::{Axis, ScrollbarVisibility};

/// Configuration for [`crate::Scroller`].
///
/// Every field is plain data, so options are cheap to clone and can be tweaked through
/// [`crate::Scroller::update_options`], which rebuilds only what the change requires.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollerOptions {
    /// The scroll axis. `None` disables the scroller: queries return empty results and
    /// mutations are ignored.
    pub axis: Option<Axis>,

    /// Space between consecutive items.
    pub spacing: f32,
    /// Padding before the first item.
    pub padding_start: f32,
    /// Padding after the last item.
    pub padding_end: f32,

    /// Wrap the item sequence around seamlessly.
    pub loop_enabled: bool,

    pub scrollbar_visibility: ScrollbarVisibility,

    /// Viewport extent along the scroll axis.
    pub viewport_size: f32,
}

impl ScrollerOptions {
    pub fn new(axis: Axis, viewport_size: f32) -> Self {
        Self {
            axis: Some(axis),
            spacing: 0.0,
            padding_start: 0.0,
            padding_end: 0.0,
            loop_enabled: false,
            scrollbar_visibility: ScrollbarVisibility::default(),
            viewport_size,
        }
    }

    pub fn vertical(viewport_size: f32) -> Self {
        Self::new(Axis::Vertical, viewport_size)
    }

    pub fn horizontal(viewport_size: f32) -> Self {
        Self::new(Axis::Horizontal, viewport_size)
    }

    pub fn with_axis(mut self, axis: Option<Axis>) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_padding(mut self, padding_start: f32, padding_end: f32) -> Self {
        self.padding_start = padding_start;
        self.padding_end = padding_end;
        self
    }

    pub fn with_loop(mut self, loop_enabled: bool) -> Self {
        self.loop_enabled = loop_enabled;
        self
    }

    pub fn with_scrollbar_visibility(mut self, visibility: ScrollbarVisibility) -> Self {
        self.scrollbar_visibility = visibility;
        self
    }

    pub fn with_viewport_size(mut self, viewport_size: f32) -> Self {
        self.viewport_size = viewport_size;
        self
    }
}

impl Default for ScrollerOptions {
    fn default() -> Self {
        Self::vertical(0.0)
    }
}
