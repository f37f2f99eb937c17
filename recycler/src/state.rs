/// A lightweight, serializable snapshot of the scroll geometry.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    /// Pixel offset from the content start.
    pub position: f32,
    pub viewport_size: f32,
    /// Full content extent, padding included.
    pub content_size: f32,
}

impl ScrollState {
    /// The scrollable distance (`content_size - viewport_size`).
    pub fn scroll_size(&self) -> f32 {
        self.content_size - self.viewport_size
    }
}

/// A resolved jump destination.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollTarget {
    pub data_index: usize,
    pub position: f32,
}
