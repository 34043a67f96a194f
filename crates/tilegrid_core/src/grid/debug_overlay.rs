//! Per-tile debug color channel.

/// ARGB annotation per tile for diagnostic visualization.
///
/// The backing array only exists when enabled in the config, so
/// production grids carry no extra `width * height` allocation.
#[derive(Debug, Clone, Default)]
pub struct DebugOverlay {
    colors: Option<Vec<u32>>,
}

impl DebugOverlay {
    /// Create an overlay, allocating only if `enabled`.
    #[must_use]
    pub fn new(enabled: bool, tile_count: usize) -> Self {
        Self {
            colors: enabled.then(|| vec![0; tile_count]),
        }
    }

    /// Whether the backing array exists.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.colors.is_some()
    }

    pub(crate) fn set(&mut self, index: usize, argb: u32) {
        if let Some(colors) = &mut self.colors {
            colors[index] = argb;
        }
    }

    pub(crate) fn get(&self, index: usize) -> u32 {
        self.colors.as_ref().map_or(0, |colors| colors[index])
    }

    pub(crate) fn reset(&mut self) {
        if let Some(colors) = &mut self.colors {
            colors.fill(0);
        }
    }
}
