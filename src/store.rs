//! Committed plotting state, owned by the render thread.

use crate::geom::ScreenRect;
use crate::group::{GROUP_SLOTS, Group, GroupId};
use crate::series::{MAX_SERIES, Series, SeriesId};
use crate::view::{Viewport, VisualizationMode};

/// Series and group slots plus the per-frame view state.
///
/// Only [`crate::sync::synchronize`] mutates slot data; the render loop owns
/// the viewport and plot screen.
#[derive(Debug, Clone)]
pub struct Store {
    pub(crate) series: Vec<Series>,
    pub(crate) groups: Vec<Group>,
    pub(crate) visible_group: GroupId,
    pub(crate) mode: VisualizationMode,
    pub(crate) window_visible: bool,
    pub(crate) show_requests: u64,
    pub(crate) full_precision: bool,
    pub(crate) viewport: Viewport,
    pub(crate) plot_screen: ScreenRect,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            series: vec![Series::default(); MAX_SERIES],
            groups: vec![Group::default(); GROUP_SLOTS],
            visible_group: GroupId::DEFAULT,
            mode: VisualizationMode::default(),
            window_visible: false,
            show_requests: 0,
            full_precision: false,
            viewport: Viewport::default(),
            plot_screen: ScreenRect::default(),
        }
    }
}

impl Store {
    /// Create a store with every slot empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed series slot.
    pub fn series(&self, series: SeriesId) -> &Series {
        &self.series[series.slot()]
    }

    /// Committed group slot.
    pub fn group(&self, group: GroupId) -> &Group {
        &self.groups[group.slot()]
    }

    /// Group being drawn.
    pub fn visible_group(&self) -> GroupId {
        self.visible_group
    }

    /// Members of the group being drawn.
    pub fn visible_members(&self) -> &[SeriesId] {
        self.group(self.visible_group).members()
    }

    /// Active visualization mode.
    pub fn mode(&self) -> VisualizationMode {
        self.mode
    }

    /// Check whether the window should be shown.
    pub fn is_window_visible(&self) -> bool {
        self.window_visible
    }

    /// Check whether tick labels use full precision.
    pub fn full_precision(&self) -> bool {
        self.full_precision
    }

    /// Plot-space range drawn by the last frame.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Screen rectangle the last frame drew series into.
    pub fn plot_screen(&self) -> ScreenRect {
        self.plot_screen
    }
}
