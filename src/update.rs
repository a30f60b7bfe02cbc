//! Producer-side staging area.
//!
//! Every producer call validates its input and records a delta here. Nothing
//! in this module touches committed data; the render thread drains the buffer
//! once per frame through [`crate::sync::synchronize`].

use crate::error::{LengthError, PlotError, Result};
use crate::group::{GROUP_SLOTS, GroupId};
use crate::render::Color;
use crate::series::{MAX_SERIES, SampleKind, SeriesId};
use crate::view::VisualizationMode;

/// Pending delta for one series slot.
#[derive(Debug, Clone, Default)]
pub struct SeriesUpdate {
    pub(crate) xs: Vec<f64>,
    pub(crate) ys: Vec<f64>,
    pub(crate) color: Option<Color>,
    pub(crate) name: Option<String>,
    pub(crate) cleared: bool,
    /// Sample kind the slot resolved to. Survives frame resets until the slot
    /// is cleared so committed data never mixes kinds.
    pub(crate) kind: Option<SampleKind>,
    pub(crate) dirty: bool,
}

impl SeriesUpdate {
    /// Check whether the delta carries anything to merge.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Pending Y values.
    pub fn pending_len(&self) -> usize {
        self.ys.len()
    }

    /// Sample kind the slot currently accepts, if resolved.
    pub fn kind(&self) -> Option<SampleKind> {
        self.kind
    }

    fn check_kind(&self, series: SeriesId, kind: SampleKind) -> Result<()> {
        match self.kind {
            Some(pending) if pending != kind => Err(PlotError::ArityConflict {
                series: series.get(),
                pending,
            }),
            _ => Ok(()),
        }
    }

    fn clear(&mut self) {
        self.xs.clear();
        self.ys.clear();
        self.kind = None;
        self.cleared = true;
        self.dirty = true;
    }

    fn push_numbers(&mut self, ys: &[f64]) {
        self.kind = Some(SampleKind::Numbers);
        self.ys.extend_from_slice(ys);
        self.dirty = true;
    }

    fn push_points(&mut self, xs: impl IntoIterator<Item = f64>, ys: impl IntoIterator<Item = f64>) {
        self.kind = Some(SampleKind::Points);
        self.xs.extend(xs);
        self.ys.extend(ys);
        self.dirty = true;
    }

    fn reset(&mut self) {
        self.xs.clear();
        self.ys.clear();
        self.color = None;
        self.name = None;
        self.cleared = false;
        self.dirty = false;
    }
}

/// Pending delta for one group slot.
#[derive(Debug, Clone, Default)]
pub struct GroupUpdate {
    pub(crate) added: Vec<SeriesId>,
    pub(crate) removed: Vec<SeriesId>,
    pub(crate) name: Option<String>,
    pub(crate) cleared: bool,
    pub(crate) dirty: bool,
}

impl GroupUpdate {
    /// Check whether the delta carries anything to merge.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn add(&mut self, series: SeriesId) {
        self.added.push(series);
        self.dirty = true;
    }

    fn remove(&mut self, series: SeriesId) {
        self.removed.push(series);
        self.dirty = true;
    }

    fn clear(&mut self) {
        self.added.clear();
        self.removed.clear();
        self.cleared = true;
        self.dirty = true;
    }

    fn reset(&mut self) {
        self.added.clear();
        self.removed.clear();
        self.name = None;
        self.cleared = false;
        self.dirty = false;
    }
}

/// All deltas accumulated between two frames plus the top-level session
/// state producers control.
#[derive(Debug, Clone)]
pub struct UpdateBuffer {
    pub(crate) series: Vec<SeriesUpdate>,
    pub(crate) groups: Vec<GroupUpdate>,
    pub(crate) visible_group: GroupId,
    pub(crate) mode: VisualizationMode,
    pub(crate) window_visible: bool,
    /// Bumped on every request to show the window.
    pub(crate) show_requests: u64,
    pub(crate) full_precision: bool,
}

impl Default for UpdateBuffer {
    fn default() -> Self {
        Self {
            series: vec![SeriesUpdate::default(); MAX_SERIES],
            groups: vec![GroupUpdate::default(); GROUP_SLOTS],
            visible_group: GroupId::DEFAULT,
            mode: VisualizationMode::default(),
            window_visible: false,
            show_requests: 0,
            full_precision: false,
        }
    }
}

impl UpdateBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending delta of a series slot.
    pub fn series(&self, series: SeriesId) -> &SeriesUpdate {
        &self.series[series.slot()]
    }

    /// Pending delta of a group slot.
    pub fn group(&self, group: GroupId) -> &GroupUpdate {
        &self.groups[group.slot()]
    }

    /// Check whether no slot has a pending delta.
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|update| !update.dirty)
            && self.groups.iter().all(|update| !update.dirty)
    }

    /// Requested window visibility.
    pub fn window_visible(&self) -> bool {
        self.window_visible
    }

    /// Requested visualization mode.
    pub fn mode(&self) -> VisualizationMode {
        self.mode
    }

    /// Requested visible group.
    pub fn visible_group(&self) -> GroupId {
        self.visible_group
    }

    /// Append Y values.
    pub fn append_numbers(&mut self, series: SeriesId, ys: &[f64]) -> Result<()> {
        let update = &mut self.series[series.slot()];
        update.check_kind(series, SampleKind::Numbers)?;
        update.push_numbers(ys);
        Ok(())
    }

    /// Append (x, y) pairs from separate arrays.
    pub fn append_points(&mut self, series: SeriesId, xs: &[f64], ys: &[f64]) -> Result<()> {
        check_pair_lengths(xs, ys)?;
        let update = &mut self.series[series.slot()];
        update.check_kind(series, SampleKind::Points)?;
        update.push_points(xs.iter().copied(), ys.iter().copied());
        Ok(())
    }

    /// Append (x, y) pairs from an `[x0, y0, x1, y1, ..]` array.
    pub fn append_interleaved(&mut self, series: SeriesId, xy: &[f64]) -> Result<()> {
        check_interleaved_length(xy)?;
        let update = &mut self.series[series.slot()];
        update.check_kind(series, SampleKind::Points)?;
        update.push_points(
            xy.iter().step_by(2).copied(),
            xy.iter().skip(1).step_by(2).copied(),
        );
        Ok(())
    }

    /// Replace the series with Y values.
    pub fn replace_numbers(&mut self, series: SeriesId, ys: &[f64]) -> Result<()> {
        let update = &mut self.series[series.slot()];
        update.clear();
        update.push_numbers(ys);
        Ok(())
    }

    /// Replace the series with (x, y) pairs from separate arrays.
    pub fn replace_points(&mut self, series: SeriesId, xs: &[f64], ys: &[f64]) -> Result<()> {
        check_pair_lengths(xs, ys)?;
        let update = &mut self.series[series.slot()];
        update.clear();
        update.push_points(xs.iter().copied(), ys.iter().copied());
        Ok(())
    }

    /// Replace the series with (x, y) pairs from an interleaved array.
    pub fn replace_interleaved(&mut self, series: SeriesId, xy: &[f64]) -> Result<()> {
        check_interleaved_length(xy)?;
        let update = &mut self.series[series.slot()];
        update.clear();
        update.push_points(
            xy.iter().step_by(2).copied(),
            xy.iter().skip(1).step_by(2).copied(),
        );
        Ok(())
    }

    /// Drop all samples of the series.
    pub fn clear_series(&mut self, series: SeriesId) {
        self.series[series.slot()].clear();
    }

    /// Override the series color.
    pub fn set_series_color(&mut self, series: SeriesId, color: Color) {
        let update = &mut self.series[series.slot()];
        update.color = Some(color);
        update.dirty = true;
    }

    /// Override the series display name.
    pub fn set_series_name(&mut self, series: SeriesId, name: impl Into<String>) {
        let update = &mut self.series[series.slot()];
        update.name = Some(name.into());
        update.dirty = true;
    }

    /// Add a series to a group.
    pub fn add_member(&mut self, group: GroupId, series: SeriesId) {
        self.groups[group.slot()].add(series);
    }

    /// Remove every occurrence of a series from a group.
    pub fn remove_member(&mut self, group: GroupId, series: SeriesId) {
        self.groups[group.slot()].remove(series);
    }

    /// Drop all members of a group.
    pub fn clear_group(&mut self, group: GroupId) {
        self.groups[group.slot()].clear();
    }

    /// Override the group display name.
    pub fn set_group_name(&mut self, group: GroupId, name: impl Into<String>) {
        let update = &mut self.groups[group.slot()];
        update.name = Some(name.into());
        update.dirty = true;
    }

    /// Select the group to draw and make the window visible.
    pub fn show_group(&mut self, group: GroupId) {
        self.visible_group = group;
        self.set_window_visible(true);
    }

    /// Add a series to the default group, select it and make the window
    /// visible.
    ///
    /// When another group was selected the default group starts over, so
    /// only series shown since the switch are drawn.
    pub fn show_series(&mut self, series: SeriesId) {
        if !self.visible_group.is_default() {
            self.clear_group(GroupId::DEFAULT);
        }
        self.add_member(GroupId::DEFAULT, series);
        self.show_group(GroupId::DEFAULT);
    }

    /// Remove a series from the default group.
    pub fn hide_series(&mut self, series: SeriesId) {
        self.remove_member(GroupId::DEFAULT, series);
    }

    /// Remove every series from the default group.
    pub fn hide_all_series(&mut self) {
        self.clear_group(GroupId::DEFAULT);
    }

    /// Replace the visualization mode.
    pub fn set_mode(&mut self, mode: VisualizationMode) {
        self.mode = mode;
    }

    /// Request window visibility.
    pub fn set_window_visible(&mut self, visible: bool) {
        if visible {
            self.show_requests += 1;
        }
        self.window_visible = visible;
    }

    /// Hide the window after a user close, unless a show request arrived
    /// after the synchronization that observed `seen_requests`.
    ///
    /// Returns whether the window was hidden.
    pub(crate) fn close_window(&mut self, seen_requests: u64) -> bool {
        if self.show_requests != seen_requests {
            return false;
        }
        self.window_visible = false;
        true
    }

    /// Render tick labels with full `f64` precision.
    pub fn set_full_precision(&mut self, enabled: bool) {
        self.full_precision = enabled;
    }

    /// Clear every series and every group.
    pub fn clear_all(&mut self) {
        self.series.iter_mut().for_each(SeriesUpdate::clear);
        self.groups.iter_mut().for_each(GroupUpdate::clear);
    }

    /// Mark every slot empty after a merge. Resolved sample kinds are kept.
    pub(crate) fn reset(&mut self) {
        for update in self.series.iter_mut().filter(|update| update.dirty) {
            update.reset();
        }
        for update in self.groups.iter_mut().filter(|update| update.dirty) {
            update.reset();
        }
    }
}

fn check_pair_lengths(xs: &[f64], ys: &[f64]) -> Result<()> {
    if xs.len() != ys.len() {
        return Err(LengthError::Mismatch {
            x_len: xs.len(),
            y_len: ys.len(),
        }
        .into());
    }
    Ok(())
}

fn check_interleaved_length(xy: &[f64]) -> Result<()> {
    if xy.len() % 2 != 0 {
        return Err(LengthError::OddInterleaved { len: xy.len() }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(index: u32) -> SeriesId {
        SeriesId::new(index).unwrap()
    }

    fn group(index: u32) -> GroupId {
        GroupId::new(index).unwrap()
    }

    #[test]
    fn append_accumulates_in_call_order() {
        let mut buffer = UpdateBuffer::new();
        buffer.append_numbers(id(0), &[1.0, 2.0]).unwrap();
        buffer.append_numbers(id(0), &[3.0]).unwrap();
        let update = buffer.series(id(0));
        assert!(update.is_dirty());
        assert_eq!(update.pending_len(), 3);
        assert_eq!(update.ys, vec![1.0, 2.0, 3.0]);
        assert!(update.xs.is_empty());
        assert_eq!(update.kind(), Some(SampleKind::Numbers));
    }

    #[test]
    fn replace_coalesces_to_tail() {
        let mut buffer = UpdateBuffer::new();
        buffer.append_numbers(id(2), &[1.0, 2.0]).unwrap();
        buffer.replace_numbers(id(2), &[9.0]).unwrap();
        buffer.append_numbers(id(2), &[8.0]).unwrap();
        let update = buffer.series(id(2));
        assert!(update.cleared);
        assert_eq!(update.ys, vec![9.0, 8.0]);
    }

    #[test]
    fn interleaved_points_are_split() {
        let mut buffer = UpdateBuffer::new();
        buffer
            .append_interleaved(id(3), &[0.0, 5.0, 10.0, 6.0])
            .unwrap();
        let update = buffer.series(id(3));
        assert_eq!(update.xs, vec![0.0, 10.0]);
        assert_eq!(update.ys, vec![5.0, 6.0]);
    }

    #[test]
    fn malformed_lengths_are_rejected_without_mutation() {
        let mut buffer = UpdateBuffer::new();
        buffer.append_points(id(1), &[0.0], &[1.0]).unwrap();

        assert_eq!(
            buffer.append_interleaved(id(1), &[1.0, 2.0, 3.0]),
            Err(PlotError::MalformedLength(LengthError::OddInterleaved { len: 3 }))
        );
        assert_eq!(
            buffer.replace_points(id(1), &[1.0, 2.0], &[1.0]),
            Err(PlotError::MalformedLength(LengthError::Mismatch { x_len: 2, y_len: 1 }))
        );

        let update = buffer.series(id(1));
        assert!(!update.cleared);
        assert_eq!(update.xs, vec![0.0]);
        assert_eq!(update.ys, vec![1.0]);
    }

    #[test]
    fn arity_conflict_keeps_buffered_data() {
        let mut buffer = UpdateBuffer::new();
        buffer.append_points(id(4), &[1.0], &[2.0]).unwrap();
        assert_eq!(
            buffer.append_numbers(id(4), &[7.0]),
            Err(PlotError::ArityConflict {
                series: 4,
                pending: SampleKind::Points
            })
        );
        let update = buffer.series(id(4));
        assert_eq!(update.xs, vec![1.0]);
        assert_eq!(update.ys, vec![2.0]);
    }

    #[test]
    fn replace_switches_sample_kind() {
        let mut buffer = UpdateBuffer::new();
        buffer.append_numbers(id(5), &[1.0]).unwrap();
        buffer.replace_points(id(5), &[0.0], &[1.0]).unwrap();
        assert_eq!(buffer.series(id(5)).kind(), Some(SampleKind::Points));
    }

    #[test]
    fn resolved_kind_survives_reset() {
        let mut buffer = UpdateBuffer::new();
        buffer.append_numbers(id(6), &[1.0]).unwrap();
        buffer.reset();
        assert!(buffer.is_empty());
        assert!(buffer.append_points(id(6), &[0.0], &[0.0]).is_err());
        buffer.clear_series(id(6));
        assert!(buffer.append_points(id(6), &[0.0], &[0.0]).is_ok());
    }

    #[test]
    fn duplicate_membership_is_recorded_once_merged() {
        let mut buffer = UpdateBuffer::new();
        buffer.add_member(group(5), id(1));
        buffer.add_member(group(5), id(1));
        assert_eq!(buffer.group(group(5)).added, vec![id(1), id(1)]);
    }

    #[test]
    fn membership_calls_keep_both_lists() {
        let mut buffer = UpdateBuffer::new();
        buffer.remove_member(group(1), id(3));
        buffer.add_member(group(1), id(3));
        buffer.add_member(group(1), id(4));
        let update = buffer.group(group(1));
        assert_eq!(update.added, vec![id(3), id(4)]);
        assert_eq!(update.removed, vec![id(3)]);
    }

    #[test]
    fn show_series_restarts_default_group_after_switch() {
        let mut buffer = UpdateBuffer::new();
        buffer.show_series(id(0));
        assert!(!buffer.group(GroupId::DEFAULT).cleared);
        assert!(buffer.window_visible());

        buffer.show_group(group(2));
        buffer.show_series(id(1));
        let update = buffer.group(GroupId::DEFAULT);
        assert!(update.cleared);
        assert_eq!(update.added, vec![id(1)]);
        assert_eq!(buffer.visible_group(), GroupId::DEFAULT);
    }

    #[test]
    fn hide_series_targets_default_group() {
        let mut buffer = UpdateBuffer::new();
        buffer.hide_series(id(7));
        assert_eq!(buffer.group(GroupId::DEFAULT).removed, vec![id(7)]);
        buffer.hide_all_series();
        assert!(buffer.group(GroupId::DEFAULT).cleared);
    }

    #[test]
    fn reset_drops_deltas_but_keeps_session_state() {
        let mut buffer = UpdateBuffer::new();
        buffer.set_series_name(id(0), "temp");
        buffer.set_series_color(id(0), Color::BLACK);
        buffer.set_group_name(group(0), "sensors");
        buffer.set_mode(VisualizationMode::Interactive);
        buffer.show_group(group(0));
        buffer.reset();

        assert!(buffer.is_empty());
        assert_eq!(buffer.series(id(0)).name, None);
        assert_eq!(buffer.series(id(0)).color, None);
        assert_eq!(buffer.group(group(0)).name, None);
        assert_eq!(buffer.mode(), VisualizationMode::Interactive);
        assert_eq!(buffer.visible_group(), group(0));
        assert!(buffer.window_visible());
    }

    #[test]
    fn clear_all_marks_every_slot() {
        let mut buffer = UpdateBuffer::new();
        buffer.append_numbers(id(9), &[1.0]).unwrap();
        buffer.clear_all();
        assert!(buffer.series.iter().all(|update| update.cleared && update.ys.is_empty()));
        assert!(buffer.groups.iter().all(|update| update.cleared));
        assert_eq!(buffer.series(id(9)).kind(), None);
    }
}
