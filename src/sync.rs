//! Per-frame merge of the update buffer into the store.
//!
//! Inputs were validated when they entered the buffer, so a delta that does
//! not fit the committed slot is a bug and panics.

use crate::geom::Point;
use crate::group::Group;
use crate::series::{SampleKind, Series};
use crate::store::Store;
use crate::style::palette_color;
use crate::update::{GroupUpdate, SeriesUpdate, UpdateBuffer};
use crate::view::{Range, Viewport};

/// Slot counts merged by one [`synchronize`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Series slots merged.
    pub series: usize,
    /// Group slots merged.
    pub groups: usize,
}

/// Mirror session state into the store and, while the window is visible,
/// merge every pending delta and reset the buffer.
///
/// The caller holds the buffer lock for the whole call. While the window is
/// hidden the deltas stay buffered untouched.
pub fn synchronize(buffer: &mut UpdateBuffer, store: &mut Store) -> SyncStats {
    store.window_visible = buffer.window_visible;
    store.show_requests = buffer.show_requests;
    store.mode = buffer.mode;
    store.visible_group = buffer.visible_group;
    store.full_precision = buffer.full_precision;

    if !store.window_visible {
        return SyncStats::default();
    }

    let mut stats = SyncStats::default();
    for (slot, (update, series)) in buffer
        .series
        .iter_mut()
        .zip(store.series.iter_mut())
        .enumerate()
    {
        if update.dirty {
            merge_series(slot, update, series);
            stats.series += 1;
        }
    }
    for (slot, (update, group)) in buffer
        .groups
        .iter_mut()
        .zip(store.groups.iter_mut())
        .enumerate()
    {
        if update.dirty {
            merge_group(slot, update, group);
            stats.groups += 1;
        }
    }
    buffer.reset();

    if stats != SyncStats::default() {
        tracing::debug!(series = stats.series, groups = stats.groups, "Merged pending updates");
    }
    stats
}

fn merge_series(slot: usize, update: &mut SeriesUpdate, series: &mut Series) {
    if !series.is_initialized() {
        series.initialized = true;
        series.color = palette_color(slot);
        series.label = format!("[{slot}]");
    }
    if let Some(color) = update.color {
        series.color = color;
    }
    if let Some(name) = update.name.take() {
        series.label = format!("[{slot}] {name}");
    }

    if update.cleared || series.is_empty() {
        series.xs.clear();
        series.ys.clear();
        series.bounds = Viewport::EMPTY;
    }
    if update.pending_len() == 0 {
        return;
    }

    let begin = series.len();
    match update.kind {
        Some(SampleKind::Points) => {
            assert_eq!(
                update.xs.len(),
                update.pending_len(),
                "series {slot}: pending x and y lengths diverged"
            );
            assert!(
                begin == 0 || series.has_x(),
                "series {slot}: points merged into an index-mode series"
            );
            series.xs.extend_from_slice(&update.xs);
            series.ys.extend_from_slice(&update.ys);
            for (x, y) in update.xs.iter().zip(&update.ys) {
                series.bounds.include(Point::new(*x, *y));
            }
        }
        Some(SampleKind::Numbers) => {
            assert!(
                update.xs.is_empty() && series.xs.is_empty(),
                "series {slot}: numbers merged into a point series"
            );
            series.ys.extend_from_slice(&update.ys);
            for value in &update.ys {
                series.bounds.y.include(*value);
            }
            series.bounds.x = Range::new(0.0, (series.len() - 1) as f64);
        }
        None => panic!("series {slot}: pending samples without a sample kind"),
    }
}

fn merge_group(slot: usize, update: &mut GroupUpdate, group: &mut Group) {
    if !group.is_initialized() {
        group.initialized = true;
        group.label = format!("[{slot}] Plot Group");
    }
    if let Some(name) = update.name.take() {
        group.label = format!("[{slot}] {name}");
    }
    if update.cleared {
        group.members.clear();
    }
    for series in &update.added {
        group.insert(*series);
    }
    for series in &update.removed {
        group.remove(*series);
    }
}
