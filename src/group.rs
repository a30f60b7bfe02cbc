//! Committed group slots.

use std::fmt;

use crate::error::{PlotError, Result};
use crate::series::SeriesId;

/// Number of user-addressable group slots.
pub const MAX_GROUPS: usize = 256;

/// Total group slots including the reserved default group.
pub(crate) const GROUP_SLOTS: usize = MAX_GROUPS + 1;

/// Group slot identity: `[0, MAX_GROUPS)` or the reserved default group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(u32);

impl GroupId {
    /// Group used by the per-series `show`/`hide` convenience calls.
    pub const DEFAULT: Self = Self(MAX_GROUPS as u32);

    /// Validate a raw group index. The default group is not addressable.
    pub fn new(index: u32) -> Result<Self> {
        if (index as usize) < MAX_GROUPS {
            Ok(Self(index))
        } else {
            Err(PlotError::InvalidGroup {
                index,
                max: MAX_GROUPS as u32 - 1,
            })
        }
    }

    /// Raw slot index.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Check whether this is the reserved default group.
    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }

    pub(crate) fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named, ordered set of series shown together.
#[derive(Debug, Clone, Default)]
pub struct Group {
    pub(crate) members: Vec<SeriesId>,
    pub(crate) label: String,
    pub(crate) initialized: bool,
}

impl Group {
    /// Member series in insertion order, without duplicates.
    pub fn members(&self) -> &[SeriesId] {
        &self.members
    }

    /// Display label, `"[i] Plot Group"` or `"[i] name"`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Check whether the slot has ever been merged.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub(crate) fn insert(&mut self, series: SeriesId) {
        if !self.members.contains(&series) {
            self.members.push(series);
        }
    }

    pub(crate) fn remove(&mut self, series: SeriesId) {
        self.members.retain(|member| *member != series);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(index: u32) -> SeriesId {
        SeriesId::new(index).unwrap()
    }

    #[test]
    fn default_group_is_not_addressable() {
        assert!(GroupId::new(MAX_GROUPS as u32).is_err());
        assert_eq!(GroupId::DEFAULT.get(), MAX_GROUPS as u32);
        assert!(GroupId::DEFAULT.is_default());
        assert!(!GroupId::new(5).unwrap().is_default());
    }

    #[test]
    fn insert_skips_duplicates_and_remove_drops_all() {
        let mut group = Group::default();
        group.insert(id(1));
        group.insert(id(2));
        group.insert(id(1));
        assert_eq!(group.members(), &[id(1), id(2)]);
        group.members.push(id(2));
        group.remove(id(2));
        assert_eq!(group.members(), &[id(1)]);
    }
}
