//! UI binding rows for preset pickers.
//!
//! Selector views are deliberately thin: they render the rows produced here and call back into
//! [`MakeupState`] operations (`toggle_feature`, `select_preset`, `set_color`). This module is
//! the whole contract; no widget code lives in the engine.

use crate::preset;
use crate::state::{Feature, MakeupState};

/// One row of a feature's preset picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorEntry {
    pub name: &'static str,
    pub description: &'static str,
    /// Whether this preset is the feature's current selection.
    pub selected: bool,
}

/// The picker rows for `feature`, in catalog order.
///
/// Exactly one row is marked selected; a raw color override does not change which preset is
/// considered selected.
pub fn entries(state: &MakeupState, feature: Feature) -> Vec<SelectorEntry> {
    let current = state.selected_preset(feature);
    preset::catalog(feature)
        .iter()
        .map(|p| SelectorEntry {
            name: &p.name,
            description: &p.description,
            selected: p.name == current,
        })
        .collect()
}
