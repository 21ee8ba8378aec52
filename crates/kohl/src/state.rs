//! The makeup state model: which features are active and what they look like.
//!
//! One [`MakeupState`] exists per AR session. Selector views mutate it; the render pipeline never
//! reads it directly but takes a [`StateSnapshot`] once per frame, so UI mutations land at the
//! next frame boundary and a frame always composites against one consistent state.

use std::fmt;

use crate::preset::{self, FeatureParams, Preset};
use crate::topology::Zone;
use crate::Error;
use kohl_image::{BlendMode, Color};

/// A cosmetic feature the engine can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Blush,
    Eyeshadow,
    Lipstick,
    Eyebrow,
    Eyelash,
}

impl Feature {
    /// Fixed render priority: base layers first, fine detail last.
    ///
    /// Later entries composite on top of earlier ones. The order is a property of the feature,
    /// not of the sequence in which the user toggled things on.
    pub const ORDER: [Feature; 5] = [
        Feature::Blush,
        Feature::Eyeshadow,
        Feature::Lipstick,
        Feature::Eyebrow,
        Feature::Eyelash,
    ];

    /// The pixel-combination function used when layering this feature onto the frame.
    pub fn blend_mode(self) -> BlendMode {
        match self {
            // Blush sits in the skin like a foundation-adjacent tint.
            Feature::Blush => BlendMode::Multiply,
            Feature::Eyeshadow => BlendMode::Overlay,
            Feature::Lipstick | Feature::Eyebrow | Feature::Eyelash => BlendMode::Normal,
        }
    }

    /// The cosmetic zones this feature paints.
    pub fn zones(self) -> &'static [Zone] {
        match self {
            Feature::Blush => &[Zone::LeftCheek, Zone::RightCheek],
            Feature::Eyeshadow => &[Zone::LeftEyeshadow, Zone::RightEyeshadow],
            Feature::Lipstick => &[Zone::Lips],
            Feature::Eyebrow => &[Zone::LeftBrow, Zone::RightBrow],
            Feature::Eyelash => &[Zone::LeftLashLine, Zone::RightLashLine],
        }
    }

    fn index(self) -> usize {
        match self {
            Feature::Blush => 0,
            Feature::Eyeshadow => 1,
            Feature::Lipstick => 2,
            Feature::Eyebrow => 3,
            Feature::Eyelash => 4,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Feature::Blush => "blush",
            Feature::Eyeshadow => "eyeshadow",
            Feature::Lipstick => "lipstick",
            Feature::Eyebrow => "eyebrow",
            Feature::Eyelash => "eyelash",
        };
        f.write_str(name)
    }
}

/// Per-feature selection state.
#[derive(Debug, Clone)]
struct FeatureState {
    active: bool,
    preset: &'static Preset,
    color_override: Option<Color>,
}

impl FeatureState {
    fn initial(feature: Feature) -> Self {
        Self {
            active: false,
            // Catalogs are validated non-empty at load time.
            preset: &preset::catalog(feature)[0],
            color_override: None,
        }
    }

    fn effective_params(&self) -> FeatureParams {
        match self.color_override {
            Some(color) => self.preset.params.with_color(color),
            None => self.preset.params,
        }
    }
}

/// The mutable makeup selection for one AR session.
///
/// All operations are synchronous and have no side effects beyond the state mutation itself.
/// Exactly one preset or raw color is effective per feature at any time; whichever of
/// [`MakeupState::select_preset`] and [`MakeupState::set_color`] ran last wins.
#[derive(Debug, Clone)]
pub struct MakeupState {
    features: [FeatureState; 5],
    target: Feature,
}

impl MakeupState {
    /// Creates a fresh state: every feature inactive, defaulted to the first preset of its
    /// catalog, with lipstick as the initial target for raw color edits.
    pub fn new() -> Self {
        Self {
            features: Feature::ORDER.map(FeatureState::initial),
            target: Feature::Lipstick,
        }
    }

    fn slot(&self, feature: Feature) -> &FeatureState {
        &self.features[feature.index()]
    }

    fn slot_mut(&mut self, feature: Feature) -> &mut FeatureState {
        &mut self.features[feature.index()]
    }

    /// Flips the feature's active flag, returning the new value.
    pub fn toggle_feature(&mut self, feature: Feature) -> bool {
        let slot = self.slot_mut(feature);
        slot.active = !slot.active;
        log::debug!(
            "{feature} {}",
            if slot.active { "activated" } else { "deactivated" }
        );
        slot.active
    }

    pub fn is_feature_active(&self, feature: Feature) -> bool {
        self.slot(feature).active
    }

    /// Makes `feature` the target of subsequent [`MakeupState::set_color`] calls.
    pub fn target(&mut self, feature: Feature) {
        self.target = feature;
    }

    /// The feature currently targeted for raw color edits.
    pub fn targeted(&self) -> Feature {
        self.target
    }

    /// Sets a raw override color (hex string) on the currently targeted feature.
    ///
    /// The override replaces the preset's color but keeps its other parameters. A malformed
    /// string fails with [`Error::InvalidColor`] and leaves the state untouched.
    pub fn set_color(&mut self, hex: &str) -> Result<Color, Error> {
        let color = Color::from_hex(hex)?;
        let target = self.target;
        self.slot_mut(target).color_override = Some(color);
        log::debug!("{target} color override set to {color:?}");
        Ok(color)
    }

    /// Selects a preset from the feature's catalog.
    ///
    /// Replaces the effective preset and clears any raw color override (last write wins). An
    /// unknown name fails with [`Error::UnknownPreset`] and leaves the prior selection in place.
    pub fn select_preset(&mut self, feature: Feature, name: &str) -> Result<(), Error> {
        let preset = preset::lookup(feature, name).ok_or_else(|| Error::UnknownPreset {
            feature,
            name: name.to_string(),
        })?;
        let slot = self.slot_mut(feature);
        slot.preset = preset;
        slot.color_override = None;
        log::debug!("{feature} preset set to `{name}`");
        Ok(())
    }

    /// The name of the feature's currently selected preset.
    pub fn selected_preset(&self, feature: Feature) -> &'static str {
        &self.slot(feature).preset.name
    }

    /// The merged parameter set for the feature: preset defaults with any raw color override
    /// applied.
    pub fn effective_params(&self, feature: Feature) -> FeatureParams {
        self.slot(feature).effective_params()
    }

    /// Returns the state to its just-constructed configuration. Called on session end.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Takes an immutable copy for one frame's compositing pass.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            features: Feature::ORDER.map(|f| {
                let slot = self.slot(f);
                (slot.active, slot.effective_params())
            }),
        }
    }
}

impl Default for MakeupState {
    fn default() -> Self {
        Self::new()
    }
}

/// An immutable copy of the makeup state, taken once per frame.
///
/// Every layer of a frame is planned against the same snapshot, so a selector mutation arriving
/// mid-frame cannot tear the composite.
#[derive(Debug, Clone)]
pub struct StateSnapshot {
    features: [(bool, FeatureParams); 5],
}

impl StateSnapshot {
    pub fn is_active(&self, feature: Feature) -> bool {
        self.features[feature.index()].0
    }

    pub fn effective_params(&self, feature: Feature) -> FeatureParams {
        self.features[feature.index()].1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_is_identity() {
        let mut state = MakeupState::new();
        for feature in Feature::ORDER {
            let before = state.is_feature_active(feature);
            state.toggle_feature(feature);
            state.toggle_feature(feature);
            assert_eq!(state.is_feature_active(feature), before);
        }
    }

    #[test]
    fn select_preset_roundtrips_catalog_params() {
        let mut state = MakeupState::new();
        state.select_preset(Feature::Lipstick, "Classic Red").unwrap();
        let expected = preset::lookup(Feature::Lipstick, "Classic Red").unwrap();
        assert_eq!(state.effective_params(Feature::Lipstick), expected.params);
    }

    #[test]
    fn unknown_preset_leaves_state_unchanged() {
        let mut state = MakeupState::new();
        state.select_preset(Feature::Lipstick, "Berry").unwrap();
        let before = state.effective_params(Feature::Lipstick);

        let err = state
            .select_preset(Feature::Lipstick, "nonexistent")
            .unwrap_err();
        assert!(matches!(err, Error::UnknownPreset { .. }));
        assert_eq!(state.effective_params(Feature::Lipstick), before);
        assert_eq!(state.selected_preset(Feature::Lipstick), "Berry");
    }

    #[test]
    fn color_override_keeps_other_params() {
        let mut state = MakeupState::new();
        state.select_preset(Feature::Lipstick, "Classic Red").unwrap();
        state.target(Feature::Lipstick);
        state.set_color("#00ff00").unwrap();

        let params = state.effective_params(Feature::Lipstick);
        assert_eq!(params.color(), Color::from_rgb8(0, 255, 0));
        assert_eq!(params.weight(), 0.7, "opacity must survive the override");
    }

    #[test]
    fn invalid_color_is_rejected_without_effect() {
        let mut state = MakeupState::new();
        state.target(Feature::Blush);
        let before = state.effective_params(Feature::Blush);
        assert!(matches!(
            state.set_color("not-a-color"),
            Err(Error::InvalidColor(_))
        ));
        assert_eq!(state.effective_params(Feature::Blush), before);
    }

    #[test]
    fn preset_selection_clears_override() {
        let mut state = MakeupState::new();
        state.target(Feature::Lipstick);
        state.set_color("#123456").unwrap();
        state.select_preset(Feature::Lipstick, "Classic Red").unwrap();
        assert_eq!(
            state.effective_params(Feature::Lipstick).color(),
            Color::from_rgb8(211, 39, 42),
        );
    }

    #[test]
    fn snapshot_is_isolated_from_later_mutation() {
        let mut state = MakeupState::new();
        state.toggle_feature(Feature::Blush);
        let snapshot = state.snapshot();
        state.toggle_feature(Feature::Blush);

        assert!(snapshot.is_active(Feature::Blush));
        assert!(!state.is_feature_active(Feature::Blush));
    }
}
