//! The preset catalog: named, immutable bundles of cosmetic effect parameters.
//!
//! The catalog is embedded as a language-agnostic JSON document (`presets.json`) and parsed once,
//! the first time it is touched. It is read-only for the life of the process; there is no
//! mutation API, so the tables can be shared freely without locking.
//!
//! Presets are duck-typed in the data file (each entry carries only the fields its feature cares
//! about) but strongly typed here: every feature kind has its own parameter struct, and
//! merge-with-defaults happens once at load time rather than at every property access.

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::state::Feature;
use kohl_image::Color;

/// Effective parameters for a lipstick layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LipParams {
    pub color: Color,
    /// Scales the blend weight.
    pub opacity: f32,
    /// Edge falloff, relative to the default lip feather.
    pub softness: f32,
}

/// Effective parameters for an eyeshadow layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowParams {
    pub color: Color,
    /// Scales the blend weight.
    pub intensity: f32,
    pub softness: f32,
}

/// Effective parameters for an eyebrow layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrowParams {
    pub color: Color,
    /// Vertical scale of the brow ridge mask about its centroid.
    pub thickness: f32,
    pub opacity: f32,
    pub softness: f32,
}

/// Effective parameters for an eyelash layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LashParams {
    pub color: Color,
    /// Lash extent relative to the default stroke, 1.0 being natural length.
    pub length: f32,
    /// Progressive lift of the lash tips toward the outer corner, 0.0 to 1.0.
    pub curl: f32,
    /// Stroke width multiplier.
    pub thickness: f32,
    pub softness: f32,
}

/// Effective parameters for a blush layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlushParams {
    pub color: Color,
    /// Scales the blend weight.
    pub intensity: f32,
    pub softness: f32,
}

/// The merged parameter set for one feature.
///
/// Geometry parameters (thickness, length, curl, softness) modulate the region mask before
/// blending; opacity and intensity scale the blend weight; only `color` is ever painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureParams {
    Lip(LipParams),
    Shadow(ShadowParams),
    Brow(BrowParams),
    Lash(LashParams),
    Blush(BlushParams),
}

impl FeatureParams {
    /// The layer's paint color.
    pub fn color(&self) -> Color {
        match self {
            FeatureParams::Lip(p) => p.color,
            FeatureParams::Shadow(p) => p.color,
            FeatureParams::Brow(p) => p.color,
            FeatureParams::Lash(p) => p.color,
            FeatureParams::Blush(p) => p.color,
        }
    }

    /// Returns a copy with the paint color replaced (raw color override).
    pub fn with_color(mut self, color: Color) -> Self {
        match &mut self {
            FeatureParams::Lip(p) => p.color = color,
            FeatureParams::Shadow(p) => p.color = color,
            FeatureParams::Brow(p) => p.color = color,
            FeatureParams::Lash(p) => p.color = color,
            FeatureParams::Blush(p) => p.color = color,
        }
        self
    }

    /// The factor by which this layer scales the blend weight (opacity or intensity).
    pub fn weight(&self) -> f32 {
        match self {
            FeatureParams::Lip(p) => p.opacity,
            FeatureParams::Shadow(p) => p.intensity,
            FeatureParams::Brow(p) => p.opacity,
            FeatureParams::Lash(_) => 1.0,
            FeatureParams::Blush(p) => p.intensity,
        }
    }

    /// Edge falloff factor for the layer's mask.
    pub fn softness(&self) -> f32 {
        match self {
            FeatureParams::Lip(p) => p.softness,
            FeatureParams::Shadow(p) => p.softness,
            FeatureParams::Brow(p) => p.softness,
            FeatureParams::Lash(p) => p.softness,
            FeatureParams::Blush(p) => p.softness,
        }
    }
}

/// A named, immutable bundle of cosmetic effect parameters.
///
/// Identified by name, unique within its feature's catalog. Created at load time and never
/// mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    pub description: String,
    pub params: FeatureParams,
}

/// Deserialization target for one catalog entry. Only `name` and `color` are required; every
/// effect parameter falls back to its feature's default.
#[derive(Deserialize)]
struct RawPreset {
    name: String,
    color: String,
    #[serde(default)]
    description: String,
    opacity: Option<f32>,
    intensity: Option<f32>,
    thickness: Option<f32>,
    curl: Option<f32>,
    length: Option<f32>,
    softness: Option<f32>,
}

#[derive(Deserialize)]
struct RawCatalog {
    lipstick: Vec<RawPreset>,
    eyeshadow: Vec<RawPreset>,
    eyebrow: Vec<RawPreset>,
    eyelash: Vec<RawPreset>,
    blush: Vec<RawPreset>,
}

struct Catalog {
    lipstick: Vec<Preset>,
    eyeshadow: Vec<Preset>,
    eyebrow: Vec<Preset>,
    eyelash: Vec<Preset>,
    blush: Vec<Preset>,
}

static CATALOG: Lazy<Catalog> = Lazy::new(|| {
    let raw: RawCatalog =
        serde_json::from_str(include_str!("../presets.json")).expect("malformed builtin catalog");
    Catalog {
        lipstick: convert(raw.lipstick, Feature::Lipstick),
        eyeshadow: convert(raw.eyeshadow, Feature::Eyeshadow),
        eyebrow: convert(raw.eyebrow, Feature::Eyebrow),
        eyelash: convert(raw.eyelash, Feature::Eyelash),
        blush: convert(raw.blush, Feature::Blush),
    }
});

fn convert(raw: Vec<RawPreset>, feature: Feature) -> Vec<Preset> {
    raw.into_iter()
        .map(|p| {
            let color = Color::from_hex(&p.color)
                .unwrap_or_else(|e| panic!("builtin catalog: preset `{}`: {e}", p.name));
            let params = match feature {
                Feature::Lipstick => FeatureParams::Lip(LipParams {
                    color,
                    opacity: p.opacity.unwrap_or(1.0),
                    softness: p.softness.unwrap_or(0.3),
                }),
                Feature::Eyeshadow => FeatureParams::Shadow(ShadowParams {
                    color,
                    intensity: p.intensity.unwrap_or(1.0),
                    softness: p.softness.unwrap_or(0.6),
                }),
                Feature::Eyebrow => FeatureParams::Brow(BrowParams {
                    color,
                    thickness: p.thickness.unwrap_or(1.0),
                    opacity: p.opacity.unwrap_or(1.0),
                    softness: p.softness.unwrap_or(0.2),
                }),
                Feature::Eyelash => FeatureParams::Lash(LashParams {
                    color,
                    length: p.length.unwrap_or(1.0),
                    curl: p.curl.unwrap_or(0.0),
                    thickness: p.thickness.unwrap_or(1.0),
                    softness: p.softness.unwrap_or(0.1),
                }),
                Feature::Blush => FeatureParams::Blush(BlushParams {
                    color,
                    intensity: p.intensity.unwrap_or(1.0),
                    softness: p.softness.unwrap_or(0.8),
                }),
            };
            Preset {
                name: p.name,
                description: p.description,
                params,
            }
        })
        .collect()
}

/// Returns the full catalog for one feature.
pub fn catalog(feature: Feature) -> &'static [Preset] {
    match feature {
        Feature::Lipstick => &CATALOG.lipstick,
        Feature::Eyeshadow => &CATALOG.eyeshadow,
        Feature::Eyebrow => &CATALOG.eyebrow,
        Feature::Eyelash => &CATALOG.eyelash,
        Feature::Blush => &CATALOG.blush,
    }
}

/// Looks up a preset by exact name.
pub fn lookup(feature: Feature, name: &str) -> Option<&'static Preset> {
    catalog(feature).iter().find(|p| p.name == name)
}
