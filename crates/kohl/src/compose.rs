//! Layer planning and frame compositing.
//!
//! [`plan`] turns one frame's landmarks and one state snapshot into an ordered list of
//! [`CompositeLayer`]s; [`composite`] merges those layers onto a frame buffer. Both are pure
//! functions of their inputs, which is what makes re-rendering a frame byte-identical.

use log::debug;

use crate::landmark::LandmarkFrame;
use crate::preset::FeatureParams;
use crate::region;
use crate::state::{Feature, StateSnapshot};
use crate::topology::Zone;
use crate::Error;
use kohl_image::{BlendMode, Color, Image, Mask, Resolution};

/// Feather radius at `softness == 1.0`, relative to the frame's smaller dimension.
const FEATHER_SCALE: f32 = 0.02;

/// One active feature's colored, masked contribution to a frame.
///
/// Layers are consumed by [`composite`] and die with the frame.
pub struct CompositeLayer {
    feature: Feature,
    mask: Mask,
    color: Color,
    weight: f32,
    mode: BlendMode,
}

impl CompositeLayer {
    #[inline]
    pub fn feature(&self) -> Feature {
        self.feature
    }

    #[inline]
    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// The layer's paint color, exactly as configured (presets included).
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// The blend weight: the feature's opacity or intensity parameter.
    #[inline]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    #[inline]
    pub fn mode(&self) -> BlendMode {
        self.mode
    }
}

/// Plans the composite layers for one frame.
///
/// Features are visited in [`Feature::ORDER`]; the returned layers are in that order, so
/// compositing them sequentially puts fine detail on top of base layers. The snapshot's active
/// set exactly determines which features can yield a layer; inactive features contribute
/// nothing, ever.
///
/// A zone whose landmarks are missing or malformed is skipped for this frame only; the feature
/// still yields a layer if any of its other zones derive. A feature with no derivable zone
/// yields no layer.
pub fn plan(
    snapshot: &StateSnapshot,
    frame: &LandmarkFrame,
    res: Resolution,
) -> Vec<CompositeLayer> {
    let mut layers = Vec::new();
    for feature in Feature::ORDER {
        if !snapshot.is_active(feature) {
            continue;
        }
        let params = snapshot.effective_params(feature);

        let mut mask: Option<Mask> = None;
        for &zone in feature.zones() {
            match derive_zone_mask(frame, zone, res, &params) {
                Ok(zone_mask) => match &mut mask {
                    Some(mask) => mask.union(&zone_mask),
                    None => mask = Some(zone_mask),
                },
                Err(err) => {
                    debug!("frame {}: skipping {zone}: {err}", frame.frame());
                }
            }
        }

        let Some(mask) = mask else { continue };
        layers.push(CompositeLayer {
            feature,
            mask,
            color: params.color(),
            weight: params.weight(),
            mode: feature.blend_mode(),
        });
    }
    layers
}

/// Derives one zone's coverage mask, applying the parameter set's geometry modulation.
///
/// Thickness, length and curl reshape the contour; softness feathers the rasterized mask. None
/// of them touch the paint color.
fn derive_zone_mask(
    frame: &LandmarkFrame,
    zone: Zone,
    res: Resolution,
    params: &FeatureParams,
) -> Result<Mask, Error> {
    let region = match params {
        FeatureParams::Lash(p) => {
            region::derive_stroke(frame, zone, res, p.length, p.curl, p.thickness)?
        }
        FeatureParams::Brow(p) => {
            let mut region = region::derive(frame, zone, res)?;
            region.scale_vertical(p.thickness);
            region
        }
        _ => region::derive(frame, zone, res)?,
    };

    let mut mask = region.to_mask(res);
    let radius = params.softness() * res.min_dim() as f32 * FEATHER_SCALE;
    mask.feather(radius);
    Ok(mask)
}

/// Merges `layers` onto `image` in order.
///
/// Idempotent per frame: the same image, frame and snapshot always produce the same bytes, and
/// no state accumulates across invocations.
pub fn composite(image: &mut Image, layers: &[CompositeLayer]) {
    for layer in layers {
        for (x, y, coverage) in layer.mask.iter_covered() {
            image.blend_pixel(x, y, layer.color, layer.mode, layer.weight * coverage);
        }
    }
}
