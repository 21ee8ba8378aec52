//! Per-pixel blend modes for layering cosmetic effects onto a frame.

use crate::Color;

/// The pixel-combination function used when a layer is merged onto the pixels beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Straight non-premultiplied alpha compositing ("source over").
    Normal,
    /// Darkens the base proportionally to the source. Suits foundation-like tints that should
    /// sit *in* the skin rather than on top of it.
    Multiply,
    /// The inverse of multiply: lightens the base. Suits highlighter-like effects.
    Screen,
    /// Multiplies in the shadows and screens in the highlights, preserving the base contrast.
    Overlay,
}

impl BlendMode {
    /// Combines `src` over `dst`, scaling the source contribution by `weight`.
    ///
    /// `weight` is clamped to `0.0..=1.0` and folds the layer's opacity/intensity and the mask
    /// coverage at this pixel into the source alpha. The destination alpha is preserved, so
    /// blending onto an opaque video frame keeps it opaque.
    ///
    /// This is a pure function: identical inputs produce identical output bytes.
    pub fn blend(self, dst: Color, src: Color, weight: f32) -> Color {
        let d = dst.to_f32();
        let s = src.to_f32();
        let a = s[3] * weight.clamp(0.0, 1.0);

        let mut out = [0.0; 4];
        for i in 0..3 {
            let mixed = self.mix(d[i], s[i]);
            out[i] = mixed * a + d[i] * (1.0 - a);
        }
        out[3] = d[3];
        Color::from_f32(out)
    }

    /// The mode's channel-mixing function, before alpha weighting.
    fn mix(self, d: f32, s: f32) -> f32 {
        match self {
            BlendMode::Normal => s,
            BlendMode::Multiply => d * s,
            BlendMode::Screen => 1.0 - (1.0 - d) * (1.0 - s),
            BlendMode::Overlay => {
                if d <= 0.5 {
                    2.0 * d * s
                } else {
                    1.0 - 2.0 * (1.0 - d) * (1.0 - s)
                }
            }
        }
    }
}
