//! Shared fixtures for unit tests: a schematic face laid out in normalized coordinates.

use crate::landmark::{LandmarkFrame, Landmarks};
use crate::topology::Zone;

/// Places ring points for `indices` along an ellipse, in ring order.
///
/// The ring proceeds through a full turn starting at the left corner, which keeps every
/// synthesized ring a simple (non-self-intersecting) polygon.
fn ellipse(lms: &mut Landmarks, indices: &[usize], cx: f32, cy: f32, rx: f32, ry: f32) {
    let n = indices.len();
    for (k, &idx) in indices.iter().enumerate() {
        let theta = std::f32::consts::PI - std::f32::consts::TAU * k as f32 / n as f32;
        if idx < lms.len() {
            lms.positions_mut()[idx] = [cx + rx * theta.cos(), cy - ry * theta.sin(), 0.0];
        }
    }
}

/// Places `indices` along a horizontal arc from `x0` to `x1` at height `y`, dipping by `bulge`
/// in the middle (negative `bulge` lifts, since Y points down).
fn arc(lms: &mut Landmarks, indices: &[usize], x0: f32, x1: f32, y: f32, bulge: f32) {
    let n = indices.len();
    for (k, &idx) in indices.iter().enumerate() {
        let t = k as f32 / (n - 1) as f32;
        if idx < lms.len() {
            lms.positions_mut()[idx] = [
                x0 + t * (x1 - x0),
                y + bulge * (std::f32::consts::PI * t).sin(),
                0.0,
            ];
        }
    }
}

/// Builds a deterministic, anatomically plausible landmark frame with `len` points.
///
/// Every zone whose indices fit in `len` derives to a non-degenerate simple polygon; indices not
/// referenced by any zone sit on a coarse grid so the whole frame is finite.
pub fn synthetic_frame(len: usize) -> LandmarkFrame {
    let mut lms = Landmarks::new(len);
    for i in 0..len {
        lms.positions_mut()[i] = [
            0.1 + 0.8 * (i % 22) as f32 / 21.0,
            0.1 + 0.8 * (i / 22) as f32 / 21.0,
            0.0,
        ];
    }

    // Lips: outer and inner ellipses around the mouth.
    ellipse(&mut lms, Zone::Lips.rings()[0], 0.5, 0.70, 0.12, 0.05);
    ellipse(&mut lms, Zone::Lips.rings()[1], 0.5, 0.70, 0.07, 0.02);

    // Upper-lid arcs, outer corner to inner corner.
    arc(&mut lms, Zone::LeftLashLine.rings()[0], 0.28, 0.42, 0.40, -0.02);
    arc(&mut lms, Zone::RightLashLine.rings()[0], 0.72, 0.58, 0.40, -0.02);

    // Brows: upper edge outer-to-inner, lower edge inner-to-outer (band rings).
    arc(&mut lms, &Zone::LeftBrow.rings()[0][..5], 0.27, 0.43, 0.31, -0.01);
    arc(&mut lms, &Zone::LeftBrow.rings()[0][5..], 0.43, 0.27, 0.34, -0.01);
    arc(&mut lms, &Zone::RightBrow.rings()[0][..5], 0.73, 0.57, 0.31, -0.01);
    arc(&mut lms, &Zone::RightBrow.rings()[0][5..], 0.57, 0.73, 0.34, -0.01);

    // Cheeks: malar ellipses.
    ellipse(&mut lms, Zone::LeftCheek.rings()[0], 0.32, 0.55, 0.05, 0.035);
    ellipse(&mut lms, Zone::RightCheek.rings()[0], 0.68, 0.55, 0.05, 0.035);

    LandmarkFrame::new(0, lms)
}
