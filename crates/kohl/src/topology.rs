//! The tracker's landmark topology and the cosmetic zones derived from it.
//!
//! The engine consumes the MediaPipe [Face Mesh] topology: 468 landmarks in a fixed order, of
//! which the contour subsets below are relevant to cosmetics. Contours are listed in *anatomical*
//! order around each zone, not in index order; connecting them in sequence yields a simple
//! (non-self-intersecting) polygon.
//!
//! Face Mesh publishes contours for lips, eyes and brows. It has no cheek contour, so the
//! malar-area rings used for blush are this crate's own choice: mirrored index sets centered on
//! the cheekbone.
//!
//! [Face Mesh]: https://google.github.io/mediapipe/solutions/face_mesh.html

use std::fmt;

/// Number of landmarks in a complete frame.
pub const NUM_LANDMARKS: usize = 468;

/// Assigns a name to certain important landmark indices.
///
/// "Left" and "Right" are relative to the input image, not from the PoV of the depicted person.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkIdx {
    MouthLeft = 78,
    MouthRight = 308,
    MouthTop = 13,
    MouthBottom = 14,
    LeftEyeOuterCorner = 33,
    LeftEyeInnerCorner = 133,
    RightEyeInnerCorner = 362,
    RightEyeOuterCorner = 263,
}

impl From<LandmarkIdx> for usize {
    #[inline]
    fn from(idx: LandmarkIdx) -> usize {
        idx as usize
    }
}

/// Outer lip contour, starting at the left mouth corner and running clockwise.
const LIPS_OUTER: &[usize] = &[
    61, 185, 40, 39, 37, 0, 267, 269, 270, 409, 291, 375, 321, 405, 314, 17, 84, 181, 91, 146,
];

/// Inner lip contour. Rasterized together with [`LIPS_OUTER`] under the even-odd rule it leaves
/// the mouth opening uncovered.
const LIPS_INNER: &[usize] = &[
    78, 191, 80, 81, 82, 13, 312, 311, 310, 415, 308, 324, 318, 402, 317, 14, 87, 178, 88, 95,
];

/// Upper-lid arc of the left eye, outer corner to inner corner.
const LEFT_LID_UPPER: &[usize] = &[33, 246, 161, 160, 159, 158, 157, 173, 133];

/// Upper-lid arc of the right eye, outer corner to inner corner.
const RIGHT_LID_UPPER: &[usize] = &[263, 466, 388, 387, 386, 385, 384, 398, 362];

/// Left eyeshadow band: the upper-lid arc continued along the underside of the brow back to the
/// outer corner, closing the lid-to-brow area into one ring.
const LEFT_EYESHADOW: &[usize] = &[
    33, 246, 161, 160, 159, 158, 157, 173, 133, 55, 65, 52, 53, 46,
];

/// Right eyeshadow band, mirror of [`LEFT_EYESHADOW`].
const RIGHT_EYESHADOW: &[usize] = &[
    263, 466, 388, 387, 386, 385, 384, 398, 362, 285, 295, 282, 283, 276,
];

/// Left brow ridge, upper edge outer-to-inner then lower edge inner-to-outer.
const LEFT_BROW: &[usize] = &[70, 63, 105, 66, 107, 55, 65, 52, 53, 46];

/// Right brow ridge, mirror of [`LEFT_BROW`].
const RIGHT_BROW: &[usize] = &[300, 293, 334, 296, 336, 285, 295, 282, 283, 276];

/// Malar-area ring for the left cheek.
const LEFT_CHEEK: &[usize] = &[50, 123, 116, 117, 118, 101, 36, 205, 187, 147];

/// Malar-area ring for the right cheek, mirror of [`LEFT_CHEEK`].
const RIGHT_CHEEK: &[usize] = &[280, 352, 345, 346, 347, 330, 266, 425, 411, 376];

/// A cosmetic zone derived from the landmark mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    /// Both lips, mouth opening excluded.
    Lips,
    /// The area between the left upper lid and brow.
    LeftEyeshadow,
    /// The area between the right upper lid and brow.
    RightEyeshadow,
    LeftBrow,
    RightBrow,
    /// The left upper-lid lash line (a stroke, not a filled contour).
    LeftLashLine,
    /// The right upper-lid lash line (a stroke, not a filled contour).
    RightLashLine,
    LeftCheek,
    RightCheek,
}

impl Zone {
    /// The landmark index contours making up this zone, in anatomical order.
    ///
    /// Filled zones return one or more closed rings. Stroke zones ([`Zone::is_stroke`]) return a
    /// single *open* polyline running from the outer to the inner eye corner.
    pub fn rings(self) -> &'static [&'static [usize]] {
        match self {
            Zone::Lips => &[LIPS_OUTER, LIPS_INNER],
            Zone::LeftEyeshadow => &[LEFT_EYESHADOW],
            Zone::RightEyeshadow => &[RIGHT_EYESHADOW],
            Zone::LeftBrow => &[LEFT_BROW],
            Zone::RightBrow => &[RIGHT_BROW],
            Zone::LeftLashLine => &[LEFT_LID_UPPER],
            Zone::RightLashLine => &[RIGHT_LID_UPPER],
            Zone::LeftCheek => &[LEFT_CHEEK],
            Zone::RightCheek => &[RIGHT_CHEEK],
        }
    }

    /// Whether this zone is a stroke along a polyline rather than a filled contour.
    pub fn is_stroke(self) -> bool {
        matches!(self, Zone::LeftLashLine | Zone::RightLashLine)
    }

    /// The number of landmarks a frame must carry for this zone to be derivable.
    pub fn min_landmarks(self) -> usize {
        self.rings()
            .iter()
            .flat_map(|ring| ring.iter())
            .copied()
            .max()
            .map_or(0, |max| max + 1)
    }

    /// The total number of landmark indices this zone references.
    pub fn num_points(self) -> usize {
        self.rings().iter().map(|ring| ring.len()).sum()
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Zone::Lips => "lips",
            Zone::LeftEyeshadow => "left eyeshadow",
            Zone::RightEyeshadow => "right eyeshadow",
            Zone::LeftBrow => "left brow",
            Zone::RightBrow => "right brow",
            Zone::LeftLashLine => "left lash line",
            Zone::RightLashLine => "right lash line",
            Zone::LeftCheek => "left cheek",
            Zone::RightCheek => "right cheek",
        };
        f.write_str(name)
    }
}

/// All zones the engine knows about.
pub const ALL_ZONES: [Zone; 9] = [
    Zone::Lips,
    Zone::LeftEyeshadow,
    Zone::RightEyeshadow,
    Zone::LeftBrow,
    Zone::RightBrow,
    Zone::LeftLashLine,
    Zone::RightLashLine,
    Zone::LeftCheek,
    Zone::RightCheek,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_indices_in_topology() {
        for zone in ALL_ZONES {
            for ring in zone.rings() {
                for &idx in *ring {
                    assert!(idx < NUM_LANDMARKS, "{zone}: index {idx} out of range");
                }
                assert!(ring.len() >= 3, "{zone}: ring too short");
            }
        }
    }

    #[test]
    fn rings_have_no_duplicate_points() {
        for zone in ALL_ZONES {
            for ring in zone.rings() {
                let mut seen = ring.to_vec();
                seen.sort_unstable();
                seen.dedup();
                assert_eq!(seen.len(), ring.len(), "{zone}: duplicate index in ring");
            }
        }
    }

    #[test]
    fn mirrored_zones_match_in_size() {
        let pairs = [
            (Zone::LeftEyeshadow, Zone::RightEyeshadow),
            (Zone::LeftBrow, Zone::RightBrow),
            (Zone::LeftLashLine, Zone::RightLashLine),
            (Zone::LeftCheek, Zone::RightCheek),
        ];
        for (l, r) in pairs {
            assert_eq!(l.num_points(), r.num_points());
        }
    }

    #[test]
    fn min_landmarks_is_highest_index_plus_one() {
        assert_eq!(Zone::Lips.min_landmarks(), 416);
        assert_eq!(Zone::LeftCheek.min_landmarks(), 206);
        assert_eq!(Zone::RightCheek.min_landmarks(), 426);
    }
}
