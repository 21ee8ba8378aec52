//! Region geometry derivation: landmark frames to per-zone contours.
//!
//! Derivation happens once per zone per frame. A zone either yields a complete [`RegionMask`] or
//! fails with [`Error::InsufficientLandmarks`]; there are no partially derived zones, and a
//! failed zone never prevents other zones of the same frame from deriving.

use itertools::Itertools;
use nalgebra::{Point2, Vector2};

use crate::landmark::LandmarkFrame;
use crate::topology::Zone;
use crate::Error;
use kohl_image::{Mask, Resolution};

/// Number of interpolated points the smoothing pass inserts per contour segment.
///
/// Raw landmark contours rasterize to visibly faceted polygons; Catmull-Rom resampling at this
/// density is enough to hide the facets at typical video resolutions.
const SPLINE_SUBDIVISIONS: usize = 4;

/// Base lash extent at `length == 1.0`, relative to the frame's smaller dimension.
const LASH_BASE_EXTENT: f32 = 0.012;

/// Base lash stroke width at `thickness == 1.0`, relative to the frame's smaller dimension.
const LASH_BASE_WIDTH: f32 = 0.004;

/// Closed pixel-space contour(s) for one cosmetic zone in one frame.
///
/// Owned by the pipeline for the frame's lifetime only and recomputed every frame; landmark
/// jitter makes cross-frame caching useless.
#[derive(Debug, Clone)]
pub struct RegionMask {
    zone: Zone,
    rings: Vec<Vec<Point2<f32>>>,
}

impl RegionMask {
    #[inline]
    pub fn zone(&self) -> Zone {
        self.zone
    }

    #[inline]
    pub fn rings(&self) -> &[Vec<Point2<f32>>] {
        &self.rings
    }

    /// Scales every ring vertically about its own centroid.
    ///
    /// Used for the brow thickness parameter: the ridge grows or shrinks in height while its
    /// horizontal extent and position stay put.
    pub fn scale_vertical(&mut self, factor: f32) {
        for ring in &mut self.rings {
            let cy = ring.iter().map(|p| p.y).sum::<f32>() / ring.len() as f32;
            for p in ring.iter_mut() {
                p.y = cy + (p.y - cy) * factor;
            }
        }
    }

    /// Rasterizes the contours into a coverage mask at the given resolution.
    pub fn to_mask(&self, res: Resolution) -> Mask {
        let rings: Vec<Vec<[f32; 2]>> = self
            .rings
            .iter()
            .map(|ring| ring.iter().map(|p| [p.x, p.y]).collect())
            .collect();
        Mask::fill_rings(res, &rings)
    }
}

/// Derives the closed contour(s) for a filled zone, in pixel coordinates for `res`.
///
/// The zone's landmark indices are gathered in the topology's anatomical order (which keeps the
/// polygon simple), validated, and resampled with a closed Catmull-Rom pass to soften the
/// contour. Any required landmark that is missing from the frame or non-finite fails the whole
/// zone with [`Error::InsufficientLandmarks`].
pub fn derive(frame: &LandmarkFrame, zone: Zone, res: Resolution) -> Result<RegionMask, Error> {
    let rings = gather_rings(frame, zone, res)?;
    let rings = rings
        .into_iter()
        .map(|ring| smooth_closed(&ring, SPLINE_SUBDIVISIONS))
        .collect();
    Ok(RegionMask { zone, rings })
}

/// Derives the stroke polygon for a lash-line zone.
///
/// The upper-lid polyline is extruded along its outward normals into a closed quad strip:
/// `length` sets the base extent, `curl` lifts the extrusion progressively toward the outer eye
/// corner, and `thickness` widens the stroke at its root. All three modulate geometry only; the
/// paint color is untouched.
pub fn derive_stroke(
    frame: &LandmarkFrame,
    zone: Zone,
    res: Resolution,
    length: f32,
    curl: f32,
    thickness: f32,
) -> Result<RegionMask, Error> {
    let mut rings = gather_rings(frame, zone, res)?;
    // Stroke zones are defined by a single polyline.
    let lid = rings.swap_remove(0);
    let n = lid.len();

    let extent = res.min_dim() as f32 * LASH_BASE_EXTENT * length;
    let root_width = res.min_dim() as f32 * LASH_BASE_WIDTH * thickness;

    let mut outer = Vec::with_capacity(n);
    let mut inner = Vec::with_capacity(n);
    for (i, point) in lid.iter().enumerate() {
        let prev = lid[i.saturating_sub(1)];
        let next = lid[(i + 1).min(n - 1)];
        let tangent = next - prev;
        let mut normal = Vector2::new(-tangent.y, tangent.x)
            .try_normalize(1e-6)
            .unwrap_or_else(|| Vector2::new(0.0, -1.0));
        // Lash lines are upper-lid arcs, so "away from the eye" is always up (negative Y).
        if normal.y > 0.0 {
            normal = -normal;
        }

        // The polyline runs outer corner to inner corner; tips lift most at the outer end.
        let along = i as f32 / (n - 1) as f32;
        let lift = extent * (1.0 + curl * (1.0 - along));
        outer.push(point + normal * lift);
        inner.push(point - normal * (root_width * 0.5));
    }

    // Quad strip: roots forward, tips backward.
    inner.extend(outer.into_iter().rev());
    Ok(RegionMask {
        zone,
        rings: vec![smooth_closed(&inner, SPLINE_SUBDIVISIONS)],
    })
}

/// Gathers a zone's rings as pixel-space points, validating every required landmark.
fn gather_rings(
    frame: &LandmarkFrame,
    zone: Zone,
    res: Resolution,
) -> Result<Vec<Vec<Point2<f32>>>, Error> {
    let landmarks = frame.landmarks();
    let needed = zone.num_points();
    let usable = zone
        .rings()
        .iter()
        .flat_map(|ring| ring.iter())
        .filter(|&&idx| {
            landmarks
                .positions()
                .get(idx)
                .is_some_and(|p| p[0].is_finite() && p[1].is_finite())
        })
        .count();
    if usable < needed {
        return Err(Error::InsufficientLandmarks {
            zone,
            needed,
            got: usable,
        });
    }

    let (w, h) = (res.width() as f32, res.height() as f32);
    Ok(zone
        .rings()
        .iter()
        .map(|ring| {
            ring.iter()
                .map(|&idx| {
                    let [x, y, _] = landmarks.positions()[idx];
                    Point2::new(x * w, y * h)
                })
                .collect()
        })
        .collect())
}

/// Resamples a closed contour with uniform Catmull-Rom interpolation, inserting `sub` points per
/// segment. The original points are kept, so the resampled contour passes through all of them
/// (possibly starting at a different ring position, which leaves the geometry unchanged).
fn smooth_closed(ring: &[Point2<f32>], sub: usize) -> Vec<Point2<f32>> {
    let n = ring.len();
    if n < 3 || sub == 0 {
        return ring.to_vec();
    }

    let mut out = Vec::with_capacity(n * (sub + 1));
    for (p0, p1, p2, p3) in ring.iter().copied().circular_tuple_windows() {
        // Each window interpolates the segment p1→p2.
        out.push(p1);
        for s in 1..=sub {
            let t = s as f32 / (sub + 1) as f32;
            out.push(catmull_rom(p0, p1, p2, p3, t));
        }
    }
    out
}

fn catmull_rom(
    p0: Point2<f32>,
    p1: Point2<f32>,
    p2: Point2<f32>,
    p3: Point2<f32>,
    t: f32,
) -> Point2<f32> {
    let t2 = t * t;
    let t3 = t2 * t;
    let c0 = -0.5 * t3 + t2 - 0.5 * t;
    let c1 = 1.5 * t3 - 2.5 * t2 + 1.0;
    let c2 = -1.5 * t3 + 2.0 * t2 + 0.5 * t;
    let c3 = 0.5 * t3 - 0.5 * t2;
    Point2::new(
        c0 * p0.x + c1 * p1.x + c2 * p2.x + c3 * p3.x,
        c0 * p0.y + c1 * p1.y + c2 * p2.y + c3 * p3.y,
    )
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::landmark::{Landmark, Landmarks};
    use crate::test_support::synthetic_frame;
    use crate::topology::{self, ALL_ZONES};

    fn res() -> Resolution {
        Resolution::new(640, 480)
    }

    #[test]
    fn derives_all_zones_from_full_frame() {
        let frame = synthetic_frame(topology::NUM_LANDMARKS);
        for zone in ALL_ZONES {
            if zone.is_stroke() {
                continue;
            }
            let region = derive(&frame, zone, res()).unwrap();
            assert_eq!(region.zone(), zone);
            assert_eq!(region.rings().len(), zone.rings().len());
            for (smoothed, raw) in region.rings().iter().zip(zone.rings()) {
                assert_eq!(smoothed.len(), raw.len() * (SPLINE_SUBDIVISIONS + 1));
            }
        }
    }

    #[test]
    fn short_frame_fails_only_uncovered_zones() {
        // 300 landmarks: enough for the left cheek (206) but not the lips (416).
        let frame = synthetic_frame(300);
        assert!(derive(&frame, Zone::LeftCheek, res()).is_ok());
        let err = derive(&frame, Zone::Lips, res()).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientLandmarks {
                zone: Zone::Lips,
                ..
            }
        ));
    }

    #[test]
    fn nan_landmark_fails_the_zone() {
        let mut frame = synthetic_frame(topology::NUM_LANDMARKS);
        let lip_idx = Zone::Lips.rings()[0][0];
        frame
            .landmarks_mut()
            .set(lip_idx, Landmark::new([f32::NAN, 0.5, 0.0]));

        assert!(derive(&frame, Zone::Lips, res()).is_err());
        assert!(derive(&frame, Zone::LeftCheek, res()).is_ok());
    }

    #[test]
    fn smoothing_passes_through_original_points() {
        let ring = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let smoothed = smooth_closed(&ring, 3);
        assert_eq!(smoothed.len(), 16);
        for original in &ring {
            assert!(
                smoothed.iter().any(|p| (p - original).norm() < 1e-5),
                "{original} missing from the resampled contour"
            );
        }
    }

    #[test]
    fn vertical_scaling_preserves_centroid() {
        let frame = synthetic_frame(topology::NUM_LANDMARKS);
        let mut region = derive(&frame, Zone::LeftBrow, res()).unwrap();
        let centroid_y = |ring: &[Point2<f32>]| {
            ring.iter().map(|p| p.y).sum::<f32>() / ring.len() as f32
        };
        let before = centroid_y(&region.rings()[0]);
        region.scale_vertical(1.5);
        let after = centroid_y(&region.rings()[0]);
        assert_relative_eq!(before, after, epsilon = 1e-3);
    }

    #[test]
    fn lash_stroke_grows_with_length() {
        let frame = synthetic_frame(topology::NUM_LANDMARKS);
        let area = |region: &RegionMask| region.to_mask(res()).iter_covered().count();

        let short = derive_stroke(&frame, Zone::LeftLashLine, res(), 1.0, 0.0, 1.0).unwrap();
        let long = derive_stroke(&frame, Zone::LeftLashLine, res(), 1.8, 0.0, 1.0).unwrap();
        assert!(area(&long) > area(&short));
    }

    #[test]
    fn empty_frame_derives_nothing() {
        let frame = crate::landmark::LandmarkFrame::new(0, Landmarks::new(0));
        for zone in ALL_ZONES {
            assert!(derive(&frame, zone, res()).is_err());
        }
    }
}
