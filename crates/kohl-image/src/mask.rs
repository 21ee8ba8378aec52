//! Coverage masks for cosmetic zones.

use itertools::Itertools;

use crate::Resolution;

/// Per-pixel coverage in `0.0..=1.0` for one cosmetic zone at one frame's resolution.
///
/// A mask is derived from a single frame's geometry and dies with that frame; landmark jitter
/// makes cached masks useless, so nothing here is designed to be reused.
#[derive(Clone)]
pub struct Mask {
    res: Resolution,
    data: Vec<f32>,
}

impl Mask {
    /// Creates an all-zero mask.
    pub fn empty(res: impl Into<Resolution>) -> Self {
        let res = res.into();
        Self {
            res,
            data: vec![0.0; res.num_pixels()],
        }
    }

    /// Rasterizes one or more closed polygon rings using the even-odd rule.
    ///
    /// A pixel is covered when a horizontal ray from its center crosses the ring edges an odd
    /// number of times. A ring nested inside another therefore punches a hole, which is how the
    /// lip mask leaves the mouth opening uncovered.
    ///
    /// Ring points are pixel coordinates; geometry outside the resolution is clipped. Rings with
    /// fewer than 3 points contribute nothing.
    pub fn fill_rings(res: impl Into<Resolution>, rings: &[Vec<[f32; 2]>]) -> Self {
        let res = res.into();
        let mut mask = Self::empty(res);
        let width = res.width() as usize;

        let mut crossings: Vec<f32> = Vec::new();
        for y in 0..res.height() {
            let sy = y as f32 + 0.5;

            crossings.clear();
            for ring in rings {
                if ring.len() < 3 {
                    continue;
                }
                for (a, b) in ring.iter().copied().circular_tuple_windows() {
                    // Edges straddling the scanline contribute one crossing; the half-open test
                    // keeps shared vertices from being counted twice.
                    if (a[1] <= sy) != (b[1] <= sy) {
                        let t = (sy - a[1]) / (b[1] - a[1]);
                        crossings.push(a[0] + t * (b[0] - a[0]));
                    }
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));

            for span in crossings.chunks_exact(2) {
                let (x0, x1) = (span[0], span[1]);
                let lo = x0.floor().max(0.0) as i64;
                let hi = (x1.ceil() as i64).min(res.width() as i64);
                for x in lo..hi {
                    let xc = x as f32 + 0.5;
                    if xc >= x0 && xc < x1 {
                        mask.data[y as usize * width + x as usize] = 1.0;
                    }
                }
            }
        }
        mask
    }

    /// Softens the mask's edges with a separable box blur, applied twice for a smooth falloff.
    ///
    /// `radius` is in pixels; values below one pixel leave the mask unchanged. Coverage stays
    /// within `0.0..=1.0` (box averaging cannot overshoot).
    pub fn feather(&mut self, radius: f32) {
        let r = radius.round() as i64;
        if r < 1 {
            return;
        }
        let r = r as usize;
        for _ in 0..2 {
            self.blur_rows(r);
            self.blur_cols(r);
        }
    }

    fn blur_rows(&mut self, r: usize) {
        let w = self.res.width() as usize;
        let h = self.res.height() as usize;
        let mut prefix = vec![0.0f32; w + 1];
        let mut tmp = vec![0.0f32; w];
        for y in 0..h {
            let row = &self.data[y * w..(y + 1) * w];
            for x in 0..w {
                prefix[x + 1] = prefix[x] + row[x];
            }
            for x in 0..w {
                let lo = x.saturating_sub(r);
                let hi = (x + r + 1).min(w);
                tmp[x] = (prefix[hi] - prefix[lo]) / (hi - lo) as f32;
            }
            self.data[y * w..(y + 1) * w].copy_from_slice(&tmp);
        }
    }

    fn blur_cols(&mut self, r: usize) {
        let w = self.res.width() as usize;
        let h = self.res.height() as usize;
        let mut prefix = vec![0.0f32; h + 1];
        let mut tmp = vec![0.0f32; h];
        for x in 0..w {
            for y in 0..h {
                prefix[y + 1] = prefix[y] + self.data[y * w + x];
            }
            for y in 0..h {
                let lo = y.saturating_sub(r);
                let hi = (y + r + 1).min(h);
                tmp[y] = (prefix[hi] - prefix[lo]) / (hi - lo) as f32;
            }
            for y in 0..h {
                self.data[y * w + x] = tmp[y];
            }
        }
    }

    /// Merges `other` into `self`, keeping the higher coverage per pixel.
    ///
    /// # Panics
    ///
    /// Panics if the masks have different resolutions.
    pub fn union(&mut self, other: &Mask) {
        assert_eq!(
            self.res, other.res,
            "cannot union masks of different resolutions"
        );
        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a = a.max(*b);
        }
    }

    #[inline]
    pub fn resolution(&self) -> Resolution {
        self.res
    }

    /// Coverage at `(x, y)`. Panics if the coordinates are out of bounds.
    #[inline]
    pub fn coverage(&self, x: u32, y: u32) -> f32 {
        assert!(x < self.res.width() && y < self.res.height());
        self.data[y as usize * self.res.width() as usize + x as usize]
    }

    /// Whether no pixel has any coverage.
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&c| c == 0.0)
    }

    /// Iterates over all pixels with non-zero coverage as `(x, y, coverage)`.
    pub fn iter_covered(&self) -> impl Iterator<Item = (u32, u32, f32)> + '_ {
        let w = self.res.width();
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0.0)
            .map(move |(i, &c)| ((i as u32 % w), (i as u32 / w), c))
    }
}
