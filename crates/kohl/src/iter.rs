//! Iterator extension methods.

use std::iter::Zip;

/// Extension trait adding a length-checked variant of [`Iterator::zip`].
pub trait ZipExact: IntoIterator + Sized {
    /// Zips two iterators, panicking if their lengths differ.
    ///
    /// [`Iterator::zip`] silently stops at the shorter of the two iterators, which hides bugs
    /// when both sides are expected to line up item for item (landmark positions against their
    /// filter states, for example).
    #[track_caller]
    fn zip_exact<B>(self, other: B) -> Zip<Self::IntoIter, B::IntoIter>
    where
        Self::IntoIter: ExactSizeIterator,
        B: IntoIterator,
        B::IntoIter: ExactSizeIterator,
    {
        let a = self.into_iter();
        let b = other.into_iter();
        assert_eq!(
            a.len(),
            b.len(),
            "`zip_exact` called on iterators with different lengths"
        );
        a.zip(b)
    }
}

impl<I: IntoIterator + Sized> ZipExact for I {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zips_equal_lengths() {
        let pairs: Vec<_> = [1, 2].zip_exact([3, 4]).collect();
        assert_eq!(pairs, [(1, 3), (2, 4)]);
    }

    #[test]
    #[should_panic]
    fn panics_on_mismatch() {
        let _ = [1, 2, 3].zip_exact([1]);
    }
}
