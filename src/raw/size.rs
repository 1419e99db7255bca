use super::handle::Handle;

/// A subtree element count or subtree height.
///
/// Like [`Handle`], a `Size` is never zero in storage (a real subtree has
/// size and height at least 1), so `Option<Size>` has the same width as the
/// raw integer. The node caches exploit this: `None` is the all-zero bit
/// pattern, making "zero means not computed" a type-level fact rather than a
/// sentinel convention.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Size(Handle);

impl Size {
    pub(crate) const MAX: usize = Handle::MAX;

    #[inline]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        Self(Handle::from_index(size))
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0.to_index()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use core::cell::Cell;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    // Verify our assumptions about `Size` and the niche optimization. The
    // last assertion is what keeps a node's lazy caches at integer width.
    assert_eq_size!(Size, Option<Size>);
    assert_eq_size!(Size, Handle);
    assert_eq_size!(Cell<Option<Size>>, Size);

    #[test]
    #[should_panic(expected = "`Size::from_usize()` - `size` > `Size::MAX`!")]
    fn invalid_size() {
        let _ = Size::from_usize(Size::MAX + 1);
    }

    proptest! {
        #[test]
        fn size_round_trip(size in 0..=Size::MAX) {
            let s = Size::from_usize(size);
            assert_eq!(s.to_usize(), size);
        }
    }
}
