//! Edit region detection.
//!
//! The host editor reports whole buffer contents before and after each edit.
//! [`diff`] recovers the single contiguous region that changed by scanning for
//! the common prefix and the common suffix of the two strings.
//!
//! This is not a general diff. Edits at several disjoint places (a
//! programmatic find-and-replace, say) are reported as one region spanning
//! all of them, which is exact for single-cursor typing and pasting but moves
//! spans between the edit points as if that text had been replaced.

/// The changed region between two versions of a buffer, in characters.
///
/// The region is `[prefix, prefix + old_len)` in the old text and
/// `[prefix, prefix + new_len)` in the new text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EditRegion {
    /// Length of the common prefix.
    pub prefix: usize,
    /// Characters removed from the old text.
    pub old_len: usize,
    /// Characters inserted into the new text.
    pub new_len: usize,
}

impl EditRegion {
    #[must_use]
    pub const fn new(prefix: usize, old_len: usize, new_len: usize) -> Self {
        Self {
            prefix,
            old_len,
            new_len,
        }
    }

    /// A pure insertion of `len` characters at `at`.
    #[must_use]
    pub const fn insertion(at: usize, len: usize) -> Self {
        Self::new(at, 0, len)
    }

    /// A pure deletion of `len` characters at `at`.
    #[must_use]
    pub const fn deletion(at: usize, len: usize) -> Self {
        Self::new(at, len, 0)
    }

    /// Signed change in buffer length.
    #[must_use]
    pub fn delta(&self) -> isize {
        signed(self.new_len) - signed(self.old_len)
    }

    /// Exclusive end of the region in the old text.
    #[must_use]
    pub const fn old_end(&self) -> usize {
        self.prefix + self.old_len
    }

    /// Exclusive end of the region in the new text.
    #[must_use]
    pub const fn new_end(&self) -> usize {
        self.prefix + self.new_len
    }

    /// True when the two texts were identical.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.old_len == 0 && self.new_len == 0
    }

    /// True when text was only inserted.
    #[must_use]
    pub const fn is_pure_insertion(&self) -> bool {
        self.old_len == 0 && self.new_len > 0
    }
}

/// Convert a character count to a signed offset delta.
pub(crate) fn signed(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}

/// Compute the edit region between `old` and `new`.
///
/// The suffix scan never re-consumes characters already matched by the
/// prefix scan, so the result is well formed for repeated characters such as
/// typing `"l"` into `"Hello"`.
#[must_use]
pub fn diff(old: &str, new: &str) -> EditRegion {
    let old_count = old.chars().count();
    let new_count = new.chars().count();

    let prefix = old
        .chars()
        .zip(new.chars())
        .take_while(|(a, b)| a == b)
        .count();

    let suffix_limit = old_count.min(new_count) - prefix;
    let suffix = old
        .chars()
        .rev()
        .zip(new.chars().rev())
        .take(suffix_limit)
        .take_while(|(a, b)| a == b)
        .count();

    let region = EditRegion {
        prefix,
        old_len: old_count - prefix - suffix,
        new_len: new_count - prefix - suffix,
    };
    log::trace!(
        "edit region: prefix={} old_len={} new_len={}",
        region.prefix,
        region.old_len,
        region.new_len
    );
    region
}
