/// Configuration for [`LookAheadReader`](crate::LookAheadReader).
///
/// # Examples
///
/// ```rust
/// use lookahead_reader::{LookAheadReader, ReaderOptions, StrSource, SyntaxOptions};
///
/// let options = ReaderOptions { capacity: 4 };
/// let mut reader =
///     LookAheadReader::with_options(StrSource::new("abc"), options, SyntaxOptions::default())
///         .unwrap();
/// assert_eq!(reader.capacity(), 4);
/// assert_eq!(reader.peek_nth(2).unwrap(), Some('c'));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReaderOptions {
    /// Maximum number of characters that can be looked at ahead of the
    /// cursor. Also bounds the mark limit. Must be non-zero.
    ///
    /// # Default
    ///
    /// [`ReaderOptions::DEFAULT_CAPACITY`]
    pub capacity: usize,
}

impl ReaderOptions {
    /// Capacity used by [`ReaderOptions::default`].
    pub const DEFAULT_CAPACITY: usize = 128;
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
        }
    }
}
