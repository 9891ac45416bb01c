//! Bounded-lookahead reader.
//!
//! Overview
//! - `Input` pairs the wrapped [`Source`] with a [`RingBuffer`] of characters
//!   that were pulled for inspection but not consumed yet. Characters are
//!   pulled one at a time and only when a caller looks further ahead than the
//!   ring currently holds, so a slow or interactive source is never read past
//!   what the parser asked to see.
//! - [`LookAheadReader`] layers the match and conditional-consume predicates
//!   on top, consulting a [`Syntax`] policy for whitespace, identifier, line
//!   and comment rules.
//!
//! End of input
//! - `eof` is set the first time the source returns `None` and never cleared.
//!   Characters already in the ring stay readable; after that the source is
//!   not queried again.
//! - Closing takes the source out of the reader, so a closed reader behaves
//!   like an exhausted one with an empty ring.
//!
//! Marks
//! - While a mark is active every consumed character goes through the ring,
//!   including `read`, `read_into` and `skip` calls that would otherwise
//!   bypass it, so `reset` can replay them until the ring wraps onto the mark.

use crate::{
    error::{BufferError, ReadError},
    options::ReaderOptions,
    ring_buffer::RingBuffer,
    source::{Source, StrSource},
    syntax::{Syntax, SyntaxOptions},
};

#[derive(Debug)]
struct Input<S> {
    source: Option<S>,
    buffer: RingBuffer,
    eof: bool,
}

impl<S: Source> Input<S> {
    fn fill(&mut self, n: usize) -> Result<(), ReadError<S::Error>> {
        let capacity = self.buffer.capacity();
        if n > capacity {
            return Err(ReadError::LookaheadExceedsCapacity {
                requested: n,
                capacity,
            });
        }
        if self.eof {
            return Ok(());
        }
        let Some(source) = self.source.as_mut() else {
            return Ok(());
        };
        while self.buffer.len() < n {
            match source.read_char().map_err(ReadError::Source)? {
                Some(c) => self.buffer.add(c)?,
                None => {
                    tracing::debug!(buffered = self.buffer.len(), "source exhausted");
                    self.eof = true;
                    break;
                }
            }
        }
        tracing::trace!(requested = n, buffered = self.buffer.len(), "filled");
        Ok(())
    }

    fn peek_nth(&mut self, n: usize) -> Result<Option<char>, ReadError<S::Error>> {
        self.fill(n.saturating_add(1))?;
        Ok(self.buffer.peek_at(n))
    }

    fn matches(&mut self, pattern: &str) -> Result<bool, ReadError<S::Error>> {
        if pattern.is_empty() {
            return Ok(self.peek_nth(0)?.is_some());
        }
        for (i, expected) in pattern.chars().enumerate() {
            if self.peek_nth(i)? != Some(expected) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Reads straight from the source, bypassing the ring.
    fn pull(&mut self) -> Result<Option<char>, ReadError<S::Error>> {
        if self.eof {
            return Ok(None);
        }
        let Some(source) = self.source.as_mut() else {
            return Ok(None);
        };
        let next = source.read_char().map_err(ReadError::Source)?;
        if next.is_none() {
            tracing::debug!("source exhausted");
            self.eof = true;
        }
        Ok(next)
    }

    /// Consumes one character through the ring.
    fn take_buffered(&mut self) -> Result<Option<char>, ReadError<S::Error>> {
        self.fill(1)?;
        if self.buffer.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.buffer.remove()?))
    }
}

/// A character reader that can look up to a fixed number of characters
/// ahead and consume them conditionally.
///
/// Every operation that needs more input blocks on the [`Source`] until it
/// produces a character, fails, or reports the end. End of input is reported
/// as `None` from [`peek`](Self::peek) and [`read`](Self::read), and as
/// `false` from the `at*` predicates (except [`at_eof`](Self::at_eof) and
/// [`at_eol`](Self::at_eol)).
///
/// # Examples
///
/// ```rust
/// use lookahead_reader::LookAheadReader;
///
/// let mut reader = LookAheadReader::from_text("# header\nlet x", 8).unwrap();
/// reader.skip_whitespace_and_comments().unwrap();
/// assert!(!reader.at_word("le").unwrap());
/// assert!(reader.at_skip_word("let").unwrap());
/// assert!(reader.at_skip_whitespace_char().unwrap());
/// assert_eq!(reader.read().unwrap(), Some('x'));
/// assert!(reader.at_eof().unwrap());
/// ```
#[derive(Debug)]
pub struct LookAheadReader<S, Y = SyntaxOptions> {
    input: Input<S>,
    syntax: Y,
}

impl<'a> LookAheadReader<StrSource<'a>> {
    /// Reader over an in-memory string with the default syntax.
    ///
    /// # Errors
    ///
    /// [`BufferError::ZeroCapacity`] if `capacity` is zero.
    pub fn from_text(text: &'a str, capacity: usize) -> Result<Self, BufferError> {
        Self::new(StrSource::new(text), capacity)
    }
}

impl<S: Source> LookAheadReader<S> {
    /// Wraps `source`, allowing up to `capacity` characters of lookahead.
    ///
    /// # Errors
    ///
    /// [`BufferError::ZeroCapacity`] if `capacity` is zero.
    pub fn new(source: S, capacity: usize) -> Result<Self, BufferError> {
        Self::with_options(source, ReaderOptions { capacity }, SyntaxOptions::default())
    }

    /// Wraps `source` with [`ReaderOptions::default`] and the default syntax.
    #[must_use]
    pub fn with_default_capacity(source: S) -> Self {
        Self {
            input: Input {
                source: Some(source),
                buffer: RingBuffer::with_capacity(ReaderOptions::DEFAULT_CAPACITY),
                eof: false,
            },
            syntax: SyntaxOptions::default(),
        }
    }
}

impl<S: Source, Y: Syntax> LookAheadReader<S, Y> {
    /// Wraps `source` with explicit options and lexical rules.
    ///
    /// # Errors
    ///
    /// [`BufferError::ZeroCapacity`] if `options.capacity` is zero.
    pub fn with_options(source: S, options: ReaderOptions, syntax: Y) -> Result<Self, BufferError> {
        Ok(Self {
            input: Input {
                source: Some(source),
                buffer: RingBuffer::new(options.capacity)?,
                eof: false,
            },
            syntax,
        })
    }

    /// Maximum lookahead, fixed at construction.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.input.buffer.capacity()
    }

    /// Number of characters pulled from the source but not consumed yet.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.input.buffer.len()
    }

    /// Returns `true` once the source has reported the end of input or the
    /// reader was closed. Buffered characters may still be readable.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.input.eof
    }

    /// Returns `true` after [`close`](Self::close).
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.input.source.is_none()
    }

    /// The lexical rules in use.
    #[must_use]
    pub fn syntax(&self) -> &Y {
        &self.syntax
    }

    /// Borrows the source, or `None` once closed.
    #[must_use]
    pub fn get_ref(&self) -> Option<&S> {
        self.input.source.as_ref()
    }

    /// Pulls characters until at least `n` are buffered or the source ends.
    ///
    /// # Errors
    ///
    /// [`ReadError::LookaheadExceedsCapacity`] if `n` exceeds the capacity,
    /// whatever the state of the reader; otherwise any source error.
    pub fn fill(&mut self, n: usize) -> Result<(), ReadError<S::Error>> {
        self.input.fill(n)
    }

    /// The next character, without consuming it.
    ///
    /// # Errors
    ///
    /// Any source error.
    pub fn peek(&mut self) -> Result<Option<char>, ReadError<S::Error>> {
        self.input.peek_nth(0)
    }

    /// The character `n` positions ahead (`0` is the next one), without
    /// consuming anything.
    ///
    /// # Errors
    ///
    /// [`ReadError::LookaheadExceedsCapacity`] unless `n < capacity`;
    /// otherwise any source error.
    pub fn peek_nth(&mut self, n: usize) -> Result<Option<char>, ReadError<S::Error>> {
        self.input.peek_nth(n)
    }

    /// Returns `true` if the next character is `c`.
    ///
    /// # Errors
    ///
    /// Any source error.
    pub fn at(&mut self, c: char) -> Result<bool, ReadError<S::Error>> {
        self.at_nth(0, c)
    }

    /// Returns `true` if the character `n` positions ahead is `c`.
    ///
    /// # Errors
    ///
    /// As [`peek_nth`](Self::peek_nth).
    pub fn at_nth(&mut self, n: usize, c: char) -> Result<bool, ReadError<S::Error>> {
        Ok(self.input.peek_nth(n)? == Some(c))
    }

    /// Returns `true` if the upcoming characters spell `s`. The empty string
    /// matches while any input remains, and never at the end or once closed.
    ///
    /// Comparison stops at the first mismatch, so only a pattern whose prefix
    /// matches can exceed the lookahead capacity.
    ///
    /// # Errors
    ///
    /// [`ReadError::LookaheadExceedsCapacity`] if the input matches the first
    /// `capacity` characters of a longer `s`; otherwise any source error.
    pub fn at_str(&mut self, s: &str) -> Result<bool, ReadError<S::Error>> {
        self.input.matches(s)
    }

    /// Returns `true` if the upcoming characters spell `word` and the
    /// character after it does not continue an identifier, so `if` does not
    /// match the start of `iffy`. Case-sensitive.
    ///
    /// # Errors
    ///
    /// [`ReadError::LookaheadExceedsCapacity`] if `word` matches but has as
    /// many characters as the capacity; otherwise any source error.
    pub fn at_word(&mut self, word: &str) -> Result<bool, ReadError<S::Error>> {
        if !self.input.matches(word)? {
            return Ok(false);
        }
        let after = self.input.peek_nth(word.chars().count())?;
        Ok(!after.is_some_and(|c| self.syntax.is_ident_char(c)))
    }

    /// Returns `true` if a comment starts at the next character.
    ///
    /// # Errors
    ///
    /// Any source error.
    pub fn at_comment(&mut self) -> Result<bool, ReadError<S::Error>> {
        let prefix = self.syntax.comment_prefix();
        if prefix.is_empty() {
            return Ok(false);
        }
        self.input.matches(prefix)
    }

    /// Returns `true` if no characters remain.
    ///
    /// # Errors
    ///
    /// Any source error.
    pub fn at_eof(&mut self) -> Result<bool, ReadError<S::Error>> {
        Ok(self.peek()?.is_none())
    }

    /// Returns `true` at a line end or at the end of input.
    ///
    /// # Errors
    ///
    /// Any source error.
    pub fn at_eol(&mut self) -> Result<bool, ReadError<S::Error>> {
        Ok(self.peek()?.is_none_or(|c| self.syntax.is_line_end(c)))
    }

    /// Returns `true` if the next character is whitespace.
    ///
    /// # Errors
    ///
    /// Any source error.
    pub fn at_whitespace(&mut self) -> Result<bool, ReadError<S::Error>> {
        Ok(self.peek()?.is_some_and(|c| self.syntax.is_whitespace(c)))
    }

    /// Consumes the next character if it is `c`.
    ///
    /// # Errors
    ///
    /// Any source error. Nothing is consumed on error or mismatch.
    pub fn at_skip(&mut self, c: char) -> Result<bool, ReadError<S::Error>> {
        self.skip_if(|reader| reader.at(c), 1)
    }

    /// Consumes the upcoming characters if they spell `s`; otherwise
    /// consumes nothing.
    ///
    /// # Errors
    ///
    /// As [`at_str`](Self::at_str).
    pub fn at_skip_str(&mut self, s: &str) -> Result<bool, ReadError<S::Error>> {
        self.skip_if(|reader| reader.at_str(s), s.chars().count())
    }

    /// Consumes `word` if [`at_word`](Self::at_word) holds.
    ///
    /// # Errors
    ///
    /// As [`at_word`](Self::at_word).
    pub fn at_skip_word(&mut self, word: &str) -> Result<bool, ReadError<S::Error>> {
        self.skip_if(|reader| reader.at_word(word), word.chars().count())
    }

    /// Consumes one whitespace character, if present.
    ///
    /// # Errors
    ///
    /// Any source error.
    pub fn at_skip_whitespace_char(&mut self) -> Result<bool, ReadError<S::Error>> {
        self.skip_if(Self::at_whitespace, 1)
    }

    /// Consumes a comment up to, but not including, the line end or the end
    /// of input.
    ///
    /// # Errors
    ///
    /// Any source error.
    pub fn at_skip_comment(&mut self) -> Result<bool, ReadError<S::Error>> {
        let prefix = self.syntax.comment_prefix().chars().count();
        if !self.skip_if(Self::at_comment, prefix)? {
            return Ok(false);
        }
        while !self.at_eol()? {
            self.input.buffer.advance(1)?;
        }
        Ok(true)
    }

    /// Skips any run of whitespace and comments.
    ///
    /// # Errors
    ///
    /// Any source error.
    pub fn skip_whitespace_and_comments(&mut self) -> Result<(), ReadError<S::Error>> {
        loop {
            let mut advanced = false;
            while self.at_skip_whitespace_char()? {
                advanced = true;
            }
            if self.at_skip_comment()? {
                advanced = true;
            }
            if !advanced {
                return Ok(());
            }
        }
    }

    /// Runs `test` and, if it holds, consumes the `len` characters it
    /// inspected. They are buffered by then.
    fn skip_if(
        &mut self,
        test: impl FnOnce(&mut Self) -> Result<bool, ReadError<S::Error>>,
        len: usize,
    ) -> Result<bool, ReadError<S::Error>> {
        if !test(self)? {
            return Ok(false);
        }
        self.input.buffer.advance(len)?;
        Ok(true)
    }

    /// Consumes and returns the next character, or `None` at the end of
    /// input.
    ///
    /// # Errors
    ///
    /// Any source error.
    pub fn read(&mut self) -> Result<Option<char>, ReadError<S::Error>> {
        if !self.input.buffer.is_empty() {
            return Ok(Some(self.input.buffer.remove()?));
        }
        if self.input.buffer.is_marked() {
            return self.input.take_buffered();
        }
        self.input.pull()
    }

    /// Moves characters into `dst`: buffered ones first, then a single bulk
    /// read from the source for the rest.
    ///
    /// Returns `Some(0)` for an empty `dst`, `None` if no characters remain,
    /// and otherwise the number of characters written. Fewer than
    /// `dst.len()` does not imply the end of input.
    ///
    /// # Errors
    ///
    /// Any source error. Characters already moved out of the buffer are in
    /// `dst` but not counted.
    pub fn read_into(&mut self, dst: &mut [char]) -> Result<Option<usize>, ReadError<S::Error>> {
        if dst.is_empty() {
            return Ok(Some(0));
        }
        let mut n = self.input.buffer.drain_into(dst);
        if self.input.buffer.is_marked() {
            while n < dst.len() {
                let Some(c) = self.input.take_buffered()? else {
                    break;
                };
                dst[n] = c;
                n += 1;
            }
        } else if n < dst.len() && !self.input.eof {
            if let Some(source) = self.input.source.as_mut() {
                match source.read_into(&mut dst[n..]).map_err(ReadError::Source)? {
                    Some(pulled) => n += pulled,
                    None => {
                        tracing::debug!("source exhausted");
                        self.input.eof = true;
                    }
                }
            }
        }
        Ok((n > 0).then_some(n))
    }

    /// Discards up to `n` characters and returns how many were discarded.
    ///
    /// Buffered characters go first; the source is asked to skip the rest.
    /// Returns less than `n` only at the end of input.
    ///
    /// # Errors
    ///
    /// Any source error.
    pub fn skip(&mut self, n: usize) -> Result<usize, ReadError<S::Error>> {
        let buffered = self.input.buffer.len();
        if n < buffered {
            self.input.buffer.advance(n)?;
            return Ok(n);
        }
        self.input.buffer.advance(buffered)?;
        let mut skipped = buffered;
        if self.input.buffer.is_marked() {
            while skipped < n && self.input.take_buffered()?.is_some() {
                skipped += 1;
            }
        } else if skipped < n && !self.input.eof {
            if let Some(source) = self.input.source.as_mut() {
                skipped += source.skip(n - skipped).map_err(ReadError::Source)?;
            }
        }
        Ok(skipped)
    }

    /// Marks the current position so [`reset`](Self::reset) can return to
    /// it. Replaces any earlier mark.
    ///
    /// The mark stays valid while at most `capacity` characters separate it
    /// from the furthest character pulled since; `limit` states how many
    /// the caller means to read and is checked against the capacity.
    ///
    /// # Errors
    ///
    /// [`BufferError::MarkLimitExceedsCapacity`] if `limit > capacity`.
    pub fn mark(&mut self, limit: usize) -> Result<(), ReadError<S::Error>> {
        self.input.buffer.set_mark(limit)?;
        tracing::debug!(limit, buffered = self.buffered(), "mark set");
        Ok(())
    }

    /// Rewinds to the most recent mark.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidMark`] if there is no mark or it was
    /// overwritten. The position is unchanged in that case.
    pub fn reset(&mut self) -> Result<(), ReadError<S::Error>> {
        self.input.buffer.reset_to_mark()?;
        tracing::debug!(buffered = self.buffered(), "reset to mark");
        Ok(())
    }

    /// Returns `true` if the next read will not block.
    ///
    /// # Errors
    ///
    /// Any source error.
    pub fn ready(&mut self) -> Result<bool, ReadError<S::Error>> {
        if !self.input.buffer.is_empty() {
            return Ok(true);
        }
        match self.input.source.as_mut() {
            Some(source) if !self.input.eof => source.ready().map_err(ReadError::Source),
            _ => Ok(false),
        }
    }

    /// Borrows the reader as an iterator of the characters it has left.
    /// The reader stays usable once the iterator is dropped.
    pub fn chars(&mut self) -> Chars<'_, S, Y> {
        Chars { reader: self }
    }

    /// Closes the source and discards buffered input. Afterwards every read
    /// reports the end of input. Closing twice is a no-op.
    ///
    /// # Errors
    ///
    /// The source's close error. The reader is closed regardless.
    pub fn close(&mut self) -> Result<(), ReadError<S::Error>> {
        let source = self.input.source.take();
        self.input.buffer.clear();
        self.input.eof = true;
        if let Some(mut source) = source {
            tracing::debug!("closing source");
            source.close().map_err(ReadError::Source)?;
        }
        Ok(())
    }
}

/// Iterator over the remaining characters of a [`LookAheadReader`], created
/// by [`LookAheadReader::chars`].
///
/// Each item is one [`read`](LookAheadReader::read); a source error is
/// yielded in place and iteration may continue past it.
#[derive(Debug)]
pub struct Chars<'r, S, Y = SyntaxOptions> {
    reader: &'r mut LookAheadReader<S, Y>,
}

impl<S: Source, Y: Syntax> Iterator for Chars<'_, S, Y> {
    type Item = Result<char, ReadError<S::Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read().transpose()
    }
}
