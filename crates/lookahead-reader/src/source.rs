//! The pull interface the reader consumes, plus adapters for common inputs.

use core::{convert::Infallible, str::Chars};

/// A blocking, pull-based producer of characters.
///
/// Only [`read_char`](Source::read_char) is required; the remaining methods
/// have defaults built on it. Implementations that can do better (bulk
/// decoding, seeking) should override them.
pub trait Source {
    /// Error produced by the underlying input.
    type Error;

    /// Returns the next character, or `None` once the input is exhausted.
    ///
    /// # Errors
    ///
    /// Any failure of the underlying input.
    fn read_char(&mut self) -> Result<Option<char>, Self::Error>;

    /// Fills `buf` from the front and returns how many characters were
    /// written, or `None` if the input was already exhausted.
    ///
    /// Returns `Some(0)` only when `buf` is empty.
    ///
    /// # Errors
    ///
    /// Any failure of the underlying input.
    fn read_into(&mut self, buf: &mut [char]) -> Result<Option<usize>, Self::Error> {
        let mut n = 0;
        while n < buf.len() {
            match self.read_char()? {
                Some(c) => {
                    buf[n] = c;
                    n += 1;
                }
                None if n == 0 => return Ok(None),
                None => break,
            }
        }
        Ok(Some(n))
    }

    /// Discards up to `n` characters and returns how many were discarded.
    ///
    /// # Errors
    ///
    /// Any failure of the underlying input.
    fn skip(&mut self, n: usize) -> Result<usize, Self::Error> {
        let mut skipped = 0;
        while skipped < n && self.read_char()?.is_some() {
            skipped += 1;
        }
        Ok(skipped)
    }

    /// Hints whether the next read is guaranteed not to block.
    ///
    /// # Errors
    ///
    /// Any failure of the underlying input.
    fn ready(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }

    /// Releases the underlying input. Calling it more than once is allowed.
    ///
    /// # Errors
    ///
    /// Any failure of the underlying input.
    fn close(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<S: Source + ?Sized> Source for &mut S {
    type Error = S::Error;

    fn read_char(&mut self) -> Result<Option<char>, Self::Error> {
        (**self).read_char()
    }

    fn read_into(&mut self, buf: &mut [char]) -> Result<Option<usize>, Self::Error> {
        (**self).read_into(buf)
    }

    fn skip(&mut self, n: usize) -> Result<usize, Self::Error> {
        (**self).skip(n)
    }

    fn ready(&mut self) -> Result<bool, Self::Error> {
        (**self).ready()
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        (**self).close()
    }
}

/// Source over an in-memory string.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    /// Creates a source yielding the characters of `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
        }
    }

    /// The text not yet read.
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.chars.as_str()
    }
}

impl<'a> From<&'a str> for StrSource<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text)
    }
}

impl Source for StrSource<'_> {
    type Error = Infallible;

    #[inline]
    fn read_char(&mut self) -> Result<Option<char>, Infallible> {
        Ok(self.chars.next())
    }

    fn skip(&mut self, n: usize) -> Result<usize, Infallible> {
        Ok(self.chars.by_ref().take(n).count())
    }

    fn ready(&mut self) -> Result<bool, Infallible> {
        Ok(!self.chars.as_str().is_empty())
    }
}

/// Source over any infallible character iterator.
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    iter: I,
}

impl<I: Iterator<Item = char>> IterSource<I> {
    /// Wraps `iter`.
    pub fn new(iter: I) -> Self {
        Self { iter }
    }
}

impl<I: Iterator<Item = char>> Source for IterSource<I> {
    type Error = Infallible;

    #[inline]
    fn read_char(&mut self) -> Result<Option<char>, Infallible> {
        Ok(self.iter.next())
    }
}

/// Source over an iterator of fallible reads, such as a decoder.
#[derive(Debug, Clone)]
pub struct TryIterSource<I> {
    iter: I,
}

impl<I, E> TryIterSource<I>
where
    I: Iterator<Item = Result<char, E>>,
{
    /// Wraps `iter`.
    pub fn new(iter: I) -> Self {
        Self { iter }
    }
}

impl<I, E> Source for TryIterSource<I>
where
    I: Iterator<Item = Result<char, E>>,
{
    type Error = E;

    fn read_char(&mut self) -> Result<Option<char>, E> {
        self.iter.next().transpose()
    }
}
