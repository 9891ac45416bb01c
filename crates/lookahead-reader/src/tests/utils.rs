use alloc::string::String;
use core::{convert::Infallible, fmt};

use crate::{LookAheadReader, ReadError, Source, StrSource};

/// Reader over `text` whose errors can be compared with `assert_eq!`.
pub fn reader(text: &str, capacity: usize) -> LookAheadReader<StrSource<'_>> {
    LookAheadReader::from_text(text, capacity).unwrap()
}

/// Reads everything that is left.
pub fn rest<S: Source>(reader: &mut LookAheadReader<S>) -> Result<String, ReadError<S::Error>> {
    let mut out = String::new();
    while let Some(c) = reader.read()? {
        out.push(c);
    }
    Ok(out)
}

/// Wraps a string and records how the reader drives it.
#[derive(Debug, Default)]
pub struct Probe<'a> {
    inner: Option<StrSource<'a>>,
    /// Calls to `read_char`.
    pub reads: usize,
    /// Calls to `read_char` after it first returned `None`.
    pub reads_after_end: usize,
    /// Calls to `read_into`.
    pub bulk_reads: usize,
    /// Calls to `close`.
    pub closes: usize,
    /// Value returned from `ready`.
    pub ready: bool,
    exhausted: bool,
}

impl<'a> Probe<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            inner: Some(StrSource::new(text)),
            ..Self::default()
        }
    }
}

impl Source for Probe<'_> {
    type Error = Infallible;

    fn read_char(&mut self) -> Result<Option<char>, Infallible> {
        self.reads += 1;
        if self.exhausted {
            self.reads_after_end += 1;
        }
        let next = self.inner.as_mut().and_then(|s| s.read_char().ok().flatten());
        self.exhausted |= next.is_none();
        Ok(next)
    }

    fn read_into(&mut self, buf: &mut [char]) -> Result<Option<usize>, Infallible> {
        self.bulk_reads += 1;
        let mut n = 0;
        while n < buf.len() {
            let Some(c) = self.inner.as_mut().and_then(|s| s.read_char().ok().flatten()) else {
                break;
            };
            buf[n] = c;
            n += 1;
        }
        Ok((n > 0 || buf.is_empty()).then_some(n))
    }

    fn ready(&mut self) -> Result<bool, Infallible> {
        Ok(self.ready)
    }

    fn close(&mut self) -> Result<(), Infallible> {
        self.closes += 1;
        self.inner = None;
        Ok(())
    }
}

/// Error raised by [`Faulty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fault;

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("injected fault")
    }
}

/// Yields `text`, failing once when asked for the character at `fail_at`.
#[derive(Debug)]
pub struct Faulty<'a> {
    chars: core::str::Chars<'a>,
    position: usize,
    fail_at: Option<usize>,
    /// Whether `close` should fail.
    pub fail_close: bool,
}

impl<'a> Faulty<'a> {
    pub fn new(text: &'a str, fail_at: usize) -> Self {
        Self {
            chars: text.chars(),
            position: 0,
            fail_at: Some(fail_at),
            fail_close: false,
        }
    }
}

impl Source for Faulty<'_> {
    type Error = Fault;

    fn read_char(&mut self) -> Result<Option<char>, Fault> {
        if self.fail_at == Some(self.position) {
            self.fail_at = None;
            return Err(Fault);
        }
        let next = self.chars.next();
        if next.is_some() {
            self.position += 1;
        }
        Ok(next)
    }

    fn close(&mut self) -> Result<(), Fault> {
        if self.fail_close { Err(Fault) } else { Ok(()) }
    }
}
