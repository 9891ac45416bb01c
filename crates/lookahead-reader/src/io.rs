//! [`Source`] adapter for byte streams implementing [`std::io::Read`].

use std::io::{self, Read};

use crate::Source;

const REPLACEMENT: char = '\u{FFFD}';

/// Decodes UTF-8 from a byte stream one character at a time.
///
/// Bytes are pulled one by one, so wrap unbuffered handles such as files or
/// sockets in a [`std::io::BufReader`]. Invalid or truncated sequences
/// decode to U+FFFD. Reads interrupted by a signal are retried.
#[derive(Debug)]
pub struct Utf8Source<R> {
    inner: R,
    pending: [u8; 4],
    pending_len: usize,
    closed: bool,
}

impl<R: Read> Utf8Source<R> {
    /// Wraps `inner`.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pending: [0; 4],
            pending_len: 0,
            closed: false,
        }
    }

    /// Borrows the wrapped reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Unwraps the reader. Bytes of a partially decoded character are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
    }
}

/// Length of the sequence introduced by `lead`; 1 for bytes that cannot
/// start a sequence so they are replaced on their own.
fn sequence_len(lead: u8) -> usize {
    match lead {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 1,
    }
}

impl<R: Read> Source for Utf8Source<R> {
    type Error = io::Error;

    fn read_char(&mut self) -> io::Result<Option<char>> {
        if self.closed {
            return Ok(None);
        }
        if self.pending_len == 0 {
            let Some(lead) = self.read_byte()? else {
                return Ok(None);
            };
            self.pending[0] = lead;
            self.pending_len = 1;
        }
        let want = sequence_len(self.pending[0]);
        while self.pending_len < want {
            let Some(byte) = self.read_byte()? else {
                break;
            };
            self.pending[self.pending_len] = byte;
            self.pending_len += 1;
        }

        let (ch, len) = bstr::decode_utf8(&self.pending[..self.pending_len]);
        let len = len.max(1);
        self.pending.copy_within(len..self.pending_len, 0);
        self.pending_len -= len;
        Ok(Some(ch.unwrap_or(REPLACEMENT)))
    }

    fn ready(&mut self) -> io::Result<bool> {
        Ok(!self.closed && self.pending_len > 0)
    }

    fn close(&mut self) -> io::Result<()> {
        self.closed = true;
        self.pending_len = 0;
        Ok(())
    }
}
