//! Bounded-lookahead character reader for hand-written parsers.
//!
//! [`LookAheadReader`] wraps any [`Source`] of characters and lets a parser
//! peek up to a fixed number of characters ahead, test for tokens, words and
//! comments, and consume input only when a test succeeds. The lookahead is
//! held in a fixed-size [`RingBuffer`], so memory use is bounded by the
//! capacity chosen at construction.
//!
//! ```rust
//! use lookahead_reader::LookAheadReader;
//!
//! let mut reader = LookAheadReader::from_text("ifX", 4).unwrap();
//! assert!(!reader.at_word("if").unwrap());
//! assert!(reader.at_skip('i').unwrap());
//! assert!(reader.at_skip('f').unwrap());
//! assert_eq!(reader.read().unwrap(), Some('X'));
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod classify;
mod error;
#[cfg(feature = "std")]
mod io;
mod options;
mod reader;
mod ring_buffer;
mod source;
mod syntax;

#[cfg(test)]
mod tests;

pub use error::{BufferError, ErrorKind, ReadError};
#[cfg(feature = "std")]
pub use io::Utf8Source;
pub use options::ReaderOptions;
pub use reader::{Chars, LookAheadReader};
pub use ring_buffer::RingBuffer;
pub use source::{IterSource, Source, StrSource, TryIterSource};
pub use syntax::{Syntax, SyntaxOptions};
