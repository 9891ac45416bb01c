use core::convert::Infallible;

use super::utils::{Probe, reader, rest};
use crate::{BufferError, ErrorKind, LookAheadReader, ReadError, ReaderOptions, StrSource};

#[test]
fn comment_then_word() {
    let mut r = reader("# comment\nfoo", 8);
    r.skip_whitespace_and_comments().unwrap();
    assert!(r.at_skip_word("foo").unwrap());
    assert!(r.at_eof().unwrap());
}

#[test]
fn word_prefix_of_identifier() {
    let mut r = reader("ifX", 4);
    assert!(!r.at_word("if").unwrap());
    assert!(r.at_skip('i').unwrap());
    assert!(r.at_skip('f').unwrap());
    assert_eq!(r.read().unwrap(), Some('X'));
}

#[test]
fn lookahead_past_capacity() {
    let mut r = reader("abc", 2);
    let err = r.peek_nth(2).unwrap_err();
    assert_eq!(
        err,
        ReadError::LookaheadExceedsCapacity {
            requested: 3,
            capacity: 2
        }
    );
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(
        alloc::string::ToString::to_string(&err)
            .starts_with("requested lookahead exceeds buffer capacity")
    );
    // The failed call consumed nothing.
    assert_eq!(rest(&mut r).unwrap(), "abc");
}

#[test]
fn fill_past_capacity_fails_in_every_state() {
    let mut r = reader("a", 2);
    assert!(r.fill(3).is_err());
    r.fill(2).unwrap();
    assert!(r.is_eof());
    assert!(r.fill(3).is_err());
    r.close().unwrap();
    assert!(r.fill(3).is_err());
}

#[test]
fn empty_input() {
    let mut r = reader("", 4);
    assert!(r.at_eof().unwrap());
    assert_eq!(r.read().unwrap(), None);
    assert!(!r.at_skip_whitespace_char().unwrap());
    assert!(r.at_eol().unwrap());
    assert!(!r.at_comment().unwrap());
}

#[test]
fn zero_capacity_is_rejected() {
    let err = LookAheadReader::from_text("abc", 0).unwrap_err();
    assert_eq!(err, BufferError::ZeroCapacity);
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn peek_does_not_consume() {
    let mut r = reader("xyz", 3);
    assert_eq!(r.peek_nth(2).unwrap(), Some('z'));
    assert_eq!(r.peek().unwrap(), Some('x'));
    assert_eq!(r.buffered(), 3);
    assert_eq!(r.read().unwrap(), Some('x'));
    assert_eq!(r.peek().unwrap(), Some('y'));
    assert_eq!(r.peek_nth(2).unwrap(), None);
}

#[test]
fn fill_is_lazy() {
    let mut probe = Probe::new("abcdef");
    {
        let mut r = LookAheadReader::new(&mut probe, 4).unwrap();
        assert!(r.at('a').unwrap());
        assert!(r.at_nth(1, 'b').unwrap());
        assert_eq!(r.buffered(), 2);
    }
    assert_eq!(probe.reads, 2);
}

#[test]
fn buffered_characters_survive_end_of_input() {
    let mut r = reader("ab", 8);
    assert_eq!(r.peek_nth(5).unwrap(), None);
    assert!(r.is_eof());
    assert!(r.at_str("ab").unwrap());
    assert!(!r.at_eof().unwrap());
    assert_eq!(rest(&mut r).unwrap(), "ab");
    assert!(r.at_eof().unwrap());
}

#[test]
fn end_of_input_is_sticky() {
    let mut probe = Probe::new("a");
    {
        let mut r = LookAheadReader::new(&mut probe, 4).unwrap();
        assert_eq!(r.read().unwrap(), Some('a'));
        for _ in 0..3 {
            assert_eq!(r.read().unwrap(), None);
            assert_eq!(r.peek_nth(3).unwrap(), None);
            assert!(r.at_eof().unwrap());
        }
    }
    assert_eq!(probe.reads_after_end, 0);
}

#[test]
fn read_bypasses_empty_buffer() {
    let mut probe = Probe::new("ab");
    {
        let mut r = LookAheadReader::new(&mut probe, 4).unwrap();
        assert_eq!(r.read().unwrap(), Some('a'));
        assert_eq!(r.buffered(), 0);
    }
    assert_eq!(probe.reads, 1);
}

#[test]
fn close_is_terminal_and_idempotent() {
    let mut probe = Probe::new("abc");
    {
        let mut r = LookAheadReader::new(&mut probe, 4).unwrap();
        assert_eq!(r.peek_nth(1).unwrap(), Some('b'));
        r.close().unwrap();
        assert!(r.is_closed());
        assert!(r.is_eof());
        assert_eq!(r.buffered(), 0);
        assert_eq!(r.read().unwrap(), None);
        assert!(!r.at('c').unwrap());
        assert!(!r.at_whitespace().unwrap());
        assert!(r.at_eof().unwrap());
        assert!(!r.ready().unwrap());
        assert_eq!(r.skip(2).unwrap(), 0);
        let mut dst = ['\0'; 2];
        assert_eq!(r.read_into(&mut dst).unwrap(), None);
        r.close().unwrap();
        assert!(r.get_ref().is_none());
    }
    assert_eq!(probe.closes, 1);
}

#[test]
fn ready_reflects_buffer_then_source() {
    let mut probe = Probe::new("ab");
    probe.ready = false;
    let mut r = LookAheadReader::new(&mut probe, 4).unwrap();
    assert!(!r.ready().unwrap());
    r.peek().unwrap();
    assert!(r.ready().unwrap());
    r.read().unwrap();
    assert!(!r.ready().unwrap());
}

#[test]
fn iterator_yields_remaining_characters() {
    let mut r = reader("héllo", 2);
    r.at_skip('h').unwrap();
    let collected: Result<alloc::string::String, ReadError<Infallible>> = r.chars().collect();
    assert_eq!(collected.unwrap(), "éllo");
    assert_eq!(r.chars().next(), None);
    assert!(r.at_eof().unwrap());
}

#[test]
fn default_capacity_constructor() {
    let mut r = LookAheadReader::with_default_capacity(StrSource::new("xyz"));
    assert_eq!(r.capacity(), 128);
    assert_eq!(r.capacity(), ReaderOptions::default().capacity);
    assert_eq!(r.peek_nth(127).unwrap(), None);
    assert!(r.peek_nth(128).is_err());
    assert!(r.at_skip_word("xyz").unwrap());
}
