#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lookahead_reader::{BufferError, LookAheadReader, ReadError};

#[derive(Debug, Arbitrary)]
enum Op {
    Peek(u8),
    Read,
    ReadInto(u8),
    Skip(u8),
    AtSkip(char),
    AtSkipStr(String),
    AtSkipWord(String),
    SkipTrivia,
    Mark(u8),
    Reset,
}

#[derive(Debug, Arbitrary)]
struct Input {
    capacity: u8,
    text: String,
    ops: Vec<Op>,
}

/// Reference behavior: an index into the fully materialized input.
struct Model {
    input: Vec<char>,
    pos: usize,
    capacity: usize,
    mark: Option<usize>,
}

impl Model {
    fn at(&self, i: usize) -> Option<char> {
        self.input.get(self.pos + i).copied()
    }

    fn take(&mut self, n: usize) -> usize {
        let n = n.min(self.input.len() - self.pos);
        self.pos += n;
        n
    }

    /// `None` when the pattern would need more lookahead than the capacity.
    fn matches(&self, pattern: &str) -> Option<bool> {
        if pattern.is_empty() {
            return Some(self.at(0).is_some());
        }
        for (i, c) in pattern.chars().enumerate() {
            if i >= self.capacity {
                return None;
            }
            if self.at(i) != Some(c) {
                return Some(false);
            }
        }
        Some(true)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn fuzz(input: Input) {
    let capacity = usize::from(input.capacity % 32) + 1;
    let mut reader = LookAheadReader::from_text(&input.text, capacity).unwrap();
    let mut model = Model {
        input: input.text.chars().collect(),
        pos: 0,
        capacity,
        mark: None,
    };

    for op in &input.ops {
        match op {
            Op::Peek(n) => {
                let n = usize::from(*n);
                match reader.peek_nth(n) {
                    Ok(c) => assert_eq!(c, model.at(n)),
                    Err(err) => {
                        assert!(n >= capacity, "{err}");
                    }
                }
            }
            Op::Read => {
                let c = reader.read().unwrap();
                assert_eq!(c, model.at(0));
                model.take(1);
            }
            Op::ReadInto(n) => {
                let mut dst = vec!['\0'; usize::from(*n)];
                let got = reader.read_into(&mut dst).unwrap();
                let start = model.pos;
                let taken = model.take(dst.len());
                match got {
                    Some(k) => {
                        // A bulk read may stop short; give back what it did not deliver.
                        assert!(k <= taken);
                        assert_eq!(&dst[..k], &model.input[start..start + k]);
                        model.pos = start + k;
                    }
                    None => assert!(taken == 0 && !dst.is_empty()),
                }
            }
            Op::Skip(n) => {
                let skipped = reader.skip(usize::from(*n)).unwrap();
                assert_eq!(skipped, model.take(usize::from(*n)));
            }
            Op::AtSkip(c) => {
                let hit = reader.at_skip(*c).unwrap();
                assert_eq!(hit, model.at(0) == Some(*c));
                model.take(usize::from(hit));
            }
            Op::AtSkipStr(s) => match (reader.at_skip_str(s), model.matches(s)) {
                (Ok(hit), Some(expected)) => {
                    assert_eq!(hit, expected);
                    if hit {
                        model.take(s.chars().count());
                    }
                }
                (Err(ReadError::LookaheadExceedsCapacity { .. }), None) => {}
                (got, expected) => panic!("{got:?} vs {expected:?}"),
            },
            Op::AtSkipWord(w) => {
                let len = w.chars().count();
                let expected = match model.matches(w) {
                    Some(true) if len >= capacity => None,
                    Some(true) => Some(!model.at(len).is_some_and(is_ident_char)),
                    other => other,
                };
                match (reader.at_skip_word(w), expected) {
                    (Ok(hit), Some(expected)) => {
                        assert_eq!(hit, expected);
                        if hit {
                            model.take(len);
                        }
                    }
                    (Err(ReadError::LookaheadExceedsCapacity { .. }), None) => {}
                    (got, expected) => panic!("{got:?} vs {expected:?}"),
                }
            }
            Op::SkipTrivia => {
                reader.skip_whitespace_and_comments().unwrap();
                loop {
                    match model.at(0) {
                        Some(' ' | '\n' | '\r' | '\t' | '\u{FEFF}') => model.pos += 1,
                        Some('#') => {
                            while model.at(0).is_some_and(|c| c != '\n' && c != '\r') {
                                model.pos += 1;
                            }
                        }
                        _ => break,
                    }
                }
            }
            Op::Mark(limit) => {
                let limit = usize::from(*limit);
                match reader.mark(limit) {
                    Ok(()) => model.mark = Some(model.pos),
                    Err(err) => assert!(limit > capacity, "{err}"),
                }
            }
            Op::Reset => match reader.reset() {
                Ok(()) => model.pos = model.mark.expect("reset succeeded without a mark"),
                Err(err) => assert_eq!(err, ReadError::Buffer(BufferError::InvalidMark)),
            },
        }
    }
}

fuzz_target!(|input: Input| fuzz(input));
