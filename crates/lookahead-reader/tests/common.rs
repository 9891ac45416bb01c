#![allow(missing_docs, dead_code)]

use core::fmt::Write;

use lookahead_reader::{LookAheadReader, ReadError, Source, classify};

pub const SETTINGS: &str = "\u{FEFF}# settings
let name = \"demo\" => 42
letter=7 # trailing
";

/// Renders one token per line for a small `let`-binding language.
pub fn tokenize<S: Source>(reader: &mut LookAheadReader<S>) -> Result<String, ReadError<S::Error>> {
    let mut out = String::new();
    loop {
        reader.skip_whitespace_and_comments()?;
        let Some(c) = reader.peek()? else {
            break;
        };
        if reader.at_skip_word("let")? {
            writeln!(out, "keyword let").unwrap();
        } else if classify::is_ident_start(c) {
            let word = take_while(reader, classify::is_ident_char)?;
            writeln!(out, "ident {word}").unwrap();
        } else if classify::is_digit(c) {
            let digits = take_while(reader, classify::is_digit)?;
            writeln!(out, "number {digits}").unwrap();
        } else if reader.at_skip('"')? {
            let text = take_while(reader, |c| c != '"')?;
            reader.at_skip('"')?;
            writeln!(out, "string {text}").unwrap();
        } else if reader.at_skip_str("=>")? {
            writeln!(out, "punct =>").unwrap();
        } else {
            reader.read()?;
            writeln!(out, "punct {c}").unwrap();
        }
    }
    Ok(out)
}

fn take_while<S: Source>(
    reader: &mut LookAheadReader<S>,
    predicate: impl Fn(char) -> bool,
) -> Result<String, ReadError<S::Error>> {
    let mut out = String::new();
    while let Some(c) = reader.peek()? {
        if !predicate(c) {
            break;
        }
        reader.read()?;
        out.push(c);
    }
    Ok(out)
}
