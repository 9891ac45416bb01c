//! Splits a small `key = value` configuration language into tokens while it
//! streams in, using nothing but lookahead predicates.
//!
//! Input comes from the file named on the command line, or from stdin. Set
//! `RUST_LOG=lookahead_reader=trace` to watch the reader fill its buffer.
//!
//! Run with
//!
//! ```bash
//! printf 'let port = 8080 # http\nname = "demo"\n' |
//!     cargo run -p lookahead-reader --example tokenize
//! ```

use std::{
    env, fmt,
    fs::File,
    io::{self, BufReader, Read},
    process::ExitCode,
};

use lookahead_reader::{
    LookAheadReader, ReadError, ReaderOptions, Source, SyntaxOptions, Utf8Source, classify,
};
use tracing_subscriber::EnvFilter;

enum Token {
    Keyword(&'static str),
    Ident(String),
    Number(String),
    Str(String),
    Punct(char),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Keyword(word) => write!(f, "keyword {word}"),
            Token::Ident(name) => write!(f, "ident   {name}"),
            Token::Number(digits) => write!(f, "number  {digits}"),
            Token::Str(text) => write!(f, "string  {text:?}"),
            Token::Punct(c) => write!(f, "punct   {c}"),
        }
    }
}

const KEYWORDS: &[&str] = &["let", "true", "false"];

fn next_token<S: Source>(
    reader: &mut LookAheadReader<S>,
) -> Result<Option<Token>, ReadError<S::Error>> {
    reader.skip_whitespace_and_comments()?;
    let Some(c) = reader.peek()? else {
        return Ok(None);
    };
    for &keyword in KEYWORDS {
        if reader.at_skip_word(keyword)? {
            return Ok(Some(Token::Keyword(keyword)));
        }
    }
    let token = if classify::is_ident_start(c) {
        Token::Ident(take_while(reader, classify::is_ident_char)?)
    } else if classify::is_digit(c) {
        Token::Number(take_while(reader, classify::is_digit)?)
    } else if reader.at_skip('"')? {
        let text = take_while(reader, |c| c != '"' && !classify::is_line_end(c))?;
        reader.at_skip('"')?;
        Token::Str(text)
    } else {
        reader.read()?;
        Token::Punct(c)
    };
    Ok(Some(token))
}

fn take_while<S: Source>(
    reader: &mut LookAheadReader<S>,
    predicate: impl Fn(char) -> bool,
) -> Result<String, ReadError<S::Error>> {
    let mut out = String::new();
    while let Some(c) = reader.peek()?.filter(|c| predicate(*c)) {
        reader.read()?;
        out.push(c);
    }
    Ok(out)
}

fn run(input: Box<dyn Read>) -> Result<(), ReadError<io::Error>> {
    let source = Utf8Source::new(BufReader::new(input));
    let mut reader = LookAheadReader::with_options(
        source,
        ReaderOptions { capacity: 8 },
        SyntaxOptions::default(),
    )?;
    while let Some(token) = next_token(&mut reader)? {
        println!("{token}");
    }
    reader.close()
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let input: Box<dyn Read> = match env::args().nth(1) {
        Some(path) => match File::open(&path) {
            Ok(file) => Box::new(file),
            Err(err) => {
                eprintln!("cannot open {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(io::stdin()),
    };

    match run(input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
