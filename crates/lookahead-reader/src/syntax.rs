use alloc::borrow::Cow;

use crate::classify;

/// Lexical rules consulted by the reader's whitespace, word, line and
/// comment predicates.
///
/// Every method has a default matching [`SyntaxOptions::default`], so an
/// alternative grammar only overrides what differs.
pub trait Syntax {
    /// Returns `true` if `c` is skipped as whitespace.
    fn is_whitespace(&self, c: char) -> bool {
        classify::is_whitespace(c)
    }

    /// Returns `true` if `c` continues an identifier. A word match fails when
    /// the character after it satisfies this predicate.
    fn is_ident_char(&self, c: char) -> bool {
        classify::is_ident_char(c)
    }

    /// Returns `true` if `c` ends a line (and therefore a line comment).
    fn is_line_end(&self, c: char) -> bool {
        classify::is_line_end(c)
    }

    /// Text that introduces a comment running to the end of the line. An
    /// empty prefix disables comments.
    fn comment_prefix(&self) -> &str {
        "#"
    }
}

/// Configurable [`Syntax`].
///
/// # Examples
///
/// ```rust
/// use lookahead_reader::{LookAheadReader, ReaderOptions, StrSource, SyntaxOptions};
///
/// let mut reader = LookAheadReader::with_options(
///     StrSource::new("// note\nvalue"),
///     ReaderOptions::default(),
///     SyntaxOptions::line_comments("//"),
/// )
/// .unwrap();
/// reader.skip_whitespace_and_comments().unwrap();
/// assert!(reader.at_word("value").unwrap());
/// ```
///
/// # Default
///
/// `#` comments, ASCII whitespace plus the byte-order mark.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SyntaxOptions {
    /// Text that introduces a line comment.
    ///
    /// # Default
    ///
    /// `"#"`
    pub comment_prefix: Cow<'static, str>,

    /// Whether to skip any Unicode whitespace, not only space, tab, line
    /// breaks and the byte-order mark.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unicode_whitespace: bool,
}

impl SyntaxOptions {
    /// Default rules with comments introduced by `prefix`.
    #[must_use]
    pub fn line_comments(prefix: impl Into<Cow<'static, str>>) -> Self {
        Self {
            comment_prefix: prefix.into(),
            ..Self::default()
        }
    }
}

impl Default for SyntaxOptions {
    fn default() -> Self {
        Self {
            comment_prefix: Cow::Borrowed("#"),
            allow_unicode_whitespace: false,
        }
    }
}

impl Syntax for SyntaxOptions {
    fn is_whitespace(&self, c: char) -> bool {
        classify::is_whitespace(c) || (self.allow_unicode_whitespace && c.is_whitespace())
    }

    fn comment_prefix(&self) -> &str {
        &self.comment_prefix
    }
}

impl<Y: Syntax + ?Sized> Syntax for &Y {
    fn is_whitespace(&self, c: char) -> bool {
        (**self).is_whitespace(c)
    }

    fn is_ident_char(&self, c: char) -> bool {
        (**self).is_ident_char(c)
    }

    fn is_line_end(&self, c: char) -> bool {
        (**self).is_line_end(c)
    }

    fn comment_prefix(&self) -> &str {
        (**self).comment_prefix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unicode_whitespace_is_opt_in() {
        let strict = SyntaxOptions::default();
        assert!(!strict.is_whitespace('\u{2003}'));
        let lenient = SyntaxOptions {
            allow_unicode_whitespace: true,
            ..SyntaxOptions::default()
        };
        assert!(lenient.is_whitespace('\u{2003}'));
        assert!(lenient.is_whitespace('\u{FEFF}'));
    }

    #[test]
    fn line_comments_keep_other_defaults() {
        let syntax = SyntaxOptions::line_comments("--");
        assert_eq!(syntax.comment_prefix(), "--");
        assert!(!syntax.allow_unicode_whitespace);
        assert!(syntax.is_ident_char('-'));
    }
}
