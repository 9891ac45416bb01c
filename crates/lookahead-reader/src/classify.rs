//! Single-character predicates shared by the reader and the default syntax.

/// The byte-order mark, which sources decoded from files commonly begin with.
pub const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Returns `true` for the ASCII decimal digits `0`–`9`.
#[inline]
#[must_use]
pub const fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Returns `true` if `c` may begin an identifier: an ASCII letter, `_` or `-`.
#[inline]
#[must_use]
pub const fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '-'
}

/// Returns `true` if `c` may continue an identifier.
#[inline]
#[must_use]
pub const fn is_ident_char(c: char) -> bool {
    is_ident_start(c) || is_digit(c)
}

/// Returns `true` for space, `\n`, `\r`, `\t` and the byte-order mark.
#[inline]
#[must_use]
pub const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\n' | '\r' | '\t' | BYTE_ORDER_MARK)
}

/// Returns `true` for `\n` and `\r`.
#[inline]
#[must_use]
pub const fn is_line_end(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case('0', true)]
    #[case('9', true)]
    #[case('a', false)]
    #[case('٣', false)]
    fn digits(#[case] c: char, #[case] expected: bool) {
        assert_eq!(is_digit(c), expected);
    }

    #[rstest]
    #[case('a', true, true)]
    #[case('Z', true, true)]
    #[case('_', true, true)]
    #[case('-', true, true)]
    #[case('7', false, true)]
    #[case('.', false, false)]
    #[case('é', false, false)]
    #[case(' ', false, false)]
    fn identifiers(#[case] c: char, #[case] start: bool, #[case] inner: bool) {
        assert_eq!(is_ident_start(c), start);
        assert_eq!(is_ident_char(c), inner);
    }

    #[rstest]
    #[case(' ', true)]
    #[case('\n', true)]
    #[case('\r', true)]
    #[case('\t', true)]
    #[case(BYTE_ORDER_MARK, true)]
    #[case('\u{00A0}', false)]
    #[case('\u{000B}', false)]
    #[case('x', false)]
    fn whitespace(#[case] c: char, #[case] expected: bool) {
        assert_eq!(is_whitespace(c), expected);
    }

    #[test]
    fn line_ends_are_whitespace() {
        for c in ['\n', '\r'] {
            assert!(is_line_end(c));
            assert!(is_whitespace(c));
        }
        assert!(!is_line_end(' '));
    }
}
