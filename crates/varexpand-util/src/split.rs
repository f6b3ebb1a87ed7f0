use std::borrow::Cow;

/// Remove backslash escapes from `input`: `\x` becomes `x` for any character `x`.
///
/// A trailing backslash with nothing to escape is kept as-is.
///
/// # Example
///
/// ```
/// use varexpand_util::split::unescape;
/// assert_eq!(unescape(r"a\:b"), "a:b");
/// assert_eq!(unescape(r"\\"), "\\");
/// assert_eq!(unescape("plain"), "plain");
/// ```
pub fn unescape(input: &str) -> Cow<'_, str> {
    if !input.contains('\\') {
        return Cow::Borrowed(input);
    }

    let mut ret = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => ret.push(chars.next().unwrap_or('\\')),
            _ => ret.push(c),
        }
    }
    Cow::Owned(ret)
}

/// Split `input` at every `separator` that is not preceded by a backslash, unescaping each piece.
///
/// # Example
///
/// ```
/// use varexpand_util::split::split_unescaped;
/// assert_eq!(split_unescaped(r"a,b\,c,,d", ','), vec!["a", "b,c", "", "d"]);
/// ```
pub fn split_unescaped(input: &str, separator: char) -> Vec<String> {
    let mut ret = vec![];
    let mut current = String::new();
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => current.push(chars.next().unwrap_or('\\')),
            c if c == separator => ret.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    ret.push(current);
    ret
}

#[cfg(test)]
mod test {
    use crate::split::{split_unescaped, unescape};
    use pretty_assertions::assert_eq;

    #[test]
    fn unescape_trailing_backslash() {
        assert_eq!(unescape(r"abc\"), r"abc\");
        assert_eq!(unescape(r"\)\:"), "):");
    }

    #[test]
    fn split_single() {
        assert_eq!(split_unescaped("value", ','), vec!["value"]);
        assert_eq!(split_unescaped("", ','), vec![""]);
    }
}
