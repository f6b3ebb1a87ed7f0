//! The option-action table.
//!
//! Options transform the whole value list of one reference. Most map each value independently;
//! [`VarOption::Join`] and [`VarOption::Index`] collapse the list to a single value.

use itertools::Itertools;
use tracing::warn;
use varexpand_syntax::OptionSpec;
use varexpand_util::path;
use varexpand_util::split::unescape;

#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub enum VarOption {
    /// `u`
    Upper,
    /// `l`
    Lower,
    /// `p`
    Prefix,
    /// `s`
    Suffix,
    /// `P`: prefix unless the value already starts with the parameter
    PrefixIfMissing,
    /// `S`: suffix unless the value already ends with the parameter
    SuffixIfMissing,
    /// `f`
    ForwardSlashes,
    /// `b`
    Backslashes,
    /// `n`: the separator of the host doing the expansion
    NativeSeparators,
    /// `B`: final path component without extension
    Basename,
    /// `F`: final path component
    Filename,
    /// `D`
    Dirname,
    /// `j`: collapse to one value, joined by the parameter
    Join,
    /// `i`: collapse to the value at the index given by the parameter, or `""`
    Index,
    /// `r`
    StripPrefix,
    /// `R`
    StripSuffix,
    /// `t`: trim any character in the parameter from both ends (whitespace if none given)
    Trim,
}

impl VarOption {
    pub fn from_letter(letter: char) -> Option<Self> {
        Some(match letter {
            'u' => VarOption::Upper,
            'l' => VarOption::Lower,
            'p' => VarOption::Prefix,
            's' => VarOption::Suffix,
            'P' => VarOption::PrefixIfMissing,
            'S' => VarOption::SuffixIfMissing,
            'f' => VarOption::ForwardSlashes,
            'b' => VarOption::Backslashes,
            'n' => VarOption::NativeSeparators,
            'B' => VarOption::Basename,
            'F' => VarOption::Filename,
            'D' => VarOption::Dirname,
            'j' => VarOption::Join,
            'i' => VarOption::Index,
            'r' => VarOption::StripPrefix,
            'R' => VarOption::StripSuffix,
            't' => VarOption::Trim,
            _ => return None,
        })
    }

    pub fn apply(self, values: Vec<String>, param: &str) -> Vec<String> {
        match self {
            VarOption::Upper => map_each(values, |v| v.to_uppercase()),
            VarOption::Lower => map_each(values, |v| v.to_lowercase()),
            VarOption::Prefix => map_each(values, |v| format!("{param}{v}")),
            VarOption::Suffix => map_each(values, |v| v + param),
            VarOption::PrefixIfMissing => map_each(values, |v| {
                if v.starts_with(param) {
                    v
                } else {
                    format!("{param}{v}")
                }
            }),
            VarOption::SuffixIfMissing => map_each(values, |v| {
                if v.ends_with(param) { v } else { v + param }
            }),
            VarOption::ForwardSlashes => {
                map_each(values, |v| path::to_forward_slashes(&v).into_owned())
            }
            VarOption::Backslashes => map_each(values, |v| path::to_backslashes(&v).into_owned()),
            VarOption::NativeSeparators => map_each(values, |v| path::to_native(&v).into_owned()),
            VarOption::Basename => map_each(values, |v| path::basename(&v).to_string()),
            VarOption::Filename => map_each(values, |v| path::filename(&v).to_string()),
            VarOption::Dirname => map_each(values, |v| path::dirname(&v).to_string()),
            VarOption::Join => vec![values.iter().join(param)],
            VarOption::Index => {
                let value = param
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| values.into_iter().nth(i))
                    .unwrap_or_default();
                vec![value]
            }
            VarOption::StripPrefix => map_each(values, |v| match v.strip_prefix(param) {
                Some(stripped) => stripped.to_string(),
                None => v,
            }),
            VarOption::StripSuffix => map_each(values, |v| match v.strip_suffix(param) {
                Some(stripped) => stripped.to_string(),
                None => v,
            }),
            VarOption::Trim => map_each(values, |v| {
                if param.is_empty() {
                    v.trim().to_string()
                } else {
                    v.trim_matches(|c: char| param.contains(c)).to_string()
                }
            }),
        }
    }
}

fn map_each(values: Vec<String>, f: impl FnMut(String) -> String) -> Vec<String> {
    values.into_iter().map(f).collect()
}

/// Run an option chain over `values`. Parameters are read from `text`, the template the chain
/// was parsed from, and unescaped. Unknown letters leave the values untouched.
pub fn apply_chain(mut values: Vec<String>, chain: &[OptionSpec], text: &str) -> Vec<String> {
    for spec in chain {
        let param = unescape(spec.param(text));
        match VarOption::from_letter(spec.letter) {
            Some(option) => values = option.apply(values, &param),
            None => warn!(letter = %spec.letter, "ignoring unknown option"),
        }
    }
    values
}

#[cfg(test)]
mod test {
    use crate::options::VarOption;
    use pretty_assertions::assert_eq;

    fn apply(letter: char, values: &[&str], param: &str) -> Vec<String> {
        let option = VarOption::from_letter(letter).unwrap();
        option.apply(values.iter().map(|v| v.to_string()).collect(), param)
    }

    #[test]
    fn case() {
        assert_eq!(apply('u', &["abc", "Def"], ""), ["ABC", "DEF"]);
        assert_eq!(apply('l', &["ABC", "Def"], ""), ["abc", "def"]);
    }

    #[test]
    fn prefix_suffix() {
        assert_eq!(apply('p', &["A", "B"], "-I"), ["-IA", "-IB"]);
        assert_eq!(apply('s', &["A", "B"], ".o"), ["A.o", "B.o"]);
        assert_eq!(apply('P', &["-Ifoo", "bar"], "-I"), ["-Ifoo", "-Ibar"]);
        assert_eq!(apply('S', &["lib.a", "lib"], ".a"), ["lib.a", "lib.a"]);
    }

    #[test]
    fn strip_and_trim() {
        assert_eq!(apply('r', &["-Ifoo", "bar"], "-I"), ["foo", "bar"]);
        assert_eq!(apply('R', &["main.c", "main.h"], ".c"), ["main", "main.h"]);
        assert_eq!(apply('t', &["  a b \t"], ""), ["a b"]);
        assert_eq!(apply('t', &["\"quoted\"", "'x'"], "\"'"), ["quoted", "x"]);
    }

    #[test]
    fn paths() {
        assert_eq!(apply('f', &["a\\b\\c.o"], ""), ["a/b/c.o"]);
        assert_eq!(apply('b', &["a/b/c.o"], ""), ["a\\b\\c.o"]);
        assert_eq!(apply('B', &["src/main.c", "x.tar.gz"], ""), ["main", "x.tar"]);
        assert_eq!(apply('F', &["src/main.c"], ""), ["main.c"]);
        assert_eq!(apply('D', &["src/main.c", "main.c"], ""), ["src", "."]);
    }

    #[test]
    fn join_collapses() {
        assert_eq!(apply('j', &["A", "B", "C"], "!"), ["A!B!C"]);
        assert_eq!(apply('j', &["A", "B"], ""), ["AB"]);
    }

    #[test]
    fn index_collapses() {
        assert_eq!(apply('i', &["A", "B", "C"], "1"), ["B"]);
        assert_eq!(apply('i', &["A", "B", "C"], " 2 "), ["C"]);
        assert_eq!(apply('i', &["A", "B", "C"], "3"), [""]);
        assert_eq!(apply('i', &["A"], "-1"), [""]);
        assert_eq!(apply('i', &["A"], "one"), [""]);
    }

    #[test]
    fn unknown_letter() {
        assert_eq!(VarOption::from_letter('?'), None);
        assert_eq!(VarOption::from_letter('Z'), None);
    }
}
