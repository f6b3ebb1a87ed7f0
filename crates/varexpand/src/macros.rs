/// Build a [`Vars`](crate::Vars) from `name => [values...]` pairs, in order.
///
/// ```
/// use varexpand::vars;
///
/// let v = vars! {
///     "FOO" => ["String"],
///     "BAR" => ["A", "B", "C"],
/// };
/// assert_eq!(v.get_first("BAR"), Some("A"));
/// ```
#[macro_export]
macro_rules! vars {
    () => {
        $crate::Vars::new()
    };
    ($($name:expr => [$($value:expr),* $(,)?]),+ $(,)?) => {{
        let mut vars = $crate::Vars::new();
        $(
            let values: ::std::vec::Vec<::std::string::String> =
                ::std::vec![$(::std::string::String::from($value)),*];
            vars.set($name, values);
        )+
        vars
    }};
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_value_list() {
        let v = vars! {
            "EMPTY" => [],
            "ONE" => ["1"],
        };
        assert!(v.get("EMPTY").is_some_and(<[String]>::is_empty));
        assert_eq!(v.get_first("ONE"), Some("1"));
        assert_eq!(v.names().collect::<Vec<_>>(), ["EMPTY", "ONE"]);
    }

    #[test]
    fn no_pairs() {
        let v = vars! {};
        assert!(v.is_empty());
    }
}
