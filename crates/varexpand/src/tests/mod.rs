mod nested;

#[cfg(test)]
mod test {
    use crate::resolver::Resolver;
    use crate::vars;
    use crate::vars::Vars;
    use pretty_assertions::assert_eq;

    fn sample() -> Vars {
        vars! {
            "FOO" => ["String"],
            "BAR" => ["A", "B", "C"],
        }
    }

    fn resolve(text: &str) -> Vec<String> {
        Resolver::default().resolve(text, &sample())
    }

    #[test]
    fn single_value() {
        assert_eq!(resolve("$(FOO)"), ["String"]);
        assert_eq!(resolve("$(FOO:u)"), ["STRING"]);
        assert_eq!(resolve("$(FOO:l)"), ["string"]);
    }

    #[test]
    fn prefix_and_suffix() {
        assert_eq!(resolve("$(FOO:p__)"), ["__String"]);
        assert_eq!(resolve("$(FOO:p__:s__)"), ["__String__"]);
    }

    #[test]
    fn multi_value() {
        assert_eq!(resolve("$(BAR)"), ["A", "B", "C"]);
        assert_eq!(resolve("$(BAR:l)"), ["a", "b", "c"]);
        assert_eq!(resolve("$(BAR:p__)"), ["__A", "__B", "__C"]);
    }

    #[test]
    fn join_collapses_cardinality() {
        assert_eq!(resolve("$(BAR:p__:s__:j!)"), ["__A__!__B__!__C__"]);
        assert_eq!(resolve("-DPLATFORMS=\"$(BAR:j,)\""), ["-DPLATFORMS=\"A,B,C\""]);
    }

    #[test]
    fn escaped_colon_in_param() {
        assert_eq!(resolve(r"$(BAR:p\::s!)"), [":A!", ":B!", ":C!"]);
    }

    #[test]
    fn escaped_close_in_param() {
        assert_eq!(resolve(r"$(FOO:p\(:s\))"), ["(String)"]);
    }

    #[test]
    fn cartesian() {
        assert_eq!(resolve("$(FOO)$(BAR)"), ["StringA", "StringB", "StringC"]);
        assert_eq!(
            resolve("$(BAR)-$(BAR:l)"),
            ["A-a", "A-b", "A-c", "B-a", "B-b", "B-c", "C-a", "C-b", "C-c"]
        );
    }

    #[test]
    fn index() {
        assert_eq!(resolve("$(BAR:i1)"), ["B"]);
        assert_eq!(resolve("<$(BAR:i7)>"), ["<>"]);
        assert_eq!(resolve("<$(BAR:inope)>"), ["<>"]);
    }

    #[test]
    fn no_references_is_identity() {
        let text = "gcc -c -o out.o in.c (with $ and ( and ) chars)";
        assert_eq!(resolve(text), [text]);
        assert_eq!(Resolver::default().resolve(text, &Vars::new()), [text]);
        assert_eq!(resolve(""), [""]);
    }

    #[test]
    fn options_do_not_mutate_store() {
        let v = sample();
        let before = v.clone();
        let mut r = Resolver::default();

        assert_eq!(r.resolve("$(BAR:l:p-:j+)", &v), ["-a+-b+-c"]);
        assert_eq!(r.resolve("$(FOO:u:i0)", &v), ["STRING"]);
        assert_eq!(v.get("BAR").unwrap(), ["A", "B", "C"]);
        assert_eq!(v.get("FOO").unwrap(), ["String"]);
        assert_eq!(v, before);
    }

    #[test]
    fn resolver_is_reusable() {
        let v = sample();
        let mut r = Resolver::default();
        assert_eq!(r.resolve("$(A$(B$(C)))", &v), [""]);
        assert_eq!(r.resolve("$(FOO)", &v), ["String"]);
        assert_eq!(r.resolve("x", &v), ["x"]);
    }
}
