use crate::resolver::Resolver;
use crate::vars;
use pretty_assertions::assert_eq;
use varexpand_syntax::Delimiters;

#[test]
fn nested_name() {
    let v = vars! {
        "CURRENT_VARIANT" => ["debug"],
        "CCOPTS_DEBUG" => ["-g -O0"],
    };

    let mut r = Resolver::default();
    assert_eq!(
        r.resolve("Test $(CCOPTS_$(CURRENT_VARIANT:u))", &v),
        ["Test -g -O0"]
    );

    let mut r = Resolver::new(Delimiters::braces());
    assert_eq!(
        r.resolve("Test {CCOPTS_{CURRENT_VARIANT:u}}", &v),
        ["Test -g -O0"]
    );
}

#[test]
fn nested_with_outer_options() {
    let v = vars! {
        "ARCH" => ["x64"],
        "LIBDIR_x64" => ["lib/x64"],
    };
    assert_eq!(
        Resolver::default().resolve("-L$(LIBDIR_$(ARCH):b)", &v),
        ["-Llib\\x64"]
    );
}

#[test]
fn nested_at_start_of_name() {
    let v = vars! {
        "TOOL" => ["CC"],
        "CC_PATH" => ["/usr/bin/gcc"],
    };
    assert_eq!(
        Resolver::default().resolve("$($(TOOL)_PATH:F)", &v),
        ["gcc"]
    );
}

#[test]
fn doubly_nested() {
    let v = vars! {
        "C" => ["c"],
        "Bc" => ["b"],
        "Ab" => ["found"],
    };
    assert_eq!(Resolver::default().resolve("$(A$(B$(C)))", &v), ["found"]);
}

#[test]
fn multi_valued_nested_selects_names() {
    let v = vars! {
        "VARIANTS" => ["debug", "release"],
        "CCOPTS_DEBUG" => ["-O0"],
        "CCOPTS_RELEASE" => ["-O2"],
    };

    // Every selected name multiplies into the result in turn
    assert_eq!(
        Resolver::default().resolve("[$(CCOPTS_$(VARIANTS:u))]", &v),
        ["[-O0-O2]"]
    );
}

#[test]
fn nested_unbound_selects_bare_name() {
    let v = vars! {
        "CCOPTS_" => ["bare"],
    };
    assert_eq!(
        Resolver::default().resolve("$(CCOPTS_$(MISSING))", &v),
        ["bare"]
    );
}

#[test]
fn deep_nesting() {
    const DEPTH: usize = 20_000;
    let text = format!("{}X{}", "$(".repeat(DEPTH), ")".repeat(DEPTH));
    let v = vars! { "X" => ["X"] };

    let mut r = Resolver::default();
    assert_eq!(r.resolve(&text, &v), ["X"]);
    assert_eq!(r.references(&text, &v).len(), DEPTH);

    // Unterminated all the way down
    assert_eq!(r.resolve(&"$(".repeat(DEPTH), &v), [""]);
}
