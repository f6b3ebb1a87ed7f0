use std::fs;

use pretty_assertions::assert_eq;
use varexpand::vars_file::VarsFile;
use varexpand::{Delimiters, Resolver, Vars, VarsError};

#[test]
fn load_and_expand() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vars.toml");
    fs::write(
        &path,
        r#"
[vars]
SDK = "/opt/sdk"
ARCHS = ["armv7", "arm64"]
LIBDIRS = ["$(SDK)/lib/$(ARCHS)"]
"#,
    )
    .unwrap();

    let mut v = Vars::new();
    VarsFile::load(&path)
        .unwrap()
        .apply_to(&mut v, Delimiters::default())
        .unwrap();
    v.resolve();

    assert_eq!(
        v.get("LIBDIRS").unwrap(),
        ["/opt/sdk/lib/armv7", "/opt/sdk/lib/arm64"]
    );
    assert_eq!(
        Resolver::default().resolve("$(LIBDIRS:p-L:j )", &v),
        ["-L/opt/sdk/lib/armv7 -L/opt/sdk/lib/arm64"]
    );
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = VarsFile::load(dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, VarsError::Io { .. }));
}

#[test]
fn malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[vars\nA = ").unwrap();

    let err = VarsFile::load(&path).unwrap_err();
    assert!(matches!(err, VarsError::VarsFile { .. }));
    assert!(err.to_string().contains("bad.toml"));
}
