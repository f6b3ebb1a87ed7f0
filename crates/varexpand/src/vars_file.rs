//! TOML variable files.
//!
//! ```toml
//! [vars]
//! CURRENT_VARIANT = "debug"
//! PLATFORMS = ["win32", "linux"]
//! ```
//!
//! A string binds one value and an array binds several. Variables are added in file order.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;
use varexpand_syntax::Delimiters;

use crate::errors::VarsError;
use crate::vars::{Vars, validate_name};

#[derive(Deserialize, Debug, Default)]
pub struct VarsFile {
    #[serde(default)]
    pub vars: IndexMap<String, VarValue>,
}

#[derive(Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(untagged)]
pub enum VarValue {
    One(String),
    Many(Vec<String>),
}

impl From<VarValue> for Vec<String> {
    fn from(value: VarValue) -> Self {
        match value {
            VarValue::One(v) => vec![v],
            VarValue::Many(v) => v,
        }
    }
}

impl VarsFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, VarsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let ret = Self::from_toml(&text).map_err(|source| VarsError::VarsFile {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), count = ret.vars.len(), "loaded variables file");
        Ok(ret)
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Add every variable to `vars`, replacing existing bindings.
    pub fn apply_to(self, vars: &mut Vars, delimiters: Delimiters) -> Result<(), VarsError> {
        for (name, value) in self.vars {
            validate_name(&name, delimiters)?;
            vars.set(name, Vec::<String>::from(value));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::errors::VarsError;
    use crate::vars::Vars;
    use crate::vars_file::VarsFile;
    use pretty_assertions::assert_eq;
    use varexpand_syntax::Delimiters;

    #[test]
    fn strings_and_arrays() {
        let file = VarsFile::from_toml(
            r#"
[vars]
CURRENT_VARIANT = "debug"
PLATFORMS = ["win32", "linux"]
NONE = []
"#,
        )
        .unwrap();

        let mut v = Vars::new();
        file.apply_to(&mut v, Delimiters::default()).unwrap();
        assert_eq!(
            v.names().collect::<Vec<_>>(),
            ["CURRENT_VARIANT", "PLATFORMS", "NONE"]
        );
        assert_eq!(v.get("PLATFORMS").unwrap(), ["win32", "linux"]);
        assert!(v.get("NONE").unwrap().is_empty());
    }

    #[test]
    fn missing_table() {
        let file = VarsFile::from_toml("").unwrap();
        assert!(file.vars.is_empty());
    }

    #[test]
    fn bad_name() {
        let file = VarsFile::from_toml(
            r#"
[vars]
"A:B" = "x"
"#,
        )
        .unwrap();
        let err = file
            .apply_to(&mut Vars::new(), Delimiters::default())
            .unwrap_err();
        assert!(matches!(err, VarsError::InvalidVariableName { name } if name == "A:B"));
    }

    #[test]
    fn wrong_type() {
        assert!(VarsFile::from_toml("[vars]\nA = 1\n").is_err());
    }
}
