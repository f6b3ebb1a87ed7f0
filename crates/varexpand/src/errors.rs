use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VarsError {
    #[error("variable {var} references itself: {}", .chain.join(" -> "))]
    RecursiveReference { var: String, chain: Vec<String> },

    #[error("invalid variable name {name:?}")]
    InvalidVariableName { name: String },

    #[error("expected NAME=VALUES, got {define:?}")]
    InvalidDefine { define: String },

    #[error("unable to parse variables file {}", .path.display())]
    VarsFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("I/O error")]
    Io {
        #[from]
        source: io::Error,
    },
}

pub type VarsResult<T> = anyhow::Result<T>;
