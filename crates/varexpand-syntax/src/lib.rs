//! Parsing for `varexpand` templates.
//!
//! A template is plain text with embedded variable references. With the default
//! [`Delimiters`] a reference looks like `$(NAME)`; references may carry an option chain
//! (`$(NAME:u:p-I)`) and may be nested inside another reference's name
//! (`$(CCOPTS_$(VARIANT:u))`).
//!
//! Parsing produces a [`tree::Tree`]: flat arenas of nodes, parts, text ranges and option specs
//! addressed by typed ids. Nothing in here looks at variable values; see the `varexpand` crate for
//! evaluation.
pub mod delimiters;
pub mod parser;
pub mod scanner;
pub mod tree;

pub use delimiters::Delimiters;
pub use tree::{NodeId, OptionId, OptionSpec, PartKind, Tree};
