//!
//! ## Introduction
//! `varexpand` expands variable references inside configuration strings: compiler flag
//! templates, toolchain command lines, output paths. It is a small templating language with
//! exactly one feature, substitution, but substitution done thoroughly.
//!
//! ## Multi-valued variables
//! Every variable holds a *list* of values. Substituting a variable with several values into a
//! template produces one result per value, and several such variables in one template produce
//! the cartesian product:
//!
//! ```text
//! FOO  = String
//! BAR  = A B C
//!
//! $(FOO)$(BAR)    =>  StringA StringB StringC
//! ```
//!
//! This is how a single command template fans out into "one compiler invocation per
//! architecture".
//!
//! ## Options
//! A reference can be followed by a chain of `:`-separated options, each a letter plus an optional
//! parameter, applied left to right to the whole value list (see [`options::VarOption`]):
//!
//! ```text
//! $(BAR:l:p-D:j )    =>  "-Da -Db -Dc"
//! ```
//!
//! Backslash escapes `:` and the close bracket inside a parameter.
//!
//! ## Nesting
//! A reference may appear inside another reference's name. The inner one is expanded first and
//! becomes part of the outer name:
//!
//! ```text
//! CURRENT_VARIANT = debug
//! CCOPTS_DEBUG    = -g -O0
//!
//! $(CCOPTS_$(CURRENT_VARIANT:u))    =>  -g -O0
//! ```
//!
//! ## Failure policy
//! Expansion has no error channel. A reference to an unknown (or empty) variable expands to
//! nothing, and an unterminated reference is dropped; literal text around it is kept.
pub mod errors;
pub mod macros;
pub mod options;
pub mod resolver;
pub mod source;
pub mod vars;
pub mod vars_file;

#[cfg(test)]
mod tests;

pub use errors::{VarsError, VarsResult};
pub use resolver::Resolver;
pub use source::VariableSource;
pub use vars::Vars;
pub use varexpand_syntax::Delimiters;
