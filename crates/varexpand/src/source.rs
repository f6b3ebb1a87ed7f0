use std::collections::HashMap;
use std::hash::BuildHasher;

use indexmap::IndexMap;

/// Anything a [`Resolver`](crate::Resolver) can read variable values from.
pub trait VariableSource {
    /// All values bound to `name`, or `None` if it is unbound.
    fn lookup(&self, name: &str) -> Option<&[String]>;
}

impl<T: VariableSource + ?Sized> VariableSource for &T {
    fn lookup(&self, name: &str) -> Option<&[String]> {
        (**self).lookup(name)
    }
}

impl<S: BuildHasher> VariableSource for HashMap<String, Vec<String>, S> {
    fn lookup(&self, name: &str) -> Option<&[String]> {
        self.get(name).map(Vec::as_slice)
    }
}

impl<S: BuildHasher> VariableSource for IndexMap<String, Vec<String>, S> {
    fn lookup(&self, name: &str) -> Option<&[String]> {
        self.get(name).map(Vec::as_slice)
    }
}
