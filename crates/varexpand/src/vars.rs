use std::sync::LazyLock;

use indexmap::IndexMap;
use petgraph::algo::{astar, kosaraju_scc};
use petgraph::graphmap::DiGraphMap;
use regex::Regex;
use tracing::debug;
use varexpand_syntax::Delimiters;
use varexpand_util::split::split_unescaped;

use crate::errors::VarsError;
use crate::resolver::Resolver;
use crate::source::VariableSource;

static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s:\\]+$").unwrap());

/// Ordered store of variables, each bound to a list of values.
///
/// Names are case-sensitive and keep their insertion order; replacing a variable's values does
/// not move it.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Vars {
    vars: IndexMap<String, Vec<String>>,
}

impl Vars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the values bound to `name`, creating the variable if needed.
    pub fn set<K, I, V>(&mut self, name: K, values: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.vars
            .insert(name.into(), values.into_iter().map(Into::into).collect());
    }

    /// Add values to the end of `name`'s list, creating the variable if needed.
    pub fn append<K, I, V>(&mut self, name: K, values: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.vars
            .entry(name.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.vars.get(name).map(Vec::as_slice)
    }

    pub fn get_first(&self, name: &str) -> Option<&str> {
        self.vars.get(name)?.first().map(String::as_str)
    }

    pub fn get_first_or_empty(&self, name: &str) -> &str {
        self.get_first(name).unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.vars.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Drop every variable bound to an empty list. Returns how many were removed.
    pub fn cull(&mut self) -> usize {
        let before = self.vars.len();
        self.vars.retain(|_, values| !values.is_empty());
        let removed = before - self.vars.len();
        debug!(removed, "culled empty variables");
        removed
    }

    /// Expand every variable's values against the store itself, with `$(...)` references.
    ///
    /// See [`Vars::resolve_with`].
    pub fn resolve(&mut self) {
        self.resolve_with(&mut Resolver::default());
    }

    /// Expand every variable's values against the store itself.
    ///
    /// This is a single pass in insertion order. Each variable sees the others as they are at
    /// that moment: already expanded if they come earlier, raw text if they come later. Values
    /// are not re-expanded, so a reference cycle cannot loop; it is left half-expanded. Use
    /// [`Vars::try_resolve_with`] to refuse cycles instead.
    pub fn resolve_with(&mut self, resolver: &mut Resolver) {
        for i in 0..self.vars.len() {
            let Some((name, values)) = self.vars.get_index(i) else {
                continue;
            };

            let resolved: Vec<String> = values
                .iter()
                .flat_map(|value| resolver.resolve(value, &*self))
                .collect();
            debug!(name = %name, values = ?resolved, "resolved variable");

            if let Some((_, values)) = self.vars.get_index_mut(i) {
                *values = resolved;
            }
        }
    }

    /// Like [`Vars::resolve_with`], but refuses to touch a store that contains a reference
    /// cycle.
    pub fn try_resolve_with(&mut self, resolver: &mut Resolver) -> Result<(), VarsError> {
        self.check_references(resolver)?;
        self.resolve_with(resolver);
        Ok(())
    }

    /// Report the first cycle among variables that reference each other.
    ///
    /// Cycles are ordered by their earliest variable. The chain starts and ends at that variable.
    pub fn check_references(&self, resolver: &mut Resolver) -> Result<(), VarsError> {
        let mut graph = DiGraphMap::<usize, ()>::new();
        for (index, (_, values)) in self.vars.iter().enumerate() {
            graph.add_node(index);
            for value in values {
                for referenced in resolver.references(value, self) {
                    if let Some(target) = self.vars.get_index_of(&referenced) {
                        graph.add_edge(index, target, ());
                    }
                }
            }
        }

        let Some(start) = kosaraju_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
            .filter_map(|scc| scc.into_iter().min())
            .min()
        else {
            return Ok(());
        };

        // Any successor inside the component has a path back to `start`
        let path = graph
            .neighbors(start)
            .find_map(|next| astar(&graph, next, |n| n == start, |_| 1u32, |_| 0))
            .map(|(_, path)| path)
            .unwrap_or_default();

        let chain: Vec<String> = std::iter::once(start)
            .chain(path)
            .filter_map(|index| self.vars.get_index(index))
            .map(|(name, _)| name.clone())
            .collect();
        debug!(?chain, "reference cycle");

        Err(VarsError::RecursiveReference {
            var: chain.first().cloned().unwrap_or_default(),
            chain,
        })
    }
}

impl VariableSource for Vars {
    fn lookup(&self, name: &str) -> Option<&[String]> {
        self.get(name)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, Vec<V>)> for Vars {
    fn from_iter<T: IntoIterator<Item = (K, Vec<V>)>>(iter: T) -> Self {
        let mut ret = Vars::new();
        ret.extend(iter);
        ret
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, Vec<V>)> for Vars {
    fn extend<T: IntoIterator<Item = (K, Vec<V>)>>(&mut self, iter: T) {
        for (name, values) in iter {
            self.set(name, values);
        }
    }
}

impl<'a> IntoIterator for &'a Vars {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = indexmap::map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.iter()
    }
}

/// Check that `name` can be referenced with `delimiters`: non-empty, no whitespace, no `:` or
/// `\`, and none of the delimiter characters.
pub fn validate_name(name: &str, delimiters: Delimiters) -> Result<(), VarsError> {
    let uses_delimiter = delimiters
        .leader()
        .into_iter()
        .chain([delimiters.open(), delimiters.close()])
        .any(|c| name.contains(c));

    if !NAME_REGEX.is_match(name) || uses_delimiter {
        return Err(VarsError::InvalidVariableName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Parse a command-line definition of the form `NAME=v1,v2`. A backslash escapes a comma (or
/// any other character) inside a value.
pub fn parse_define(
    define: &str,
    delimiters: Delimiters,
) -> Result<(String, Vec<String>), VarsError> {
    let Some((name, values)) = define.split_once('=') else {
        return Err(VarsError::InvalidDefine {
            define: define.to_string(),
        });
    };

    validate_name(name, delimiters)?;
    Ok((name.to_string(), split_unescaped(values, ',')))
}
