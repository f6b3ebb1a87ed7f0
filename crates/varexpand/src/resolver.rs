use itertools::Itertools;
use tracing::{trace, warn};
use varexpand_syntax::tree::{NodeId, OptionId, PartKind, Tree};
use varexpand_syntax::Delimiters;

use crate::options::apply_chain;
use crate::source::VariableSource;

/// Expands templates against a [`VariableSource`].
///
/// A resolver owns the scratch arenas its parse trees are built in and reuses them from one call
/// to the next, which is why resolving takes `&mut self`. Threads that expand concurrently each
/// need their own resolver; the variables themselves can be shared.
#[derive(Debug, Default)]
pub struct Resolver {
    delimiters: Delimiters,
    tree: Tree,
}

impl Resolver {
    pub fn new(delimiters: Delimiters) -> Self {
        Resolver {
            delimiters,
            tree: Tree::new(),
        }
    }

    pub fn delimiters(&self) -> Delimiters {
        self.delimiters
    }

    /// Expand `text`, returning every result. There is always at least one.
    ///
    /// Text longer than [`Tree::MAX_TEXT_LEN`] is returned unexpanded.
    pub fn resolve<S: VariableSource + ?Sized>(&mut self, text: &str, vars: &S) -> Vec<String> {
        if text.len() > Tree::MAX_TEXT_LEN {
            warn!(len = text.len(), "template too long, returned unexpanded");
            return vec![text.to_string()];
        }

        let root = self.tree.parse(text, self.delimiters);
        Evaluator::new(&self.tree, text, vars).evaluate(root)
    }

    /// Expand `text` for callers that expect a single result.
    pub fn resolve_first<S: VariableSource + ?Sized>(&mut self, text: &str, vars: &S) -> String {
        self.resolve(text, vars)
            .into_iter()
            .next()
            .unwrap_or_default()
    }

    /// The variable names `text` looks up when expanded against `vars`, in lookup order.
    ///
    /// Names built from nested references are computed with those references expanded, so one
    /// reference can contribute several names. Text too long to parse references nothing.
    pub fn references<S: VariableSource + ?Sized>(&mut self, text: &str, vars: &S) -> Vec<String> {
        if text.len() > Tree::MAX_TEXT_LEN {
            return vec![];
        }

        let root = self.tree.parse(text, self.delimiters);
        let mut evaluator = Evaluator::new(&self.tree, text, vars);
        evaluator.lookups = Some(vec![vec![]; self.tree.node_count()]);
        evaluator.evaluate(root);
        evaluator
            .lookups
            .and_then(|lookups| lookups.into_iter().nth(root.index()))
            .unwrap_or_default()
    }
}

/// Evaluates a parsed tree bottom-up.
///
/// A nested node is always created after its parent, so walking the nodes from last to first
/// finishes every child before the parent that splices it in. Each node's expansions (and, when
/// collecting references, its lookups) wait in a slot indexed by [`NodeId`] until then.
struct Evaluator<'a, S: ?Sized> {
    tree: &'a Tree,
    text: &'a str,
    vars: &'a S,
    expansions: Vec<Vec<String>>,
    lookups: Option<Vec<Vec<String>>>,
}

impl<'a, S: VariableSource + ?Sized> Evaluator<'a, S> {
    fn new(tree: &'a Tree, text: &'a str, vars: &'a S) -> Self {
        Evaluator {
            tree,
            text,
            vars,
            expansions: vec![vec![]; tree.node_count()],
            lookups: None,
        }
    }

    fn evaluate(&mut self, root: NodeId) -> Vec<String> {
        let tree = self.tree;
        for node in tree.node_ids().rev() {
            let results = self.node(node);
            self.expansions[node.index()] = results;
        }
        std::mem::take(&mut self.expansions[root.index()])
    }

    fn node(&mut self, node: NodeId) -> Vec<String> {
        let tree = self.tree;
        let mut results = vec![String::new()];
        let mut names = vec![String::new()];

        for part in tree.parts(node) {
            match part {
                PartKind::Text(span) => {
                    let literal = tree.span_text(self.text, span);
                    results.iter_mut().for_each(|r| r.push_str(literal));
                }
                PartKind::BeginName(span) => {
                    names.clear();
                    names.push(tree.span_text(self.text, span).to_string());
                }
                PartKind::ContinueName(span) => {
                    let fragment = tree.span_text(self.text, span);
                    names.iter_mut().for_each(|n| n.push_str(fragment));
                }
                PartKind::Nested(child) => {
                    let expansions = std::mem::take(&mut self.expansions[child.index()]);
                    names = concat_product(&names, &expansions);
                    if let Some(lookups) = &mut self.lookups {
                        let nested = std::mem::take(&mut lookups[child.index()]);
                        lookups[node.index()].extend(nested);
                    }
                }
                PartKind::EndName(options) => {
                    results = self.substitute(node, results, &names, options);
                }
            }
        }

        results
    }

    /// Multiply `results` by the values of each name in turn. Unbound and empty variables are
    /// skipped, leaving `results` as they were.
    fn substitute(
        &mut self,
        node: NodeId,
        mut results: Vec<String>,
        names: &[String],
        options: Option<OptionId>,
    ) -> Vec<String> {
        let tree = self.tree;
        let chain = tree.option_chain(options);

        for name in names {
            if let Some(lookups) = &mut self.lookups {
                lookups[node.index()].push(name.clone());
            }

            let values = match self.vars.lookup(name) {
                Some(values) if !values.is_empty() => values.to_vec(),
                _ => {
                    trace!(name = %name, "unbound variable expands to nothing");
                    continue;
                }
            };

            let values = apply_chain(values, chain, self.text);
            if values.is_empty() {
                continue;
            }
            results = concat_product(&results, &values);
        }

        results
    }
}

/// Every `left + right` combination, ordered by `left` first.
fn concat_product(left: &[String], right: &[String]) -> Vec<String> {
    left.iter()
        .cartesian_product(right)
        .map(|(l, r)| format!("{l}{r}"))
        .collect()
}
