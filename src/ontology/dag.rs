// The GO term graph.
//
// GoDag indexes parsed terms and answers identity questions (alt ids,
// obsolete terms). AncestorIndex precomputes the reflexive-transitive
// ancestor closure once, because counting annotations and scoring term pairs
// both ask for ancestors many thousands of times.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::term::{GoId, GoTerm, Namespace};

/// Which edges to follow when walking towards the roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relations {
    /// Only `is_a` edges (the go-basic default).
    #[default]
    IsA,
    /// `is_a` plus `relationship: part_of` edges.
    IsAPartOf,
}

impl Relations {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relations::IsA => "is_a",
            Relations::IsAPartOf => "is_a+part_of",
        }
    }
}

/// Outcome of looking up a GO id against the ontology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The id is a current, primary term.
    Current(GoId),
    /// The id is an `alt_id` of another term.
    Alternate { from: GoId, to: GoId },
    /// The id is obsolete and has a `replaced_by` target.
    Replaced { from: GoId, to: GoId },
    /// The id is obsolete with no replacement.
    Obsolete(GoId),
    /// The id is not in the ontology.
    Unknown(GoId),
}

impl Resolution {
    /// The usable primary term, if any.
    pub fn term(&self) -> Option<GoId> {
        match *self {
            Resolution::Current(id) => Some(id),
            Resolution::Alternate { to, .. } | Resolution::Replaced { to, .. } => Some(to),
            Resolution::Obsolete(_) | Resolution::Unknown(_) => None,
        }
    }
}

/// All ontology terms keyed by primary id.
#[derive(Debug, Default)]
pub struct GoDag {
    terms: HashMap<GoId, GoTerm>,
    alt_ids: HashMap<GoId, GoId>,
    /// Direct `is_a` children, ascending.
    children: HashMap<GoId, Vec<GoId>>,
}

impl GoDag {
    pub fn from_terms(terms: Vec<GoTerm>) -> Self {
        let mut dag = GoDag::default();

        for mut term in terms {
            if term.is_obsolete && (!term.is_a.is_empty() || !term.part_of.is_empty()) {
                warn!(term = %term.id, "Obsolete term carries edges, dropping them");
                term.is_a.clear();
                term.part_of.clear();
            }
            for alt in &term.alt_ids {
                dag.alt_ids.insert(*alt, term.id);
            }
            for parent in &term.is_a {
                dag.children.entry(*parent).or_default().push(term.id);
            }
            dag.terms.insert(term.id, term);
        }
        for children in dag.children.values_mut() {
            children.sort_unstable();
        }

        debug!(
            terms = dag.terms.len(),
            alt_ids = dag.alt_ids.len(),
            "Built GO DAG"
        );
        dag
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// All terms, obsolete ones included, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &GoTerm> {
        self.terms.values()
    }

    /// Direct lookup by primary id. Does not follow alt ids.
    pub fn get(&self, id: GoId) -> Option<&GoTerm> {
        self.terms.get(&id)
    }

    /// Terms with a direct `is_a` edge to `id`.
    pub fn children(&self, id: GoId) -> &[GoId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn namespace(&self, id: GoId) -> Option<Namespace> {
        self.terms.get(&id).map(|t| t.namespace)
    }

    /// Map an id to the term that should be used in its place.
    pub fn resolve(&self, id: GoId) -> Resolution {
        if let Some(term) = self.terms.get(&id) {
            if !term.is_obsolete {
                return Resolution::Current(id);
            }
            return match term.replaced_by.iter().find(|r| self.is_current(**r)) {
                Some(to) => Resolution::Replaced { from: id, to: *to },
                None => Resolution::Obsolete(id),
            };
        }
        let Some(primary) = self.alt_ids.get(&id) else {
            return Resolution::Unknown(id);
        };
        match self.resolve(*primary) {
            Resolution::Current(to) => Resolution::Alternate { from: id, to },
            Resolution::Replaced { to, .. } => Resolution::Replaced { from: id, to },
            _ => Resolution::Obsolete(id),
        }
    }

    fn is_current(&self, id: GoId) -> bool {
        self.terms.get(&id).is_some_and(|t| !t.is_obsolete)
    }

    /// Reflexive-transitive closure of `id` towards the roots.
    ///
    /// Parents that are missing from the ontology are skipped. Returns an
    /// empty set for unknown ids.
    pub fn ancestors(&self, id: GoId, relations: Relations) -> HashSet<GoId> {
        let mut seen = HashSet::new();
        if !self.terms.contains_key(&id) {
            return seen;
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            if let Some(term) = self.terms.get(&current) {
                stack.extend(parents(term, relations).filter(|p| !seen.contains(p)));
            }
        }
        seen
    }

    pub fn common_ancestors(&self, a: GoId, b: GoId, relations: Relations) -> HashSet<GoId> {
        let left = self.ancestors(a, relations);
        let right = self.ancestors(b, relations);
        left.intersection(&right).copied().collect()
    }

    /// Length of the longest `is_a` path from `id` up to its namespace root.
    ///
    /// An `is_a` edge that closes a cycle is ignored.
    pub fn depth(&self, id: GoId) -> Option<usize> {
        let mut memo = HashMap::new();
        let mut visiting = HashSet::new();
        self.depth_memo(id, &mut memo, &mut visiting)
    }

    fn depth_memo(
        &self,
        id: GoId,
        memo: &mut HashMap<GoId, usize>,
        visiting: &mut HashSet<GoId>,
    ) -> Option<usize> {
        if let Some(depth) = memo.get(&id) {
            return Some(*depth);
        }
        let term = self.terms.get(&id)?;
        visiting.insert(id);

        let mut deepest: Option<usize> = None;
        for parent in &term.is_a {
            if visiting.contains(parent) {
                warn!(term = %id, parent = %parent, "is_a cycle in ontology, skipping edge");
                continue;
            }
            if let Some(d) = self.depth_memo(*parent, memo, visiting) {
                deepest = Some(deepest.map_or(d, |best| best.max(d)));
            }
        }

        visiting.remove(&id);
        let depth = deepest.map_or(0, |d| d + 1);
        memo.insert(id, depth);
        Some(depth)
    }

    /// Number of current (non-obsolete) terms per namespace.
    pub fn namespace_counts(&self) -> BTreeMap<Namespace, usize> {
        let mut counts = BTreeMap::new();
        for term in self.terms.values().filter(|t| !t.is_obsolete) {
            *counts.entry(term.namespace).or_insert(0) += 1;
        }
        counts
    }

    /// Precompute ancestor closures for every current term.
    pub fn ancestor_index(&self, relations: Relations) -> AncestorIndex {
        let closure = self
            .terms
            .values()
            .filter(|t| !t.is_obsolete)
            .map(|t| {
                let mut ancestors: Vec<GoId> =
                    self.ancestors(t.id, relations).into_iter().collect();
                ancestors.sort_unstable();
                (t.id, ancestors)
            })
            .collect::<HashMap<_, _>>();

        debug!(
            terms = closure.len(),
            relations = relations.as_str(),
            "Indexed ancestors"
        );
        AncestorIndex { relations, closure }
    }
}

fn parents(term: &GoTerm, relations: Relations) -> impl Iterator<Item = GoId> + '_ {
    let part_of: &[GoId] = match relations {
        Relations::IsA => &[],
        Relations::IsAPartOf => &term.part_of,
    };
    term.is_a.iter().chain(part_of).copied()
}

/// Sorted ancestor lists for every current term.
#[derive(Debug)]
pub struct AncestorIndex {
    relations: Relations,
    closure: HashMap<GoId, Vec<GoId>>,
}

impl AncestorIndex {
    pub fn relations(&self) -> Relations {
        self.relations
    }

    /// Ancestors of `id` including `id` itself, in ascending id order.
    pub fn ancestors(&self, id: GoId) -> Option<&[GoId]> {
        self.closure.get(&id).map(Vec::as_slice)
    }

    pub fn contains(&self, id: GoId) -> bool {
        self.closure.contains_key(&id)
    }

    /// Common ancestors of two terms in ascending id order.
    ///
    /// Both lists are sorted so this is a linear merge.
    pub fn common_ancestors(&self, a: GoId, b: GoId) -> Vec<GoId> {
        let (Some(left), Some(right)) = (self.ancestors(a), self.ancestors(b)) else {
            return Vec::new();
        };

        let mut common = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < left.len() && j < right.len() {
            match left[i].cmp(&right[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    common.push(left[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        common
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> GoId {
        s.parse().unwrap()
    }

    fn term(s: &str, is_a: &[&str]) -> GoTerm {
        let mut t = GoTerm::new(id(s), s, Namespace::BiologicalProcess);
        t.is_a = is_a.iter().map(|p| id(p)).collect();
        t
    }

    // root <- a <- c, root <- b <- c (diamond), d part_of c
    fn diamond() -> GoDag {
        let mut d = term("GO:0000004", &["GO:0008150"]);
        d.part_of = vec![id("GO:0000003")];
        GoDag::from_terms(vec![
            term("GO:0008150", &[]),
            term("GO:0000001", &["GO:0008150"]),
            term("GO:0000002", &["GO:0008150"]),
            term("GO:0000003", &["GO:0000001", "GO:0000002"]),
            d,
        ])
    }

    #[test]
    fn test_ancestors_are_reflexive_and_transitive() {
        let dag = diamond();
        let anc = dag.ancestors(id("GO:0000003"), Relations::IsA);
        assert_eq!(anc.len(), 4);
        assert!(anc.contains(&id("GO:0000003")));
        assert!(anc.contains(&id("GO:0008150")));
    }

    #[test]
    fn test_part_of_edges_only_when_requested() {
        let dag = diamond();
        let d = id("GO:0000004");
        assert_eq!(dag.ancestors(d, Relations::IsA).len(), 2);
        assert_eq!(dag.ancestors(d, Relations::IsAPartOf).len(), 5);
    }

    #[test]
    fn test_children_follow_is_a_only() {
        let dag = diamond();
        assert_eq!(
            dag.children(id("GO:0008150")),
            &[id("GO:0000001"), id("GO:0000002"), id("GO:0000004")]
        );
        assert_eq!(dag.children(id("GO:0000001")), &[id("GO:0000003")]);
        assert!(dag.children(id("GO:0000003")).is_empty());
    }

    #[test]
    fn test_depth_takes_longest_path() {
        let dag = diamond();
        assert_eq!(dag.depth(id("GO:0008150")), Some(0));
        assert_eq!(dag.depth(id("GO:0000003")), Some(2));
        assert_eq!(dag.depth(id("GO:0009999")), None);
    }

    #[test]
    fn test_depth_survives_is_a_cycle() {
        let dag = GoDag::from_terms(vec![
            term("GO:0000001", &["GO:0000002"]),
            term("GO:0000002", &["GO:0000001"]),
        ]);
        assert_eq!(dag.depth(id("GO:0000001")), Some(1));
        assert_eq!(dag.depth(id("GO:0000002")), Some(1));
        // ancestors already tracks visited nodes
        assert_eq!(dag.ancestors(id("GO:0000001"), Relations::IsA).len(), 2);
    }

    #[test]
    fn test_index_merge_matches_set_intersection() {
        let dag = diamond();
        let index = dag.ancestor_index(Relations::IsA);
        let a = id("GO:0000001");
        let b = id("GO:0000003");
        let mut expected: Vec<GoId> = dag
            .common_ancestors(a, b, Relations::IsA)
            .into_iter()
            .collect();
        expected.sort();
        assert_eq!(index.common_ancestors(a, b), expected);
    }

    #[test]
    fn test_unknown_id_has_no_ancestors() {
        let dag = diamond();
        assert!(dag.ancestors(id("GO:0009999"), Relations::IsA).is_empty());
        let index = dag.ancestor_index(Relations::IsA);
        assert!(index.common_ancestors(id("GO:0009999"), id("GO:0008150")).is_empty());
    }
}
