use std::collections::{HashMap, VecDeque};

use crate::error::{PedigreeError, Result};
use crate::types::Sex;

use super::individual::Individual;

/// A family tree annotated with a binary trait.
///
/// Individuals are stored in insertion order and addressed by their 0-based
/// index. Parent and child links are indices into the same vector, so the
/// pedigree is the sole owner of every individual and traversal never needs
/// shared references between nodes.
///
/// The parent graph is expected to be acyclic. Walks over it
/// ([`Pedigree::ancestors`], [`Pedigree::generations`]) report a cycle as
/// [`PedigreeError::Cycle`] instead of looping.
#[derive(Debug, Clone)]
pub struct Pedigree {
    /// Individuals in insertion order.
    individuals: Vec<Individual>,
    /// Mapping from individual ID string to its 0-based index.
    id_to_index: HashMap<String, usize>,
}

impl Pedigree {
    /// Create an empty pedigree.
    pub fn new() -> Self {
        Self {
            individuals: Vec::new(),
            id_to_index: HashMap::new(),
        }
    }

    /// Number of individuals in the pedigree.
    pub fn n_individuals(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Look up the 0-based index of an individual by its ID string.
    pub fn individual_index(&self, id: &str) -> Option<usize> {
        self.id_to_index.get(id).copied()
    }

    /// The individual at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn individual(&self, index: usize) -> &Individual {
        &self.individuals[index]
    }

    /// The individual with the given ID, if present.
    pub fn get(&self, id: &str) -> Option<&Individual> {
        self.individual_index(id).map(|i| &self.individuals[i])
    }

    /// All individuals in insertion order.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Add an individual with no recorded relatives and return its index.
    ///
    /// # Errors
    /// Returns an error if the ID already exists.
    pub fn add_individual(&mut self, id: &str, sex: Sex, affected: bool) -> Result<usize> {
        if self.id_to_index.contains_key(id) {
            return Err(PedigreeError::DuplicateIndividual(id.to_string()));
        }

        let index = self.individuals.len();
        self.individuals.push(Individual::new(id, sex, affected));
        self.id_to_index.insert(id.to_string(), index);
        Ok(index)
    }

    /// Record `parent` as the mother (`role == Female`) or father
    /// (`role == Male`) of `child`, and append `child` to the parent's
    /// children.
    ///
    /// Repeating the call appends the child again; setting a role that is
    /// already filled replaces the link without touching the previous
    /// parent's children.
    ///
    /// # Errors
    /// Returns an error if either index is out of range or if `child` and
    /// `parent` are the same individual.
    pub fn add_parent_child_relationship(
        &mut self,
        child: usize,
        parent: usize,
        role: Sex,
    ) -> Result<()> {
        self.check_index(child)?;
        self.check_index(parent)?;
        if child == parent {
            return Err(PedigreeError::SelfParent(
                self.individuals[child].id().to_string(),
            ));
        }

        if self.individuals[parent].sex() != role {
            log::warn!(
                "Individual '{}' (sex {}) recorded as {} of '{}'",
                self.individuals[parent].id(),
                self.individuals[parent].sex(),
                if role == Sex::Female { "mother" } else { "father" },
                self.individuals[child].id()
            );
        }

        self.individuals[child].set_parent(parent, role);
        self.individuals[parent].push_child(child);
        Ok(())
    }

    /// Link two individuals by ID, using the parent's own sex as the role.
    ///
    /// # Errors
    /// Returns an error if either ID is unknown or both IDs are the same.
    pub fn link(&mut self, child_id: &str, parent_id: &str) -> Result<()> {
        let child = self.require(child_id)?;
        let parent = self.require(parent_id)?;
        let role = self.individuals[parent].sex();
        self.add_parent_child_relationship(child, parent, role)
    }

    /// Affected individuals, in pedigree order.
    pub fn find_affected(&self) -> Vec<&Individual> {
        self.individuals.iter().filter(|i| i.is_affected()).collect()
    }

    /// Unaffected individuals, in pedigree order.
    pub fn find_unaffected(&self) -> Vec<&Individual> {
        self.individuals.iter().filter(|i| !i.is_affected()).collect()
    }

    /// All ancestors of the individual at `index`, depth-first with the
    /// mother's line fully expanded before the father's.
    ///
    /// An ancestor reachable through several paths (consanguinity) appears
    /// once per path.
    ///
    /// # Errors
    /// Returns [`PedigreeError::Cycle`] if an individual is its own ancestor.
    pub fn ancestors(&self, index: usize) -> Result<Vec<usize>> {
        self.check_index(index)?;

        let mut ancestors = Vec::new();
        // (node, depth) pairs; `path` holds the chain from `index` down to
        // the node being expanded.
        let mut stack = vec![(index, 0usize)];
        let mut path: Vec<usize> = Vec::new();

        while let Some((node, depth)) = stack.pop() {
            path.truncate(depth);
            if path.contains(&node) {
                return Err(PedigreeError::Cycle(
                    self.individuals[node].id().to_string(),
                ));
            }
            if depth > 0 {
                ancestors.push(node);
            }
            path.push(node);

            let ind = &self.individuals[node];
            // Father pushed first so the mother's branch is popped first.
            if let Some(f) = ind.father() {
                stack.push((f, depth + 1));
            }
            if let Some(m) = ind.mother() {
                stack.push((m, depth + 1));
            }
        }

        Ok(ancestors)
    }

    /// Indices ordered so that every parent precedes its children.
    ///
    /// Uses Kahn's algorithm; founders keep their relative insertion order.
    ///
    /// # Errors
    /// Returns [`PedigreeError::Cycle`] if the parent graph has a cycle.
    pub fn topological_order(&self) -> Result<Vec<usize>> {
        let n = self.individuals.len();

        // Build in-degree counts based on parent -> offspring edges.
        let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut in_degree = vec![0u32; n];

        for (i, ind) in self.individuals.iter().enumerate() {
            for p in ind.mother().into_iter().chain(ind.father()) {
                children_of[p].push(i);
                in_degree[i] += 1;
            }
        }

        let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut order: Vec<usize> = Vec::with_capacity(n);

        while let Some(node) = queue.pop_front() {
            order.push(node);
            for &child in &children_of[node] {
                in_degree[child] -= 1;
                if in_degree[child] == 0 {
                    queue.push_back(child);
                }
            }
        }

        if order.len() != n {
            let stuck = (0..n)
                .find(|&i| in_degree[i] > 0)
                .map(|i| self.individuals[i].id().to_string())
                .unwrap_or_default();
            return Err(PedigreeError::Cycle(stuck));
        }

        Ok(order)
    }

    /// Generation number of every individual, indexed like the pedigree.
    ///
    /// Founders are generation 0. Anyone else is one more than the larger of
    /// the parents' generations, where an unrecorded parent counts as 0.
    /// A half-recorded lineage can therefore sit lower than its true depth.
    ///
    /// # Errors
    /// Returns [`PedigreeError::Cycle`] if the parent graph has a cycle.
    pub fn generations(&self) -> Result<Vec<usize>> {
        let mut generations = vec![0usize; self.individuals.len()];

        for i in self.topological_order()? {
            let ind = &self.individuals[i];
            if ind.is_founder() {
                continue;
            }
            let mother_gen = ind.mother().map_or(0, |m| generations[m]);
            let father_gen = ind.father().map_or(0, |f| generations[f]);
            generations[i] = mother_gen.max(father_gen) + 1;
        }

        Ok(generations)
    }

    /// Generation number of the individual at `index`.
    ///
    /// # Errors
    /// See [`Pedigree::generations`].
    pub fn generation(&self, index: usize) -> Result<usize> {
        self.check_index(index)?;
        Ok(self.generations()?[index])
    }

    /// Validate the pedigree for structural consistency.
    ///
    /// Checks:
    /// - No individual is linked as its own parent.
    /// - Every recorded parent lists the individual among its children.
    /// - No individual is its own ancestor (cycle detection).
    ///
    /// # Errors
    /// Returns an error describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        for (i, ind) in self.individuals.iter().enumerate() {
            for (parent, role) in [(ind.mother(), "mother"), (ind.father(), "father")] {
                let Some(p) = parent else { continue };
                if p == i {
                    return Err(PedigreeError::SelfParent(ind.id().to_string()));
                }
                if !self.individuals[p].children().contains(&i) {
                    return Err(PedigreeError::Pedigree(format!(
                        "Individual '{}' names '{}' as {} but is missing from their children",
                        ind.id(),
                        self.individuals[p].id(),
                        role
                    )));
                }
            }
        }

        self.topological_order().map(|_| ())
    }

    pub(crate) fn require(&self, id: &str) -> Result<usize> {
        self.individual_index(id)
            .ok_or_else(|| PedigreeError::UnknownIndividual(id.to_string()))
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<()> {
        if index < self.individuals.len() {
            Ok(())
        } else {
            Err(PedigreeError::IndexOutOfRange {
                index,
                len: self.individuals.len(),
            })
        }
    }

    /// Link `child` to `parent` without any checks. Used by tests that need
    /// to build malformed graphs.
    #[cfg(test)]
    pub(crate) fn force_parent(&mut self, child: usize, parent: usize, role: Sex) {
        self.individuals[child].set_parent(parent, role);
        self.individuals[parent].push_child(child);
    }
}

impl Default for Pedigree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two founders and their two children.
    fn nuclear_family() -> Pedigree {
        let mut ped = Pedigree::new();
        let dad = ped.add_individual("1", Sex::Male, false).unwrap();
        let mum = ped.add_individual("2", Sex::Female, false).unwrap();
        let son = ped.add_individual("3", Sex::Male, true).unwrap();
        let daughter = ped.add_individual("4", Sex::Female, false).unwrap();
        for child in [son, daughter] {
            ped.add_parent_child_relationship(child, mum, Sex::Female).unwrap();
            ped.add_parent_child_relationship(child, dad, Sex::Male).unwrap();
        }
        ped
    }

    #[test]
    fn test_relationship_is_symmetric() {
        let ped = nuclear_family();
        assert_eq!(ped.individual(2).mother(), Some(1));
        assert_eq!(ped.individual(2).father(), Some(0));
        assert_eq!(ped.individual(1).children(), &[2, 3]);
        assert_eq!(ped.individual(0).children(), &[2, 3]);
        assert!(ped.validate().is_ok());
    }

    #[test]
    fn test_repeated_relationship_appends_child_again() {
        let mut ped = Pedigree::new();
        let mum = ped.add_individual("M", Sex::Female, false).unwrap();
        let kid = ped.add_individual("K", Sex::Male, false).unwrap();
        ped.add_parent_child_relationship(kid, mum, Sex::Female).unwrap();
        ped.add_parent_child_relationship(kid, mum, Sex::Female).unwrap();
        assert_eq!(ped.individual(mum).children(), &[kid, kid]);
    }

    #[test]
    fn test_role_decides_link_not_parent_sex() {
        let mut ped = Pedigree::new();
        let p = ped.add_individual("P", Sex::Male, false).unwrap();
        let c = ped.add_individual("C", Sex::Female, false).unwrap();
        ped.add_parent_child_relationship(c, p, Sex::Female).unwrap();
        assert_eq!(ped.individual(c).mother(), Some(p));
        assert_eq!(ped.individual(c).father(), None);
    }

    #[test]
    fn test_self_parent_rejected() {
        let mut ped = Pedigree::new();
        let a = ped.add_individual("A", Sex::Male, false).unwrap();
        let result = ped.add_parent_child_relationship(a, a, Sex::Male);
        assert!(matches!(result, Err(PedigreeError::SelfParent(_))));
        assert!(ped.individual(a).children().is_empty());
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        let mut ped = Pedigree::new();
        ped.add_individual("A", Sex::Male, false).unwrap();
        let result = ped.add_parent_child_relationship(0, 5, Sex::Male);
        assert!(matches!(
            result,
            Err(PedigreeError::IndexOutOfRange { index: 5, len: 1 })
        ));
    }

    #[test]
    fn test_duplicate_individual_id() {
        let mut ped = Pedigree::new();
        ped.add_individual("A", Sex::Male, false).unwrap();
        let result = ped.add_individual("A", Sex::Female, true);
        assert!(result.is_err());
        let msg = format!("{}", result.unwrap_err());
        assert!(msg.contains("Duplicate"), "Error was: {}", msg);
    }

    #[test]
    fn test_link_by_id_uses_parent_sex() {
        let mut ped = Pedigree::new();
        ped.add_individual("S1", Sex::Male, false).unwrap();
        ped.add_individual("D1", Sex::Female, false).unwrap();
        ped.add_individual("O1", Sex::Female, true).unwrap();
        ped.link("O1", "S1").unwrap();
        ped.link("O1", "D1").unwrap();

        let o1 = ped.get("O1").unwrap();
        assert_eq!(o1.parents(), Some((1, 0)));
        assert!(matches!(
            ped.link("O1", "nobody"),
            Err(PedigreeError::UnknownIndividual(_))
        ));
    }

    #[test]
    fn test_find_affected_and_unaffected_preserve_order() {
        let ped = nuclear_family();
        let affected: Vec<&str> = ped.find_affected().iter().map(|i| i.id()).collect();
        let unaffected: Vec<&str> = ped.find_unaffected().iter().map(|i| i.id()).collect();
        assert_eq!(affected, vec!["3"]);
        assert_eq!(unaffected, vec!["1", "2", "4"]);
        // Unchanged pedigree, unchanged answer.
        assert_eq!(ped.find_affected(), ped.find_affected());
    }

    #[test]
    fn test_ancestors_mother_line_first_with_duplicates() {
        // First cousins marry; their child reaches the shared grandparents twice.
        let mut ped = Pedigree::new();
        let gf = ped.add_individual("GF", Sex::Male, false).unwrap();
        let gm = ped.add_individual("GM", Sex::Female, false).unwrap();
        let a = ped.add_individual("A", Sex::Female, false).unwrap();
        let b = ped.add_individual("B", Sex::Male, false).unwrap();
        let c = ped.add_individual("C", Sex::Female, false).unwrap();
        let d = ped.add_individual("D", Sex::Male, false).unwrap();
        let x = ped.add_individual("X", Sex::Male, true).unwrap();
        for child in [a, b] {
            ped.add_parent_child_relationship(child, gm, Sex::Female).unwrap();
            ped.add_parent_child_relationship(child, gf, Sex::Male).unwrap();
        }
        ped.add_parent_child_relationship(c, a, Sex::Female).unwrap();
        ped.add_parent_child_relationship(d, b, Sex::Male).unwrap();
        ped.add_parent_child_relationship(x, c, Sex::Female).unwrap();
        ped.add_parent_child_relationship(x, d, Sex::Male).unwrap();

        let ids: Vec<&str> = ped
            .ancestors(x)
            .unwrap()
            .into_iter()
            .map(|i| ped.individual(i).id())
            .collect();
        assert_eq!(ids, vec!["C", "A", "GM", "GF", "D", "B", "GM", "GF"]);
        assert!(ped.ancestors(gf).unwrap().is_empty());
    }

    #[test]
    fn test_generations() {
        let mut ped = nuclear_family();
        let g = ped.add_individual("5", Sex::Female, true).unwrap();
        ped.add_parent_child_relationship(g, 3, Sex::Female).unwrap();

        assert_eq!(ped.generations().unwrap(), vec![0, 0, 1, 1, 2]);
        assert_eq!(ped.generation(g).unwrap(), 2);
    }

    #[test]
    fn test_missing_parent_counts_as_generation_zero() {
        // C's mother is two generations deep, father unrecorded.
        let mut ped = Pedigree::new();
        let a = ped.add_individual("A", Sex::Female, false).unwrap();
        let b = ped.add_individual("B", Sex::Female, false).unwrap();
        let c = ped.add_individual("C", Sex::Male, false).unwrap();
        ped.add_parent_child_relationship(b, a, Sex::Female).unwrap();
        ped.add_parent_child_relationship(c, b, Sex::Female).unwrap();
        assert_eq!(ped.generation(c).unwrap(), 2);
    }

    #[test]
    fn test_topological_order_parents_first() {
        // Offspring inserted before parents.
        let mut ped = Pedigree::new();
        let kid = ped.add_individual("3", Sex::Male, false).unwrap();
        let dad = ped.add_individual("1", Sex::Male, false).unwrap();
        let mum = ped.add_individual("2", Sex::Female, false).unwrap();
        ped.add_parent_child_relationship(kid, dad, Sex::Male).unwrap();
        ped.add_parent_child_relationship(kid, mum, Sex::Female).unwrap();

        let order = ped.topological_order().unwrap();
        let pos = |i: usize| order.iter().position(|&x| x == i).unwrap();
        assert!(pos(dad) < pos(kid));
        assert!(pos(mum) < pos(kid));
        assert_eq!(ped.generations().unwrap(), vec![1, 0, 0]);
    }

    #[test]
    fn test_cycle_detected_by_walks() {
        let mut ped = Pedigree::new();
        let a = ped.add_individual("A", Sex::Female, false).unwrap();
        let b = ped.add_individual("B", Sex::Female, false).unwrap();
        ped.add_parent_child_relationship(b, a, Sex::Female).unwrap();
        ped.add_parent_child_relationship(a, b, Sex::Female).unwrap();

        assert!(matches!(ped.ancestors(a), Err(PedigreeError::Cycle(_))));
        assert!(matches!(ped.generation(a), Err(PedigreeError::Cycle(_))));
        let msg = format!("{}", ped.validate().unwrap_err());
        assert!(msg.contains("cycle"), "Error was: {}", msg);
    }

    #[test]
    fn test_validate_detects_self_parent() {
        let mut ped = Pedigree::new();
        let a = ped.add_individual("1", Sex::Male, false).unwrap();
        ped.force_parent(a, a, Sex::Male);

        let result = ped.validate();
        assert!(matches!(result, Err(PedigreeError::SelfParent(_))));
    }

    #[test]
    fn test_empty_pedigree() {
        let ped = Pedigree::default();
        assert!(ped.is_empty());
        assert!(ped.generations().unwrap().is_empty());
        assert!(ped.validate().is_ok());
        assert_eq!(ped.individual_index("x"), None);
    }
}
