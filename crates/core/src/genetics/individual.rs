use serde::Serialize;

use crate::types::Sex;

/// A single member of a [`Pedigree`](super::Pedigree).
///
/// Parent and child links are indices into the owning pedigree, so an
/// `Individual` never owns its relatives. Identity, sex and affection status
/// are fixed at construction; links change only through
/// [`Pedigree::add_parent_child_relationship`](super::Pedigree::add_parent_child_relationship).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Individual {
    id: String,
    sex: Sex,
    affected: bool,
    mother: Option<usize>,
    father: Option<usize>,
    /// In the order relationships were established. Not deduplicated.
    children: Vec<usize>,
}

impl Individual {
    pub(crate) fn new(id: &str, sex: Sex, affected: bool) -> Self {
        Self {
            id: id.to_string(),
            sex,
            affected,
            mother: None,
            father: None,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn is_affected(&self) -> bool {
        self.affected
    }

    pub fn is_male(&self) -> bool {
        self.sex == Sex::Male
    }

    /// Index of the mother, or `None` if unrecorded.
    pub fn mother(&self) -> Option<usize> {
        self.mother
    }

    /// Index of the father, or `None` if unrecorded.
    pub fn father(&self) -> Option<usize> {
        self.father
    }

    /// Both parents, if and only if both are recorded.
    pub fn parents(&self) -> Option<(usize, usize)> {
        self.mother.zip(self.father)
    }

    pub fn is_founder(&self) -> bool {
        self.mother.is_none() && self.father.is_none()
    }

    pub fn children(&self) -> &[usize] {
        &self.children
    }

    pub(crate) fn set_parent(&mut self, parent: usize, role: Sex) {
        match role {
            Sex::Female => self.mother = Some(parent),
            Sex::Male => self.father = Some(parent),
        }
    }

    pub(crate) fn push_child(&mut self, child: usize) {
        self.children.push(child);
    }
}
