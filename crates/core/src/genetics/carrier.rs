use std::fmt;

use serde::Serialize;

use super::individual::Individual;
use super::pedigree::Pedigree;

/// Outcome of the carrier heuristic for one individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CarrierStatus {
    /// The affection pattern around the individual suggests a silent
    /// recessive allele.
    Carrier,
    /// No carrier pattern matched. This is absence of evidence, not proof.
    NotCarrier,
    /// Parents or children are missing, so nothing can be said.
    Indeterminate,
}

impl CarrierStatus {
    pub fn is_carrier(self) -> bool {
        self == CarrierStatus::Carrier
    }
}

impl fmt::Display for CarrierStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CarrierStatus::Carrier => "carrier",
            CarrierStatus::NotCarrier => "not carrier",
            CarrierStatus::Indeterminate => "indeterminate",
        };
        f.write_str(s)
    }
}

impl Pedigree {
    /// Heuristic carrier status of the individual at `index`.
    ///
    /// Requires both parents and at least one child to be recorded, otherwise
    /// the result is [`CarrierStatus::Indeterminate`]. An unaffected individual
    /// is a carrier when any of these hold:
    /// - female with an affected child whose father is unaffected;
    /// - male with an affected child whose mother is unaffected;
    /// - both parents unaffected and an affected full or half sibling.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn carrier_status(&self, index: usize) -> CarrierStatus {
        let ind = self.individual(index);
        let Some((mother, father)) = ind.parents() else {
            return CarrierStatus::Indeterminate;
        };
        if ind.children().is_empty() {
            return CarrierStatus::Indeterminate;
        }
        if ind.is_affected() {
            return CarrierStatus::NotCarrier;
        }

        // A child with no recorded co-parent never matches.
        let unaffected = |parent: Option<usize>| {
            parent.is_some_and(|p| !self.individual(p).is_affected())
        };
        let has_affected_child_with = |co_parent: fn(&Individual) -> Option<usize>| {
            ind.children().iter().any(|&c| {
                let child = self.individual(c);
                child.is_affected() && unaffected(co_parent(child))
            })
        };

        let transmits = if ind.is_male() {
            has_affected_child_with(Individual::mother)
        } else {
            has_affected_child_with(Individual::father)
        };
        if transmits {
            return CarrierStatus::Carrier;
        }

        let mother = self.individual(mother);
        let father = self.individual(father);
        if !mother.is_affected() && !father.is_affected() {
            let affected_sibling = mother
                .children()
                .iter()
                .chain(father.children())
                .any(|&s| s != index && self.individual(s).is_affected());
            if affected_sibling {
                return CarrierStatus::Carrier;
            }
        }

        CarrierStatus::NotCarrier
    }
}
