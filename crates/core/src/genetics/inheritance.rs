use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{PedigreeError, Result};

use super::pedigree::Pedigree;

/// The four classical Mendelian transmission patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ModeOfInheritance {
    #[serde(rename = "Autosomal Dominant")]
    AutosomalDominant,
    #[serde(rename = "Autosomal Recessive")]
    AutosomalRecessive,
    #[serde(rename = "X-Linked Dominant")]
    XLinkedDominant,
    #[serde(rename = "X-Linked Recessive")]
    XLinkedRecessive,
}

impl ModeOfInheritance {
    pub const ALL: [ModeOfInheritance; 4] = [
        ModeOfInheritance::AutosomalDominant,
        ModeOfInheritance::AutosomalRecessive,
        ModeOfInheritance::XLinkedDominant,
        ModeOfInheritance::XLinkedRecessive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ModeOfInheritance::AutosomalDominant => "Autosomal Dominant",
            ModeOfInheritance::AutosomalRecessive => "Autosomal Recessive",
            ModeOfInheritance::XLinkedDominant => "X-Linked Dominant",
            ModeOfInheritance::XLinkedRecessive => "X-Linked Recessive",
        }
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            ModeOfInheritance::AutosomalDominant => "AD",
            ModeOfInheritance::AutosomalRecessive => "AR",
            ModeOfInheritance::XLinkedDominant => "XLD",
            ModeOfInheritance::XLinkedRecessive => "XLR",
        }
    }
}

impl fmt::Display for ModeOfInheritance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ModeOfInheritance {
    type Err = PedigreeError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| {
                trimmed.eq_ignore_ascii_case(m.label())
                    || trimmed.eq_ignore_ascii_case(m.abbreviation())
            })
            .ok_or_else(|| {
                PedigreeError::Pedigree(format!("Unknown mode of inheritance '{}'", trimmed))
            })
    }
}

/// Result of [`Pedigree::find_mode_of_inheritance`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InheritanceVerdict {
    /// Exactly one mode survived elimination.
    Single(ModeOfInheritance),
    /// Zero, two, three or four modes survived. An empty set means the
    /// pattern fits none of the classical modes.
    Candidates(BTreeSet<ModeOfInheritance>),
}

impl InheritanceVerdict {
    fn from_candidates(mut candidates: BTreeSet<ModeOfInheritance>) -> Self {
        if candidates.len() == 1 {
            if let Some(mode) = candidates.pop_first() {
                return InheritanceVerdict::Single(mode);
            }
        }
        InheritanceVerdict::Candidates(candidates)
    }

    /// The surviving modes, whichever variant holds them.
    pub fn candidates(&self) -> BTreeSet<ModeOfInheritance> {
        match self {
            InheritanceVerdict::Single(mode) => BTreeSet::from([*mode]),
            InheritanceVerdict::Candidates(set) => set.clone(),
        }
    }

    pub fn single(&self) -> Option<ModeOfInheritance> {
        match self {
            InheritanceVerdict::Single(mode) => Some(*mode),
            InheritanceVerdict::Candidates(_) => None,
        }
    }

    pub fn is_consistent_with(&self, mode: ModeOfInheritance) -> bool {
        match self {
            InheritanceVerdict::Single(m) => *m == mode,
            InheritanceVerdict::Candidates(set) => set.contains(&mode),
        }
    }
}

impl fmt::Display for InheritanceVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InheritanceVerdict::Single(mode) => write!(f, "{}", mode),
            InheritanceVerdict::Candidates(set) if set.is_empty() => {
                f.write_str("no classical mode fits")
            }
            InheritanceVerdict::Candidates(set) => {
                let labels: Vec<&str> = set.iter().map(|m| m.label()).collect();
                write!(f, "{{{}}}", labels.join(", "))
            }
        }
    }
}

impl Pedigree {
    /// Narrow the four classical modes down to those consistent with the
    /// affection pattern.
    ///
    /// Every affected individual with both parents recorded is examined:
    /// - both parents unaffected rules out both dominant modes;
    /// - an unaffected parent that is not a [`Carrier`](super::CarrierStatus::Carrier)
    ///   rules out autosomal recessive;
    /// - an affected male whose mother is neither affected nor a carrier
    ///   rules out X-linked recessive.
    ///
    /// Each rule only removes candidates, so the outcome does not depend on
    /// the order of individuals.
    pub fn find_mode_of_inheritance(&self) -> InheritanceVerdict {
        use ModeOfInheritance::*;

        let mut candidates: BTreeSet<ModeOfInheritance> = ModeOfInheritance::ALL.into();

        for ind in self.find_affected() {
            let Some((mother_idx, father_idx)) = ind.parents() else {
                continue;
            };
            let mother = self.individual(mother_idx);
            let father = self.individual(father_idx);
            let mother_carrier = self.carrier_status(mother_idx).is_carrier();
            let father_carrier = self.carrier_status(father_idx).is_carrier();

            if !mother.is_affected() && !father.is_affected() {
                discard(
                    &mut candidates,
                    &[AutosomalDominant, XLinkedDominant],
                    ind.id(),
                    "both parents unaffected",
                );
            }

            if (!father.is_affected() && !father_carrier)
                || (!mother.is_affected() && !mother_carrier)
            {
                discard(
                    &mut candidates,
                    &[AutosomalRecessive],
                    ind.id(),
                    "unaffected parent is not a carrier",
                );
            }

            if ind.is_male() && !(mother.is_affected() || mother_carrier) {
                discard(
                    &mut candidates,
                    &[XLinkedRecessive],
                    ind.id(),
                    "mother of affected male is neither affected nor a carrier",
                );
            }
        }

        InheritanceVerdict::from_candidates(candidates)
    }
}

fn discard(
    candidates: &mut BTreeSet<ModeOfInheritance>,
    modes: &[ModeOfInheritance],
    id: &str,
    reason: &str,
) {
    for mode in modes {
        if candidates.remove(mode) {
            log::debug!("'{}': {} ruled out ({})", id, mode, reason);
        }
    }
}
