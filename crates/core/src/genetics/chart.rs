use serde::Serialize;

use crate::error::Result;
use crate::types::Sex;

use super::pedigree::Pedigree;

/// Everything a pedigree renderer needs to know about one individual.
///
/// Layout, symbols and connecting lines are left to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartEntry {
    pub id: String,
    pub sex: Sex,
    pub affected: bool,
    pub generation: usize,
    pub mother: Option<String>,
    pub father: Option<String>,
}

impl Pedigree {
    /// One [`ChartEntry`] per individual, in pedigree order.
    ///
    /// # Errors
    /// Returns [`PedigreeError::Cycle`](crate::PedigreeError::Cycle) if
    /// generations cannot be computed.
    pub fn chart(&self) -> Result<Vec<ChartEntry>> {
        let generations = self.generations()?;
        let id_of = |idx: Option<usize>| idx.map(|i| self.individual(i).id().to_string());

        Ok(self
            .individuals()
            .iter()
            .zip(generations)
            .map(|(ind, generation)| ChartEntry {
                id: ind.id().to_string(),
                sex: ind.sex(),
                affected: ind.is_affected(),
                generation,
                mother: id_of(ind.mother()),
                father: id_of(ind.father()),
            })
            .collect())
    }

    /// Deepest generation in the pedigree, or `None` if it is empty.
    pub fn max_generation(&self) -> Result<Option<usize>> {
        Ok(self.generations()?.into_iter().max())
    }
}
