use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::{PedigreeError, Result};
use crate::genetics::Pedigree;
use crate::types::{parse_affected, Sex};

/// One row of a pedigree file: an individual and the IDs of its parents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PedigreeRecord {
    pub id: String,
    pub sex: Sex,
    pub affected: bool,
    pub mother: Option<String>,
    pub father: Option<String>,
}

impl PedigreeRecord {
    pub fn new(id: &str, sex: Sex, affected: bool) -> Self {
        Self {
            id: id.to_string(),
            sex,
            affected,
            mother: None,
            father: None,
        }
    }

    pub fn with_parents(mut self, mother: Option<&str>, father: Option<&str>) -> Self {
        self.mother = mother.map(str::to_string);
        self.father = father.map(str::to_string);
        self
    }
}

/// JSON shape of a record. `sex` is a tag parsed like the CSV column.
#[derive(Debug, Deserialize)]
struct JsonRecord {
    id: String,
    sex: String,
    affected: bool,
    #[serde(default)]
    mother: Option<String>,
    #[serde(default)]
    father: Option<String>,
}

impl Pedigree {
    /// Build a pedigree from records.
    ///
    /// All individuals are registered first so that parents may appear after
    /// their children. For each record the mother is linked before the
    /// father. A record may name just one parent.
    ///
    /// # Errors
    /// Returns an error on duplicate IDs, on a parent ID that is not in the
    /// records, or on an individual named as its own parent.
    pub fn from_records(records: &[PedigreeRecord]) -> Result<Self> {
        let mut ped = Self::new();

        for rec in records {
            ped.add_individual(&rec.id, rec.sex, rec.affected)?;
        }

        for (i, rec) in records.iter().enumerate() {
            for (parent, role) in [(&rec.mother, Sex::Female), (&rec.father, Sex::Male)] {
                let Some(parent_id) = parent else { continue };
                let p = ped.individual_index(parent_id).ok_or_else(|| {
                    PedigreeError::Pedigree(format!(
                        "Individual '{}' references unknown parent '{}'",
                        rec.id, parent_id
                    ))
                })?;
                ped.add_parent_child_relationship(i, p, role)?;
            }
        }

        log::debug!("Built pedigree with {} individuals", ped.n_individuals());
        Ok(ped)
    }

    /// Read a pedigree from a CSV file.
    ///
    /// Expected columns (header required, any order, case-insensitive):
    /// `id`, `sex`, `affected`, `mother`, `father`. Unknown parents are
    /// coded as `"0"`, `""`, or `"NA"`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, columns are missing, a
    /// sex or affection value is invalid, or the records are inconsistent.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_csv_reader(file)
    }

    /// Like [`Pedigree::from_csv`] but reads from any reader.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.to_lowercase())
            .collect();

        let column = |name: &str| {
            headers.iter().position(|h| h == name).ok_or_else(|| {
                PedigreeError::Pedigree(format!("CSV missing '{}' column", name))
            })
        };
        let id_col = column("id")?;
        let sex_col = column("sex")?;
        let affected_col = column("affected")?;
        let mother_col = column("mother")?;
        let father_col = column("father")?;

        let mut records = Vec::new();

        for result in reader.records() {
            let row = result?;
            let field = |col: usize| row.get(col).unwrap_or_default();

            records.push(PedigreeRecord {
                id: field(id_col).to_string(),
                sex: field(sex_col).parse()?,
                affected: parse_affected(field(affected_col))?,
                mother: parse_parent(field(mother_col)),
                father: parse_parent(field(father_col)),
            });
        }

        Self::from_records(&records)
    }

    /// Read a pedigree from a JSON array of
    /// `{"id", "sex", "affected", "mother", "father"}` objects.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<JsonRecord> = serde_json::from_str(json)?;
        let records = entries
            .into_iter()
            .map(|e| -> Result<PedigreeRecord> {
                Ok(PedigreeRecord {
                    sex: e.sex.parse()?,
                    id: e.id,
                    affected: e.affected,
                    mother: e.mother.as_deref().and_then(parse_parent),
                    father: e.father.as_deref().and_then(parse_parent),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_records(&records)
    }

    /// Read a pedigree file, choosing JSON for a `.json` extension and CSV
    /// otherwise.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&std::fs::read_to_string(path)?)
        } else {
            Self::from_csv(path)
        }
    }
}

/// Parse a parent string, returning `None` for unknown parents.
///
/// Unknown parents are coded as `"0"`, `""`, `"NA"`, or `"na"`.
fn parse_parent(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed == "0" || trimmed.eq_ignore_ascii_case("na") {
        None
    } else {
        Some(trimmed.to_string())
    }
}
