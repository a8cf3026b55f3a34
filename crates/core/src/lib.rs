pub mod data;
pub mod error;
pub mod genetics;
pub mod types;

pub use data::PedigreeRecord;
pub use error::{PedigreeError, Result};
pub use genetics::{
    CarrierStatus, ChartEntry, Individual, InheritanceVerdict, ModeOfInheritance, Pedigree,
};
pub use types::Sex;
