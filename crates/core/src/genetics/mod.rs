// Pedigree graph, carrier heuristic, mode-of-inheritance elimination

pub mod carrier;
pub mod chart;
pub mod individual;
pub mod inheritance;
pub mod pedigree;

pub use carrier::CarrierStatus;
pub use chart::ChartEntry;
pub use individual::Individual;
pub use inheritance::{InheritanceVerdict, ModeOfInheritance};
pub use pedigree::Pedigree;
