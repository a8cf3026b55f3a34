mod io;

pub use io::PedigreeRecord;
