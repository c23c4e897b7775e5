//! Data model shared by the parser, the sinks and the merge driver.
//!
//! Every value here is transient: it lives for one pass over one input file.

mod operation;
mod run;
mod stats;
mod table;

pub use operation::Operation;
pub use run::{plain_text, StyledRun};
pub use stats::ConversionStats;
pub use table::TableGrid;
