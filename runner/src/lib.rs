pub mod run;
pub mod sectors;

pub use run::{NO_DATA_MESSAGE, RunConfig, RunOutcome, Runner};
pub use sectors::sector_snapshot;
