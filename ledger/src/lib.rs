pub mod model;
pub mod store;

pub use model::AlertedSet;
pub use store::{LedgerError, LedgerStore};
