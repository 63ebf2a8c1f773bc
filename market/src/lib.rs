pub mod clock;
pub mod source;
pub mod types;
pub mod yahoo;

pub use clock::{MarketClock, MarketSession};
pub use source::{QuoteSource, SourceError};
pub use types::{Quote, SectorRow};
pub use yahoo::YahooClient;
