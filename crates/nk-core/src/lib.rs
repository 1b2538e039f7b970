pub mod config;
pub mod error;
pub mod messages;
pub mod query;
pub mod types;

pub use config::NorikaeConfig;
pub use error::{NkError, Result};
pub use messages::{MessageKey, Messages};
pub use query::{build_query, jst, now_jst, QueryInput, SearchRequest};
pub use types::{Direction, Itinerary, ItineraryFragment, SearchCriteria, SearchMode};
