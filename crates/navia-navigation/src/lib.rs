//! Navia Navigation
//!
//! Address bar behaviour:
//! - Input starting with `http://` or `https://` → navigate as typed
//! - Anything else → search-engine query URL
//! - Live suggestions while typing, one request in flight at a time
//!
//! History rules (cap and dedup) also live here so every caller that
//! records a visit applies them the same way.

mod error;
mod history;
mod input;
mod suggest;

pub use error::NavigationError;
pub use history::{record_visit, recent, search, HISTORY_LIMIT};
pub use input::{InputResolution, InputResolver, DEFAULT_SEARCH_ENDPOINT};
pub use suggest::{
    parse_suggestions, SuggestionFetcher, SuggestionOutcome, SuggestionSink,
    DEFAULT_SUGGEST_ENDPOINT, SUGGEST_TIMEOUT,
};

pub type Result<T> = std::result::Result<T, NavigationError>;
