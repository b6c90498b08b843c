// Event source module
// Group event store interface, JSON-backed source, background fetches and the event cache

pub mod cache;
pub mod fetcher;
pub mod source;

pub use cache::EventCache;
pub use fetcher::{fetch_group, EventFetcher, FetchResult, FetchedGroup};
pub use source::{EventDocument, EventSource, JsonEventSource};
