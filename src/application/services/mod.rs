mod ingest;
mod search;

pub use ingest::{IngestRequest, IngestService};
pub use search::SearchService;
