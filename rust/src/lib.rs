pub mod clock;
pub mod config;
pub mod error;
pub mod source;
pub mod tags;

// Re-export main types and functions
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Settings;
pub use error::TagsError;
pub use source::{open_source, FileSource, SummarySource, UrlSource};
pub use tags::{decode_tags, TagExtractor, TagFile, TagRecord};
