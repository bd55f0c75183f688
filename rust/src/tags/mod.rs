pub mod decode;
pub mod model;
pub mod scanner;
pub mod writer;

pub use decode::{decode_line, decode_tags, DecodedTag};
pub use model::{TagFile, TagRecord};
pub use scanner::{parse_signature, record_from_line, RunSummary, Signature, TagExtractor};
pub use writer::write_tag_file;
