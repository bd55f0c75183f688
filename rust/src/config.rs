use std::env;
use std::path::PathBuf;

// Attribute markers of the tagmanager line format (tm_tag.c). Each one
// introduces the field that follows it.
pub const TA_NAME: u8 = 200;
pub const TA_TYPE: u8 = 204;
pub const TA_ARGLIST: u8 = 205;
pub const TA_SCOPE: u8 = 206;
pub const TA_VARTYPE: u8 = 207;
pub const TA_INHERITS: u8 = 208;
pub const TA_FLAGS: u8 = 214;

/// Tag type written for every generated function tag. This is the legacy
/// value of the PHP tags generator; current tagmanager reads 128 as a
/// method and 16 as a function, which is what the decoder reports.
pub const TYPE_FUNCTION: u32 = 128;

pub const TRAILER_PREFIX: &str =
    "# format=tagmanager - Automatically generated file - do not edit (created on ";

pub const SOURCE_ENV: &str = "FUNCSUMMARY_SOURCE";
pub const OUTPUT_ENV: &str = "FUNCSUMMARY_TAGS_OUTPUT";

pub const DEFAULT_SOURCE: &str = "funcsummary.txt";
pub const DEFAULT_OUTPUT: &str = "data/php.tags";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Local path or http(s) URL of the function summary.
    pub source: String,
    pub output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Settings {
    /// Reads the settings from the process environment. Call `dotenv()`
    /// beforehand to pick up a `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            source: non_empty(SOURCE_ENV).unwrap_or(defaults.source),
            output: non_empty(OUTPUT_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.output),
        }
    }
}
