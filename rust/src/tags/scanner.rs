use crate::clock::{rfc1123, Clock};
use crate::error::Result;
use crate::source::SummarySource;
use crate::tags::model::{trailer_line, TagFile, TagRecord};
use crate::tags::writer::write_tag_file;
use once_cell::sync::Lazy;
use regex::bytes::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// `<returnType> <functionName>(<params>)` at the start of a line. ASCII
/// word characters only; params stop at the first `)`.
static SIGNATURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u)^(?P<ret_type>\w+) (?P<func_name>[\w:]+)(?P<params>\(.*?\))")
        .expect("Invalid signature regex")
});

const SCOPE_SEPARATOR: &[u8] = b"::";

/// Raw captures of a signature line, before filtering and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature<'a> {
    pub ret_type: &'a [u8],
    pub func_name: &'a [u8],
    pub params: &'a [u8],
}

pub fn parse_signature(line: &[u8]) -> Option<Signature<'_>> {
    let caps = SIGNATURE.captures(line)?;
    Some(Signature {
        ret_type: caps.name("ret_type")?.as_bytes(),
        func_name: caps.name("func_name")?.as_bytes(),
        params: caps.name("params")?.as_bytes(),
    })
}

fn is_method(name: &[u8]) -> bool {
    name.windows(SCOPE_SEPARATOR.len()).any(|w| w == SCOPE_SEPARATOR)
}

fn normalize_params(params: &[u8]) -> &[u8] {
    if params == b"(void)" {
        &b"()"[..]
    } else {
        params
    }
}

/// Turns one summary line into a tag, or `None` when the line is not a
/// free function signature.
pub fn record_from_line(line: &[u8]) -> Option<TagRecord> {
    let sig = parse_signature(line)?;
    if is_method(sig.func_name) {
        debug!(name = %String::from_utf8_lossy(sig.func_name), "skipping method");
        return None;
    }
    Some(TagRecord {
        name: sig.func_name.to_vec(),
        return_type: sig.ret_type.to_vec(),
        param_list: normalize_params(sig.params).to_vec(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub record_count: usize,
}

pub struct TagExtractor<C: Clock> {
    clock: C,
}

impl<C: Clock> TagExtractor<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn extract(&self, input: &[u8]) -> TagFile {
        let records: Vec<TagRecord> = input
            .split(|&b| b == b'\n')
            .filter_map(record_from_line)
            .collect();
        let trailer = trailer_line(&rfc1123(&self.clock.now()));
        TagFile::assemble(&records, trailer)
    }

    pub fn run(&self, source: &dyn SummarySource, output: &Path) -> Result<RunSummary> {
        let input = source.read()?;
        let tag_file = self.extract(&input);
        info!(
            source = %source.describe(),
            records = tag_file.record_count(),
            "extracted function tags"
        );
        write_tag_file(output, &tag_file.to_bytes())?;
        Ok(RunSummary {
            output: output.to_path_buf(),
            record_count: tag_file.record_count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_the_three_parts() {
        let sig = parse_signature(b"array array_merge(array $a, array $b [, array $...])").unwrap();
        assert_eq!(sig.ret_type, b"array");
        assert_eq!(sig.func_name, b"array_merge");
        assert_eq!(sig.params, b"(array $a, array $b [, array $...])");
    }

    #[test]
    fn params_stop_at_first_closing_paren() {
        let sig = parse_signature(b"mixed call(callable $f (x)) trailing").unwrap();
        assert_eq!(sig.params, b"(callable $f (x)");
    }

    #[test]
    fn requires_match_at_line_start() {
        assert!(parse_signature(b" int strlen(string $str)").is_none());
        assert!(parse_signature(b"Returns the length of the string").is_none());
        assert!(parse_signature(b"int strlen").is_none());
        assert!(parse_signature(b"").is_none());
    }

    #[test]
    fn skips_methods() {
        assert!(record_from_line(b"void MyClass::doThing(void)").is_none());
        // A single colon is not a scope separator.
        assert!(record_from_line(b"int odd:name()").is_some());
    }

    #[test]
    fn only_exact_void_is_normalized() {
        let rec = record_from_line(b"int foo(void)").unwrap();
        assert_eq!(rec.param_list, b"()");
        let rec = record_from_line(b"int foo( void )").unwrap();
        assert_eq!(rec.param_list, b"( void )");
    }

    #[test]
    fn non_utf8_bytes_pass_through() {
        let rec = record_from_line(b"string cafe(string $\xe9)").unwrap();
        assert_eq!(rec.param_list, b"(string $\xe9)");
    }
}
