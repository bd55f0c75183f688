//! Reader for tagmanager tag files, mirroring how the completion engine
//! loads a global tags file: every byte `>= TA_NAME` starts a new field.

use crate::config::{
    TA_ARGLIST, TA_FLAGS, TA_INHERITS, TA_NAME, TA_SCOPE, TA_TYPE, TA_VARTYPE,
};
use crate::error::{Result, TagsError};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodedTag {
    #[serde(serialize_with = "lossy")]
    pub name: Vec<u8>,
    pub tag_type: Option<u32>,
    #[serde(serialize_with = "lossy_opt")]
    pub arglist: Option<Vec<u8>>,
    #[serde(serialize_with = "lossy_opt")]
    pub scope: Option<Vec<u8>>,
    #[serde(serialize_with = "lossy_opt")]
    pub var_type: Option<Vec<u8>>,
    #[serde(serialize_with = "lossy_opt")]
    pub inherits: Option<Vec<u8>>,
    pub flags: Option<u32>,
    /// Attributes this reader does not interpret, as (marker, value).
    #[serde(skip)]
    pub extra: Vec<(u8, Vec<u8>)>,
}

fn lossy<S: serde::Serializer>(bytes: &[u8], s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(&String::from_utf8_lossy(bytes))
}

fn lossy_opt<S: serde::Serializer>(
    bytes: &Option<Vec<u8>>,
    s: S,
) -> std::result::Result<S::Ok, S::Error> {
    match bytes {
        Some(b) => lossy(b, s),
        None => s.serialize_none(),
    }
}

// TMTagType bits in order: bit i is named TYPE_NAMES[i].
const TYPE_NAMES: [&str; 20] = [
    "class",
    "enum",
    "enumerator",
    "field",
    "function",
    "interface",
    "member",
    "method",
    "namespace",
    "package",
    "prototype",
    "struct",
    "typedef",
    "union",
    "variable",
    "externvar",
    "macro",
    "macro_arg",
    "file",
    "other",
];

/// Kind name of a tag type, as the consuming engine labels it. Values that
/// are not a single known bit are `UNKNOWN`.
pub fn type_name(tag_type: u32) -> &'static str {
    if tag_type == 0 {
        return "undef";
    }
    if !tag_type.is_power_of_two() {
        return "UNKNOWN";
    }
    TYPE_NAMES
        .get(tag_type.trailing_zeros() as usize)
        .copied()
        .unwrap_or("UNKNOWN")
}

impl DecodedTag {
    /// `method:     int strlen(string $str)` style rendering.
    pub fn display_line(&self) -> String {
        let kind = type_name(self.tag_type.unwrap_or(0));
        let mut out = format!("{:<12}", format!("{kind}: "));
        if let Some(var_type) = &self.var_type {
            out.push_str(&String::from_utf8_lossy(var_type));
            out.push(' ');
        }
        if let Some(scope) = &self.scope {
            out.push_str(&String::from_utf8_lossy(scope));
            out.push_str(" :: ");
        }
        out.push_str(&String::from_utf8_lossy(&self.name));
        if let Some(arglist) = &self.arglist {
            out.push_str(&String::from_utf8_lossy(arglist));
        }
        if let Some(inherits) = &self.inherits {
            out.push_str(" extends ");
            out.push_str(&String::from_utf8_lossy(inherits));
        }
        if let Some(flags) = self.flags.filter(|&f| f > 0) {
            out.push_str(&format!("    flags: {flags}"));
        }
        out
    }
}

fn split_fields(line: &[u8]) -> Vec<&[u8]> {
    let mut fields = Vec::new();
    let mut start = 0;
    for (i, &b) in line.iter().enumerate() {
        if b >= TA_NAME && i > start {
            fields.push(&line[start..i]);
            start = i;
        }
    }
    fields.push(&line[start..]);
    fields
}

/// Decodes one line. Header/trailer comments and blank lines yield `None`.
/// `line_no` is only used for error messages.
pub fn decode_line(line: &[u8], line_no: usize) -> Result<Option<DecodedTag>> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    if line.is_empty() || line.starts_with(b"#") {
        return Ok(None);
    }
    let malformed = |reason: String| TagsError::MalformedTagFile {
        line: line_no,
        reason,
    };

    let mut fields = split_fields(line).into_iter();
    let name = fields.next().unwrap_or_default();
    match name.first() {
        Some(&c) if c.is_ascii_graphic() => {}
        _ => return Err(malformed("tag name missing or not printable".into())),
    }

    let mut tag = DecodedTag {
        name: name.to_vec(),
        ..Default::default()
    };
    for field in fields {
        let (marker, value) = (field[0], &field[1..]);
        let number = |what: &str| {
            let text = String::from_utf8_lossy(value);
            text.trim()
                .parse::<u32>()
                .map_err(|_| malformed(format!("invalid {what} {text:?}")))
        };
        match marker {
            TA_TYPE => tag.tag_type = Some(number("tag type")?),
            TA_FLAGS => tag.flags = Some(number("flags")?),
            TA_ARGLIST => tag.arglist = Some(value.to_vec()),
            TA_SCOPE => tag.scope = Some(value.to_vec()),
            TA_VARTYPE => tag.var_type = Some(value.to_vec()),
            TA_INHERITS => tag.inherits = Some(value.to_vec()),
            other => tag.extra.push((other, value.to_vec())),
        }
    }
    Ok(Some(tag))
}

pub fn decode_tags(contents: &[u8]) -> Result<Vec<DecodedTag>> {
    let mut tags = Vec::new();
    for (idx, line) in contents.split(|&b| b == b'\n').enumerate() {
        if let Some(tag) = decode_line(line, idx + 1)? {
            tags.push(tag);
        }
    }
    Ok(tags)
}
