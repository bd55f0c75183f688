use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TagsError {
    #[error("Input unavailable: {source_desc}: {reason}")]
    InputUnavailable { source_desc: String, reason: String },

    #[error("Output unwritable: {}", .path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed tag file at line {line}: {reason}")]
    MalformedTagFile { line: usize, reason: String },
}

impl TagsError {
    /// Process exit status reported by the binaries for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InputUnavailable { .. } => 2,
            Self::OutputUnwritable { .. } => 3,
            Self::MalformedTagFile { .. } => 4,
        }
    }

    pub(crate) fn input(source_desc: impl Into<String>, reason: impl ToString) -> Self {
        Self::InputUnavailable {
            source_desc: source_desc.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TagsError>;
