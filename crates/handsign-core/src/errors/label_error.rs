/// Label map normalization errors. Raised at load time only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabelMapError {
    #[error("label map is not a JSON object")]
    NotAnObject,

    #[error("label map is empty")]
    Empty,

    #[error("label map direction is ambiguous (keys and values are both indices): {sample}")]
    AmbiguousDirection { sample: String },

    #[error("unsupported label map format: {sample}")]
    UnsupportedFormat { sample: String },

    #[error("index {index} is assigned more than once")]
    DuplicateIndex { index: usize },

    #[error("label '{label}' is assigned more than once")]
    DuplicateLabel { label: String },

    #[error("indices are not contiguous: {missing} is missing")]
    IndexGap { missing: usize },

    #[error("malformed JSON: {message}")]
    Json { message: String },
}
