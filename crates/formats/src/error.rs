#[derive(Debug)]
pub enum FormatError {
    Json(serde_json::Error),
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
    UnknownMode(String),
    UnknownPath { mode: String, path: String },
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::Json(e) => write!(f, "JSON parse error: {e}"),
            FormatError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            FormatError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
            FormatError::UnknownMode(mode) => write!(f, "unknown flyline mode: {mode}"),
            FormatError::UnknownPath { mode, path } => {
                write!(f, "flyline mode {mode} references unknown path {path}")
            }
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormatError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(e: serde_json::Error) -> Self {
        FormatError::Json(e)
    }
}
