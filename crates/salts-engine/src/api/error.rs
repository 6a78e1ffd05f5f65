use std::fmt;

/// Errors raised while constructing levels, entities and resources.
/// Per-frame simulation never fails; it degrades and logs instead.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A size was negative or not finite.
    InvalidSize { width: f32, height: f32 },
    /// A named surface is absent from the resource table.
    MissingResource(String),
    /// No builder exists for this level identifier.
    UnimplementedLevel(i32),
    /// The asset manifest could not be parsed.
    Manifest(String),
    /// The game configuration is malformed.
    Config(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidSize { width, height } => {
                write!(f, "invalid size: ({}, {})", width, height)
            }
            EngineError::MissingResource(name) => write!(f, "missing resource: '{}'", name),
            EngineError::UnimplementedLevel(id) => {
                write!(f, "level {} hasn't been implemented", id)
            }
            EngineError::Manifest(msg) => write!(f, "asset manifest error: {}", msg),
            EngineError::Config(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Manifest(e.to_string())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_descriptive() {
        let err = EngineError::UnimplementedLevel(3);
        assert_eq!(err.to_string(), "level 3 hasn't been implemented");

        let err = EngineError::MissingResource("player".into());
        assert!(err.to_string().contains("'player'"));
    }

    #[test]
    fn json_errors_convert() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{ nope");
        let err: EngineError = parse.unwrap_err().into();
        assert!(matches!(err, EngineError::Manifest(_)));
    }
}
