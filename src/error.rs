use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Generation failed: {0}")]
    Application(String),

    #[error("A generation is already in progress")]
    Busy,

    #[error("Generation cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<reqwest::Error> for GeneratorError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GeneratorError::Transport(format!("request timed out: {}", e))
        } else {
            GeneratorError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for GeneratorError {
    fn from(e: serde_json::Error) -> Self {
        GeneratorError::Transport(format!("malformed response body: {}", e))
    }
}

impl From<std::io::Error> for GeneratorError {
    fn from(e: std::io::Error) -> Self {
        GeneratorError::Io(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            GeneratorError::Application("quota exceeded".into()).to_string(),
            "Generation failed: quota exceeded"
        );
        assert_eq!(
            GeneratorError::Busy.to_string(),
            "A generation is already in progress"
        );
    }

    #[test]
    fn test_json_error_is_transport() {
        let err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        match GeneratorError::from(err) {
            GeneratorError::Transport(msg) => assert!(msg.starts_with("malformed response body")),
            other => panic!("unexpected variant: {:?}", other),
        }
    }
}
