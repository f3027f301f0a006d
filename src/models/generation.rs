use crate::{
    error::{GeneratorError, Result},
    models::{Selection, Style},
};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

/// One submission to the generation service. Built per call, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub style: Style,
    pub image: Option<Selection>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, style: impl Into<Style>, image: Option<Selection>) -> Self {
        Self {
            prompt: prompt.into(),
            style: style.into(),
            image,
        }
    }

    /// Nothing to generate from: no text and no picture.
    pub fn is_empty(&self) -> bool {
        self.prompt.is_empty() && self.image.is_none()
    }

    pub fn to_form(&self) -> Result<Form> {
        let mut form = Form::new()
            .text("prompt", self.prompt.clone())
            .text("style", self.style.as_str().to_string());

        if let Some(image) = &self.image {
            let part = Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone())
                .mime_str(image.mime_type())
                .map_err(|e| GeneratorError::Transport(format!("invalid image part: {}", e)))?;
            form = form.part("image", part);
        }

        Ok(form)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GenerationResult {
    pub const SUCCESS: &'static str = "success";

    pub fn success(image_url: impl Into<String>) -> Self {
        Self {
            status: Self::SUCCESS.to_string(),
            image_url: Some(image_url.into()),
            message: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Self::SUCCESS
    }

    /// Resolves the record into the generated image URL or the server's message.
    pub fn into_image_url(self) -> Result<String> {
        if !self.is_success() {
            return Err(GeneratorError::Application(
                self.message.unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }
        self.image_url.ok_or_else(|| {
            GeneratorError::Transport("success response is missing image_url".to_string())
        })
    }
}

/// What the "original" panel shows once a generation succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginalPanel {
    Image { uri: String },
    TextToImage,
}

impl OriginalPanel {
    pub const PLACEHOLDER: &'static str = "(Text-to-Image used)";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    AwaitingResponse,
    Displaying,
    AlertShown,
}

impl GenerationPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationPhase::Idle => "idle",
            GenerationPhase::Validating => "validating",
            GenerationPhase::Submitting => "submitting",
            GenerationPhase::AwaitingResponse => "awaiting_response",
            GenerationPhase::Displaying => "displaying",
            GenerationPhase::AlertShown => "alert_shown",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            GenerationPhase::Validating
                | GenerationPhase::Submitting
                | GenerationPhase::AwaitingResponse
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_request() {
        assert!(GenerationRequest::new("", "none", None).is_empty());
        assert!(!GenerationRequest::new("a red fox", "none", None).is_empty());

        let image = Selection::new("photo.jpg", vec![0xFF, 0xD8, 0xFF]);
        let request = GenerationRequest::new("", "anime", Some(image));
        assert!(!request.is_empty());
        assert!(request.image.is_some());
        assert!(request.to_form().is_ok());
    }

    #[test]
    fn test_parse_success() {
        let result: GenerationResult =
            serde_json::from_str(r#"{"status":"success","image_url":"https://x/y.png"}"#).unwrap();
        assert!(result.is_success());
        assert_eq!(result.into_image_url().unwrap(), "https://x/y.png");
    }

    #[test]
    fn test_parse_failure_carries_message() {
        let result: GenerationResult =
            serde_json::from_str(r#"{"status":"failure","message":"quota exceeded"}"#).unwrap();
        assert!(!result.is_success());
        assert_eq!(
            result.into_image_url(),
            Err(GeneratorError::Application("quota exceeded".to_string()))
        );
    }

    #[test]
    fn test_any_other_status_is_failure() {
        let result: GenerationResult = serde_json::from_str(r#"{"status":"SUCCESS"}"#).unwrap();
        assert_eq!(
            result.into_image_url(),
            Err(GeneratorError::Application("Unknown error".to_string()))
        );
    }

    #[test]
    fn test_success_without_url_is_malformed() {
        let result = GenerationResult {
            status: "success".to_string(),
            image_url: None,
            message: None,
        };
        assert!(matches!(
            result.into_image_url(),
            Err(GeneratorError::Transport(_))
        ));
    }

    #[test]
    fn test_pending_phases() {
        assert!(GenerationPhase::AwaitingResponse.is_pending());
        assert!(!GenerationPhase::Displaying.is_pending());
        assert_eq!(GenerationPhase::default(), GenerationPhase::Idle);
    }
}
