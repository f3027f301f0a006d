use crate::{models::OriginalPanel, view::traits::GeneratorView};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub prompt: String,
    pub style: String,
    pub picker_opened: usize,
    pub preview_src: Option<String>,
    pub preview_visible: bool,
    pub status_label: String,
    pub loading_visible: bool,
    pub result_visible: bool,
    pub original_panel: Option<String>,
    pub generated_panel: Option<String>,
    pub download_href: Option<String>,
    pub download_visible: bool,
    pub alerts: Vec<String>,
}

/// Headless view: keeps the surface as plain state.
#[derive(Debug, Default)]
pub struct MemoryView {
    state: Mutex<ViewState>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inputs(prompt: impl Into<String>, style: impl Into<String>) -> Self {
        let view = Self::new();
        view.set_prompt(prompt);
        view.set_style(style);
        view
    }

    pub fn set_prompt(&self, prompt: impl Into<String>) {
        self.state().prompt = prompt.into();
    }

    pub fn set_style(&self, style: impl Into<String>) {
        self.state().style = style.into();
    }

    pub fn snapshot(&self) -> ViewState {
        self.state().clone()
    }

    pub fn last_alert(&self) -> Option<String> {
        self.state().alerts.last().cloned()
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        // A panic while holding the lock leaves plain data behind; keep using it.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl GeneratorView for MemoryView {
    fn open_file_picker(&self) {
        self.state().picker_opened += 1;
    }

    fn set_preview_source(&self, uri: &str) {
        self.state().preview_src = Some(uri.to_string());
    }

    fn show_preview(&self) {
        self.state().preview_visible = true;
    }

    fn set_status_label(&self, text: &str) {
        self.state().status_label = text.to_string();
    }

    fn prompt_text(&self) -> String {
        self.state().prompt.clone()
    }

    fn style_value(&self) -> String {
        self.state().style.clone()
    }

    fn show_loading(&self) {
        self.state().loading_visible = true;
    }

    fn hide_loading(&self) {
        self.state().loading_visible = false;
    }

    fn show_result_area(&self) {
        self.state().result_visible = true;
    }

    fn hide_result_area(&self) {
        self.state().result_visible = false;
    }

    fn render_original(&self, panel: &OriginalPanel) {
        let rendered = match panel {
            OriginalPanel::Image { uri } => uri.clone(),
            OriginalPanel::TextToImage => OriginalPanel::PLACEHOLDER.to_string(),
        };
        self.state().original_panel = Some(rendered);
    }

    fn render_generated(&self, image_url: &str) {
        self.state().generated_panel = Some(image_url.to_string());
    }

    fn set_download_target(&self, url: &str) {
        self.state().download_href = Some(url.to_string());
    }

    fn show_download(&self) {
        self.state().download_visible = true;
    }

    fn alert(&self, message: &str) {
        log::warn!("Alert: {}", message);
        self.state().alerts.push(message.to_string());
    }
}
