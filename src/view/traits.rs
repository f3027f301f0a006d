use crate::models::OriginalPanel;

/// Handles to the surface the controller drives. Resolved once, held for the
/// controller's lifetime. Every call runs on the controller's task.
pub trait GeneratorView: Send + Sync {
    fn open_file_picker(&self);

    fn set_preview_source(&self, uri: &str);
    fn show_preview(&self);
    fn set_status_label(&self, text: &str);

    fn prompt_text(&self) -> String;
    fn style_value(&self) -> String;

    fn show_loading(&self);
    fn hide_loading(&self);

    fn show_result_area(&self);
    fn hide_result_area(&self);
    fn render_original(&self, panel: &OriginalPanel);
    fn render_generated(&self, image_url: &str);

    fn set_download_target(&self, url: &str);
    fn show_download(&self);

    /// Blocking, user-visible message.
    fn alert(&self, message: &str);
}
