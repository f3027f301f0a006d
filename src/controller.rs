use crate::{
    config::GeneratorConfig,
    error::{GeneratorError, Result},
    logger,
    models::{GenerationPhase, GenerationRequest, OriginalPanel, Selection, Style},
    transport::{GenerationTransport, HttpTransport},
    view::GeneratorView,
};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::oneshot;
use uuid::Uuid;

pub const VALIDATION_ALERT: &str = "Please upload an image OR enter a prompt!";
pub const TRANSPORT_ALERT: &str = "Server Error. Check console.";
pub const BUSY_ALERT: &str = "A generation is already in progress.";
pub const SELECTED_LABEL_PREFIX: &str = "✅ Image Selected: ";

#[derive(Debug, Clone)]
struct PickedImage {
    selection: Selection,
    preview_uri: String,
}

struct InFlight {
    id: Uuid,
    abort: Option<oneshot::Sender<()>>,
}

/// Mediates between the picker/prompt controls, the preview surface and the
/// generation service. At most one generation is in flight per instance.
pub struct ImagePickerAndGenerator {
    view: Arc<dyn GeneratorView>,
    transport: Arc<dyn GenerationTransport>,
    picked: Mutex<Option<PickedImage>>,
    in_flight: Mutex<Option<InFlight>>,
    phase: Mutex<GenerationPhase>,
}

impl ImagePickerAndGenerator {
    pub fn new(view: Arc<dyn GeneratorView>, transport: Arc<dyn GenerationTransport>) -> Self {
        Self {
            view,
            transport,
            picked: Mutex::new(None),
            in_flight: Mutex::new(None),
            phase: Mutex::new(GenerationPhase::Idle),
        }
    }

    pub fn from_config(view: Arc<dyn GeneratorView>, config: &GeneratorConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(view, Arc::new(transport)))
    }

    pub fn on_picker_activated(&self) {
        log::debug!("Drop zone activated, opening file picker");
        self.view.open_file_picker();
    }

    /// Only the first file is used; an empty change event does nothing.
    pub fn on_file_selected(&self, files: Vec<Selection>) {
        let Some(selection) = files.into_iter().next() else {
            log::debug!("File picker reported an empty selection");
            return;
        };

        let preview_uri = selection.preview_uri();
        self.view.set_preview_source(&preview_uri);
        self.view.show_preview();
        self.view
            .set_status_label(&format!("{}{}", SELECTED_LABEL_PREFIX, selection.file_name));

        log::info!(
            "Image selected: {} ({} bytes, {})",
            selection.file_name,
            selection.len(),
            selection.mime_type()
        );

        *lock(&self.picked) = Some(PickedImage {
            selection,
            preview_uri,
        });
    }

    pub async fn select_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let selection = Selection::from_path(path).await?;
        self.on_file_selected(vec![selection]);
        Ok(())
    }

    pub fn selection(&self) -> Option<Selection> {
        lock(&self.picked).as_ref().map(|picked| picked.selection.clone())
    }

    pub fn phase(&self) -> GenerationPhase {
        *lock(&self.phase)
    }

    pub fn is_generating(&self) -> bool {
        lock(&self.in_flight).is_some()
    }

    /// Aborts the pending generation. Returns false when nothing was pending.
    pub fn cancel(&self) -> bool {
        let mut slot = lock(&self.in_flight);
        match slot.as_mut().and_then(|in_flight| {
            in_flight
                .abort
                .take()
                .map(|abort| (in_flight.id, abort))
        }) {
            Some((id, abort)) => {
                log::info!("Cancelling generation [req:{}]", id);
                abort.send(()).is_ok()
            }
            None => false,
        }
    }

    /// Runs one generation cycle. Every error returned here has already been
    /// surfaced through the view.
    pub async fn generate(&self) -> Result<String> {
        let id = Uuid::new_v4();
        let abort_rx = {
            let mut slot = lock(&self.in_flight);
            if let Some(current) = slot.as_ref() {
                log::warn!(
                    "Rejecting generation [req:{}], [req:{}] is still pending",
                    id,
                    current.id
                );
                self.view.alert(BUSY_ALERT);
                return Err(GeneratorError::Busy);
            }
            let (abort_tx, abort_rx) = oneshot::channel();
            *slot = Some(InFlight {
                id,
                abort: Some(abort_tx),
            });
            abort_rx
        };
        let _cycle = CycleGuard {
            controller: self,
            id,
        };

        self.run_cycle(id, abort_rx).await
    }

    async fn run_cycle(&self, id: Uuid, mut abort_rx: oneshot::Receiver<()>) -> Result<String> {
        self.set_phase(GenerationPhase::Validating);

        let prompt = self.view.prompt_text();
        let style = Style::from(self.view.style_value());
        let picked = lock(&self.picked).clone();
        let preview_uri = picked.as_ref().map(|p| p.preview_uri.clone());
        let request = GenerationRequest::new(prompt, style, picked.map(|p| p.selection));

        if request.is_empty() {
            log::warn!("Generation [req:{}] rejected: no prompt and no image", id);
            self.view.alert(VALIDATION_ALERT);
            self.set_phase(GenerationPhase::Idle);
            return Err(GeneratorError::Validation(
                "a prompt or an image is required".to_string(),
            ));
        }

        self.set_phase(GenerationPhase::Submitting);
        self.view.show_loading();
        self.view.hide_result_area();

        self.set_phase(GenerationPhase::AwaitingResponse);
        let response = {
            let _timer = logger::timer(&format!("generation [req:{}]", id));
            tokio::select! {
                result = self.transport.submit(&request) => result,
                Ok(()) = &mut abort_rx => return self.finish_cancelled(id),
            }
        };
        if self.disarm_cancel(id, abort_rx) {
            return self.finish_cancelled(id);
        }

        self.view.hide_loading();

        let outcome = response.and_then(|result| result.into_image_url());
        match outcome {
            Ok(image_url) => {
                self.view.show_result_area();
                let original = match preview_uri {
                    Some(uri) => OriginalPanel::Image { uri },
                    None => OriginalPanel::TextToImage,
                };
                self.view.render_original(&original);
                self.view.render_generated(&image_url);
                self.view.set_download_target(&image_url);
                self.view.show_download();

                self.set_phase(GenerationPhase::Displaying);
                log::info!("Generation [req:{}] succeeded: {}", id, image_url);
                Ok(image_url)
            }
            Err(GeneratorError::Application(message)) => {
                log::warn!("Generation [req:{}] failed: {}", id, message);
                self.view.alert(&format!("Error: {}", message));
                self.set_phase(GenerationPhase::AlertShown);
                Err(GeneratorError::Application(message))
            }
            Err(e) => {
                log::error!("Generation [req:{}] transport failure: {}", id, e);
                self.view.alert(TRANSPORT_ALERT);
                self.set_phase(GenerationPhase::AlertShown);
                Err(e)
            }
        }
    }

    /// Closes the abort channel once the response is in. A cancel that won the
    /// lock before this point still ends the cycle as cancelled.
    fn disarm_cancel(&self, id: Uuid, mut abort_rx: oneshot::Receiver<()>) -> bool {
        let mut slot = lock(&self.in_flight);
        if let Some(in_flight) = slot.as_mut().filter(|in_flight| in_flight.id == id) {
            in_flight.abort = None;
        }
        abort_rx.try_recv().is_ok()
    }

    fn finish_cancelled(&self, id: Uuid) -> Result<String> {
        self.view.hide_loading();
        self.set_phase(GenerationPhase::Idle);
        log::info!("Generation [req:{}] cancelled", id);
        Err(GeneratorError::Cancelled)
    }

    fn set_phase(&self, phase: GenerationPhase) {
        log::debug!("Generation phase -> {}", phase.as_str());
        *lock(&self.phase) = phase;
    }
}

/// Ends the cycle when `generate` returns or its future is dropped: a cycle
/// stopped mid-flight gets its loading indicator hidden and goes back to idle,
/// then the in-flight slot is freed.
struct CycleGuard<'a> {
    controller: &'a ImagePickerAndGenerator,
    id: Uuid,
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        if self.controller.phase().is_pending() {
            log::warn!("Generation [req:{}] dropped before completing", self.id);
            self.controller.view.hide_loading();
            self.controller.set_phase(GenerationPhase::Idle);
        }

        let mut slot = lock(&self.controller.in_flight);
        if slot.as_ref().map(|in_flight| in_flight.id) == Some(self.id) {
            *slot = None;
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
