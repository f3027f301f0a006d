pub mod config;
pub mod controller;
pub mod error;
pub mod logger;
pub mod models;
pub mod transport;
pub mod view;

pub use config::GeneratorConfig;
pub use controller::ImagePickerAndGenerator;
pub use error::{GeneratorError, Result};
pub use models::*;
pub use transport::{GenerationTransport, HttpTransport};
pub use view::{GeneratorView, MemoryView, ViewState};
