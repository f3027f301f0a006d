pub mod memory;
pub mod traits;

pub use memory::{MemoryView, ViewState};
pub use traits::GeneratorView;
