pub mod http;
pub mod traits;

pub use http::HttpTransport;
pub use traits::GenerationTransport;
