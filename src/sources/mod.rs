pub mod extract;
pub mod http;
pub mod traits;

pub use extract::extract_first;
pub use http::{HttpFetcher, RetryPolicy};
pub use traits::PageFetcher;
