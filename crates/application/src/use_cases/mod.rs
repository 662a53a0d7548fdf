pub mod process_request;

pub use process_request::{RedirectEngine, RequestOutcome};
