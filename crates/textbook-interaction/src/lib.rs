pub mod augmentation_client;
pub mod chat_client;
pub mod flight;
pub mod http_backend;

#[cfg(test)]
mod mock;

pub use augmentation_client::{AugmentationClient, AugmentationError};
pub use chat_client::{ChatClient, SendOutcome};
pub use http_backend::HttpBackend;
