//! Domain layer of the textbook companion.
//!
//! Holds the reader profile, the session broadcast, the sign-up/sign-in
//! wizard, the page model that augmentations are inserted into, the chat
//! transcript and the backend contract. Nothing here performs I/O directly;
//! storage and HTTP come in through [`storage::KeyValueSlot`] and
//! [`backend::TextbookBackend`].

pub mod augmentation;
pub mod auth;
pub mod backend;
pub mod chat;
pub mod config;
pub mod error;
pub mod page;
pub mod profile;
pub mod session;
pub mod storage;

pub use error::{Result, TextbookError};
