//! Storage layer for device-local state.
//!
//! # Module Structure
//!
//! - `atomic`: temp-file + rename writes shared by every file this crate owns
//! - `file_slot`: `FileSlot`, the on-disk `KeyValueSlot`

pub mod atomic;
mod file_slot;

pub use file_slot::FileSlot;
