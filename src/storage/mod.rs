//! Persistence medium for quorum
//!
//! Holds the raw bytes of the engine's persisted state. Nothing above this
//! module touches files directly.
//!
//! # Design Principles
//!
//! - Whole-blob reads and writes, no partial access
//! - Checksum-verified on every read
//! - All-or-nothing writes (temp file + fsync + rename on disk)
//! - Corruption is reported, never silently reset

mod checksum;
mod errors;
mod file;
mod medium;
mod memory;

pub use checksum::{compute_checksum, frame, unframe};
pub use errors::{Severity, StorageError, StorageErrorCode, StorageResult};
pub use file::FileMedium;
pub use medium::{read_json, write_json, Medium};
pub use memory::MemoryMedium;
