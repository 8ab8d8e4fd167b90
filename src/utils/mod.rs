//! Utility modules

pub mod id;
pub mod memory_remote;
pub mod memory_storage;
pub mod recording_view;
pub mod validation;

pub use id::*;
pub use memory_remote::*;
pub use memory_storage::*;
pub use recording_view::*;
pub use validation::*;
