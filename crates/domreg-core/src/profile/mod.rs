// # Profile Source Implementations
//
// This module provides implementations of the ProfileSource trait.

pub mod file;
pub mod memory;

pub use file::FileProfileSource;
pub use memory::StaticProfileSource;
