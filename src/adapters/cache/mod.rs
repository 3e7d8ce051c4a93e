//! Local cache adapters.

mod file;

pub use file::FileIntakeCache;
