//! prism-file - Filesystem-backed persistence for prism.

mod persistence;

pub use persistence::FilePersistence;
