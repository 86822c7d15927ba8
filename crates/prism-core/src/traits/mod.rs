//! Collaborator traits.

mod creator;
mod persistence;

pub use creator::SessionCreator;
pub use persistence::{MemoryPersistence, ObjectPersistence};
