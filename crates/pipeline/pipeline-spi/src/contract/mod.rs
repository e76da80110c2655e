//! Contract module containing trait definitions

mod artifact_store;

pub use artifact_store::ArtifactStore;
