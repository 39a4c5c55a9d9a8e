pub mod artifacts;
pub mod shared;

pub use artifacts::{build_artifacts, read_records_json, ArtifactStore, Manifest};
pub use shared::SharedCatalog;
