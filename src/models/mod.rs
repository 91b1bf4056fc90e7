pub mod entry;
pub mod loaders;
pub mod manifest;
pub mod policy;

pub use entry::FileEntry;
pub use loaders::{load_manifest, load_policy_overrides};
pub use manifest::{Manifest, Problem, Variant};
pub use policy::{HandlingPolicy, PolicyTable};
