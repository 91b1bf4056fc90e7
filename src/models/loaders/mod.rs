pub mod manifest_loader;
pub mod policy_loader;

pub use manifest_loader::load_manifest;
pub use policy_loader::load_policy_overrides;
