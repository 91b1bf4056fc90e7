pub mod file_deployer;

pub use file_deployer::{DeployOutcome, FileDeployer};
