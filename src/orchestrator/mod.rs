//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理清单中的所有题目)
//!     ↓
//! workflow::ProblemFlow (处理单道题目)
//!     ↓
//! services::FileDeployer (部署单个条目)
//!     ↓
//! infrastructure (MarkerTool / fs_ops)
//! ```

pub mod batch_processor;

pub use batch_processor::{App, RunStats};
