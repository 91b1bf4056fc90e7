pub mod fs_ops;
pub mod marker_tool;

pub use marker_tool::MarkerTool;
