//! Core engine - workflow model and pipeline resolution

mod resolver;
mod workflow;

pub use resolver::{
    resolve, Diagnostic, LayoutConfig, LayoutEdge, LayoutNode, PipelineLayout, Position,
};
pub use workflow::{Step, Workflow, WorkflowStatus};
