pub mod engine;
pub mod file;
pub mod tree;
pub mod walker;

pub use engine::{render, RenderError};
pub use tree::{bundled_tree, read_tree, NodeKind, TemplateTree, TreeNode};
pub use walker::{
    execute_plan, materialize, materialize_with_rules, plan_render, GeneratedProject,
    GenerationPlan, PlannedEntry, PlannedFile,
};
