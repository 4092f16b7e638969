use serde::{Deserialize, Serialize};

/// Naming rules applied while materializing a template tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TreeRules {
    /// Literal substring in source paths replaced by the project name.
    #[serde(default = "default_token")]
    pub token: String,

    /// Files ending with this suffix are rendered and written without it.
    #[serde(default = "default_marker_suffix")]
    pub marker_suffix: String,

    /// Placeholder kept only to hold empty directories in the template tree.
    #[serde(default = "default_sentinel")]
    pub sentinel: String,
}

fn default_token() -> String {
    "template".to_string()
}

fn default_marker_suffix() -> String {
    ".hbs".to_string()
}

fn default_sentinel() -> String {
    ".gitkeep".to_string()
}

impl Default for TreeRules {
    fn default() -> Self {
        Self {
            token: default_token(),
            marker_suffix: default_marker_suffix(),
            sentinel: default_sentinel(),
        }
    }
}

/// Lines printed after a successful generation. Each line is rendered against the answers.
pub fn default_next_steps() -> Vec<String> {
    vec![
        "Navigate to your project directory: cd {{{projectName}}}".to_string(),
        "Install dependencies: npm install".to_string(),
        "Generate Prisma Client: npx prisma generate".to_string(),
        "Start the server: npm start".to_string(),
    ]
}
