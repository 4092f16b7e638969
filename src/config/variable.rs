use serde::{Deserialize, Serialize};

use crate::answers::{DESCRIPTION, PROJECT_NAME};

/// One field asked of the user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub name: String,
    pub prompt: String,
    #[serde(default)]
    pub default: Option<String>,
    /// A required answer may not be empty or whitespace-only.
    #[serde(default)]
    pub required: bool,
}

impl Question {
    pub fn new(name: &str, prompt: &str, default: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            prompt: prompt.to_string(),
            default: Some(default.to_string()),
            required,
        }
    }
}

/// The questions asked on every run, in prompt order.
pub fn builtin_questions() -> Vec<Question> {
    vec![
        Question::new(PROJECT_NAME, "Enter the project name:", "my-app", true),
        Question::new(
            DESCRIPTION,
            "Enter the project description:",
            "A Node.js project with custom architecture.",
            false,
        ),
    ]
}
