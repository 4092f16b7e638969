pub mod schema;
pub mod user;
pub mod variable;

use std::path::{Path, PathBuf};

pub use schema::{default_next_steps, TreeRules};
pub use user::{load_user_config, UserConfig};
pub use variable::{builtin_questions, Question};

/// Pick the template directory: explicit flag, then user config.
///
/// `None` means the template compiled into the binary is used.
pub fn resolve_template_dir(flag: Option<&Path>, user: Option<&UserConfig>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| user.and_then(|u| u.template_dir.clone()))
}

pub fn tree_rules(user: Option<&UserConfig>) -> TreeRules {
    user.map(|u| u.rules.clone()).unwrap_or_default()
}

/// Built-in questions with defaults replaced from the user config.
pub fn questions_with_defaults(user: Option<&UserConfig>) -> Vec<Question> {
    let mut questions = builtin_questions();
    if let Some(user) = user {
        for question in &mut questions {
            if let Some(default) = user.defaults.get(&question.name) {
                question.default = Some(default.clone());
            }
        }
    }
    questions
}

pub fn next_steps(user: Option<&UserConfig>) -> Vec<String> {
    user.and_then(|u| u.next_steps.clone())
        .unwrap_or_else(default_next_steps)
}
