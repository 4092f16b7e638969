pub mod answers;
pub mod config;
pub mod error;
pub mod logger;
pub mod prompt;
pub mod render;

use std::path::{Path, PathBuf};

use console::style;

use crate::answers::Answers;
use crate::config::{load_user_config, UserConfig};
use crate::error::{Result, SproutError};
use crate::prompt::{collect_answers, PromptOptions};
use crate::render::{
    bundled_tree, execute_plan, plan_render, read_tree, GeneratedProject, GenerationPlan,
};

pub use crate::render::materialize;

#[derive(Default)]
pub struct GenerateOptions {
    /// Template tree; falls back to the user config, then the bundled template.
    pub template: Option<PathBuf>,
    /// Parent of the project directory; falls back to the current directory.
    pub output: Option<PathBuf>,
    pub data: Vec<(String, String)>,
    pub defaults: bool,
}

/// Everything needed to execute a generation that has been planned but not yet written.
pub struct FullGenerationPlan {
    pub render_plan: GenerationPlan,
    /// `None` when the template compiled into the binary was used.
    pub template_dir: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub answers: Answers,
    pub next_steps: Vec<String>,
}

/// Plan a project generation: load config, read the template, collect answers, render in memory.
///
/// Does **not** write any files to disk.
pub fn plan_generation(options: GenerateOptions) -> Result<FullGenerationPlan> {
    let user_config = load_user_config()?;
    plan_generation_with_config(options, user_config.as_ref())
}

/// Same as [`plan_generation`] with an already loaded user config.
pub fn plan_generation_with_config(
    options: GenerateOptions,
    user_config: Option<&UserConfig>,
) -> Result<FullGenerationPlan> {
    let template_dir = config::resolve_template_dir(options.template.as_deref(), user_config);

    // read before prompting so a bad template fails fast
    let tree = match &template_dir {
        Some(dir) => {
            log::debug!("using template {}", dir.display());
            read_tree(dir)?
        }
        None => {
            log::debug!("using bundled template");
            bundled_tree()
        }
    };

    let prompt_options = PromptOptions {
        data_overrides: options.data.into_iter().collect(),
        use_defaults: options.defaults,
    };
    let questions = config::questions_with_defaults(user_config);
    let answers = collect_answers(&questions, &prompt_options)?;

    let output_root = match options.output {
        Some(out) => out,
        None => std::env::current_dir().map_err(|e| SproutError::Io {
            context: "getting current directory".into(),
            source: e,
        })?,
    };
    let output_dir = output_root.join(answers.project_name()?);

    if has_contents(&output_dir) {
        log::warn!(
            "{} already exists, existing files may be overwritten",
            output_dir.display()
        );
    }

    let rules = config::tree_rules(user_config);
    let render_plan = plan_render(&tree, &answers, &rules)?;

    Ok(FullGenerationPlan {
        render_plan,
        template_dir,
        output_dir,
        answers,
        next_steps: config::next_steps(user_config),
    })
}

fn has_contents(dir: &Path) -> bool {
    std::fs::read_dir(dir)
        .map(|mut d| d.next().is_some())
        .unwrap_or(false)
}

/// Execute a previously planned generation and print the completion message.
pub fn execute_generation(plan: FullGenerationPlan) -> Result<GeneratedProject> {
    let result = execute_plan(&plan.render_plan, &plan.output_dir)?;
    let project_name = plan.answers.project_name()?;

    println!(
        "\n{} Project {} created successfully!",
        style("✓").green().bold(),
        style(project_name).cyan()
    );
    println!(
        "  {} files rendered, {} files copied into {}",
        result.files_created.len(),
        result.files_copied.len(),
        plan.output_dir.display()
    );

    let steps = render_next_steps(&plan.next_steps, &plan.answers)?;
    if !steps.is_empty() {
        println!("\n{}", style("Next Steps:").bold());
        for (i, step) in steps.iter().enumerate() {
            println!("{}. {}", i + 1, step);
        }
        println!();
    }

    Ok(result)
}

/// Render each next-step line against the answers.
pub fn render_next_steps(steps: &[String], answers: &Answers) -> Result<Vec<String>> {
    steps
        .iter()
        .map(|step| {
            render::render(step, answers).map_err(|e| SproutError::TemplateRender {
                file: "(next steps)".into(),
                message: e.message,
                line: e.line,
                column: e.column,
            })
        })
        .collect()
}

/// Generate a project from a template.
pub fn generate(options: GenerateOptions) -> Result<GeneratedProject> {
    let plan = plan_generation(options)?;
    execute_generation(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_next_steps() {
        let answers: Answers = [("projectName", "demo")].into_iter().collect();
        let steps = render_next_steps(&config::default_next_steps(), &answers).unwrap();
        assert_eq!(
            steps[0],
            "Navigate to your project directory: cd demo".to_string()
        );
        assert_eq!(steps.len(), 4);
    }
}
