use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::answers::Answers;
use crate::config::schema::TreeRules;
use crate::error::{Result, SproutError};
use crate::render::engine::{render, RenderError};
use crate::render::file::{destination_path, is_template_marked};
use crate::render::tree::{read_tree, NodeKind, TemplateTree};

#[derive(Debug)]
pub struct GeneratedProject {
    pub output_dir: PathBuf,
    pub directories_created: Vec<PathBuf>,
    pub files_created: Vec<PathBuf>,
    pub files_copied: Vec<PathBuf>,
}

/// A file that would be created during generation.
#[derive(Debug)]
pub struct PlannedFile {
    /// Path relative to the output directory.
    pub relative_path: PathBuf,
    /// The file content (rendered template or copied bytes).
    pub content: Vec<u8>,
    /// Whether this file was copied verbatim (true) or rendered from a template (false).
    pub is_copy: bool,
}

#[derive(Debug)]
pub enum PlannedEntry {
    Directory { relative_path: PathBuf },
    File(PlannedFile),
}

impl PlannedEntry {
    pub fn relative_path(&self) -> &Path {
        match self {
            PlannedEntry::Directory { relative_path } => relative_path,
            PlannedEntry::File(file) => &file.relative_path,
        }
    }
}

/// The result of planning a generation without writing to disk.
#[derive(Debug)]
pub struct GenerationPlan {
    pub entries: Vec<PlannedEntry>,
}

impl GenerationPlan {
    pub fn files(&self) -> impl Iterator<Item = &PlannedFile> {
        self.entries.iter().filter_map(|e| match e {
            PlannedEntry::File(file) => Some(file),
            PlannedEntry::Directory { .. } => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().filter_map(|e| match e {
            PlannedEntry::Directory { relative_path } => Some(relative_path.as_path()),
            PlannedEntry::File(_) => None,
        })
    }
}

/// Map a template tree to the entries of the generated project, entirely in memory.
pub fn plan_render(
    tree: &TemplateTree,
    answers: &Answers,
    rules: &TreeRules,
) -> Result<GenerationPlan> {
    let project_name = answers.project_name()?;

    let mut entries = Vec::with_capacity(tree.nodes.len());
    // destination path -> index in `entries`, to detect two sources landing on one file
    let mut planned_files: HashMap<PathBuf, usize> = HashMap::new();

    for node in &tree.nodes {
        let src = &node.relative_path;
        let file_name = src.file_name().unwrap_or_default();

        let content = match &node.kind {
            NodeKind::Directory => {
                let relative_path = destination_path(src, rules, project_name, false);
                log::debug!("mkdir  {} -> {}", src.display(), relative_path.display());
                entries.push(PlannedEntry::Directory { relative_path });
                continue;
            }
            NodeKind::File { content } => content,
        };

        if file_name == OsStr::new(&rules.sentinel) {
            log::debug!("skip   {}", src.display());
            continue;
        }

        let is_template = is_template_marked(file_name, &rules.marker_suffix);
        let relative_path = destination_path(src, rules, project_name, is_template);

        let planned = if is_template {
            let rendered = render_template_file(src, content, answers)?;
            log::debug!("render {} -> {}", src.display(), relative_path.display());
            PlannedFile {
                relative_path,
                content: rendered.into_bytes(),
                is_copy: false,
            }
        } else {
            log::debug!("copy   {} -> {}", src.display(), relative_path.display());
            PlannedFile {
                relative_path,
                content: content.clone(),
                is_copy: true,
            }
        };

        if let Some(&index) = planned_files.get(&planned.relative_path) {
            log::warn!(
                "{} overwrites an earlier entry at {}",
                src.display(),
                planned.relative_path.display()
            );
            entries[index] = PlannedEntry::File(planned);
        } else {
            planned_files.insert(planned.relative_path.clone(), entries.len());
            entries.push(PlannedEntry::File(planned));
        }
    }

    Ok(GenerationPlan { entries })
}

fn render_template_file(src: &Path, content: &[u8], answers: &Answers) -> Result<String> {
    let to_error = |e: RenderError| SproutError::TemplateRender {
        file: src.display().to_string(),
        message: e.message,
        line: e.line,
        column: e.column,
    };

    let text = std::str::from_utf8(content).map_err(|e| {
        let valid = std::str::from_utf8(&content[..e.valid_up_to()]).unwrap_or_default();
        to_error(RenderError::at(valid, valid.len(), "template is not valid UTF-8"))
    })?;

    render(text, answers).map_err(to_error)
}

/// Write the entries of a generation plan under `output_dir`.
///
/// Existing files are overwritten. Nothing is rolled back on failure.
pub fn execute_plan(plan: &GenerationPlan, output_dir: &Path) -> Result<GeneratedProject> {
    create_dir(output_dir)?;

    let mut directories_created = Vec::new();
    let mut files_created = Vec::new();
    let mut files_copied = Vec::new();

    for entry in &plan.entries {
        let dest_path = output_dir.join(entry.relative_path());
        match entry {
            PlannedEntry::Directory { relative_path } => {
                create_dir(&dest_path)?;
                directories_created.push(relative_path.clone());
            }
            PlannedEntry::File(file) => {
                if let Some(parent) = dest_path.parent() {
                    create_dir(parent)?;
                }
                std::fs::write(&dest_path, &file.content).map_err(|e| {
                    SproutError::DestinationWrite {
                        path: dest_path.clone(),
                        source: e,
                    }
                })?;
                if file.is_copy {
                    files_copied.push(file.relative_path.clone());
                } else {
                    files_created.push(file.relative_path.clone());
                }
            }
        }
    }

    Ok(GeneratedProject {
        output_dir: output_dir.to_path_buf(),
        directories_created,
        files_created,
        files_copied,
    })
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| SproutError::DestinationWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Reproduce `source_root` under `dest_root` with the default naming rules.
pub fn materialize(
    source_root: &Path,
    dest_root: &Path,
    answers: &Answers,
) -> Result<GeneratedProject> {
    materialize_with_rules(source_root, dest_root, answers, &TreeRules::default())
}

pub fn materialize_with_rules(
    source_root: &Path,
    dest_root: &Path,
    answers: &Answers,
    rules: &TreeRules,
) -> Result<GeneratedProject> {
    let tree = read_tree(source_root)?;
    let plan = plan_render(&tree, answers, rules)?;
    execute_plan(&plan, dest_root)
}
