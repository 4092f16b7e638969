use console::style;
use miette::Result;
use sprout::prompt::parse_data_pairs;
use sprout::render::PlannedEntry;
use sprout::GenerateOptions;

use crate::cli::Cli;

pub fn run(cli: Cli) -> Result<()> {
    let options = GenerateOptions {
        template: cli.template,
        output: cli.output,
        data: parse_data_pairs(&cli.data)?,
        defaults: cli.defaults,
    };

    if cli.dry_run {
        let plan = sprout::plan_generation(options)?;

        println!(
            "\n{} Dry run \u{2014} entries that would be generated in {}:",
            style("==>").cyan().bold(),
            style(plan.output_dir.display()).cyan()
        );
        match &plan.template_dir {
            Some(dir) => println!("  template: {}", dir.display()),
            None => println!("  template: (bundled)"),
        }

        for entry in &plan.render_plan.entries {
            let action = match entry {
                PlannedEntry::Directory { .. } => "mkdir ",
                PlannedEntry::File(file) if file.is_copy => "copy  ",
                PlannedEntry::File(_) => "render",
            };
            println!(
                "  {} {}",
                style(action).green(),
                entry.relative_path().display()
            );
        }

        let rendered = plan.render_plan.files().filter(|f| !f.is_copy).count();
        let copied = plan.render_plan.files().filter(|f| f.is_copy).count();
        println!("\nSummary: {} rendered, {} copied", rendered, copied);

        println!(
            "\n{} Dry run \u{2014} no files written.",
            style("\u{2139}").blue().bold()
        );
    } else {
        sprout::generate(options)?;
    }

    Ok(())
}
