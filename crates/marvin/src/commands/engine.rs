//! `marvin engine-generate` command handler

use anyhow::{bail, Context, Result};
use dialoguer::{Confirm, Input};
use marvin_core::MarvinEnv;
use marvin_projects::{
    GenerateOutcome, GenerateRequest, GitStatus, Maintainer, ProjectType, Scaffolder,
    TemplateSource,
};
use std::io::IsTerminal;

use crate::cli::{AutoMl, EngineGenerateArgs};
use crate::output;

const DEFAULT_DESCRIPTION: &str = "Marvin engine";
const DEFAULT_MAINTAINER: &str = "Marvin AI Community";
const DEFAULT_EMAIL: &str = "dev@marvin.apache.org";

/// Generate a new engine project
pub async fn generate(args: EngineGenerateArgs, env: &MarvinEnv) -> Result<()> {
    let Some(dest_root) = args.dest else {
        bail!("No destination folder. Pass --dest or set MARVIN_HOME");
    };
    if !dest_root.is_dir() {
        bail!("Destination folder does not exist: {}", dest_root);
    }
    let data_path = env.require_data_path()?.to_path_buf();

    let interactive = std::io::stdin().is_terminal();
    let name = ask(args.name, "Project name", None, interactive)?;
    let description = ask(
        args.description,
        "Short description",
        Some(DEFAULT_DESCRIPTION),
        interactive,
    )?;
    let maintainer = ask(
        args.mantainer,
        "Maintainer name",
        Some(DEFAULT_MAINTAINER),
        interactive,
    )?;
    let email = ask(args.email, "Maintainer email", Some(DEFAULT_EMAIL), interactive)?;
    let automl = match args.automl {
        Some(choice) => choice.enabled(),
        None if interactive => Confirm::new()
            .with_prompt("Use AutoML?")
            .default(false)
            .interact()?,
        None => AutoMl::N.enabled(),
    };

    let request = GenerateRequest {
        name,
        description,
        maintainer: Maintainer {
            name: maintainer,
            email,
        },
        package: args.package,
        dest_root,
        project_type: ProjectType::engine(automl),
        data_path,
        toolbox_version: env.toolbox_version().map(str::to_string),
        interpreter: args.python,
        skip_git: args.no_git,
    };

    let source = match args.templates_dir {
        Some(dir) => TemplateSource::Directory(dir),
        None => TemplateSource::Embedded,
    };

    output::header("Generate Marvin Engine");
    output::kv("Type", request.project_type.as_str());
    output::kv("Location", Scaffolder::destination(&request).as_str());
    println!();

    let spinner = output::spinner("Processing template files...");
    let outcome = Scaffolder::new(source).generate(&request).await;
    spinner.finish_and_clear();

    match outcome.context("Could not generate engine project")? {
        GenerateOutcome::Created { path, package, git } => {
            match git {
                GitStatus::Initialized => output::info("Initialized git repository"),
                GitStatus::Skipped => {}
                GitStatus::Failed(reason) => {
                    output::warning(&format!("Could not initialize repository: {}", reason))
                }
            }
            output::success("Done!");
            output::kv("Location", path.as_str());
            output::kv("Package", &package);
        }
        GenerateOutcome::Failed {
            path,
            stage,
            error,
            removed,
        } => {
            tracing::info!("Generation stopped at stage '{}'", stage);
            output::error(&error.to_string());
            if removed {
                output::info(&format!("Removed {}", path));
            }
        }
    }

    Ok(())
}

/// Use the given value, prompt for it, or fall back to its default
fn ask(
    value: Option<String>,
    prompt: &str,
    default: Option<&str>,
    interactive: bool,
) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }

    match (interactive, default) {
        (true, default) => {
            let mut input = Input::<String>::new().with_prompt(prompt);
            if let Some(default) = default {
                input = input.default(default.to_string());
            }
            Ok(input.interact_text()?)
        }
        (false, Some(default)) => Ok(default.to_string()),
        (false, None) => bail!("{} is required when not running in a terminal", prompt),
    }
}
