//! `brokkr new` command handler

use anyhow::{anyhow, Context, Result};
use camino::Utf8Path;
use dialoguer::{Confirm, Input};
use std::sync::Arc;

use brokkr_core::{utils::absolutize, SystemRunner};
use brokkr_projects::patch::{settings, urls, SourceFile};
use brokkr_projects::{validate_name, ProjectLayout, Scaffolder};
use brokkr_venv::Provisioner;

use crate::cli::NewArgs;
use crate::output;

/// Create a new Django project
pub async fn run(args: NewArgs) -> Result<()> {
    output::header("Create Django Project");

    // Resolve inputs, prompting for whatever the flags left out
    let name = resolve_name(&args)?;
    validate_name(&name)?;

    let apps = resolve_apps(&args)?;
    for app in &apps {
        validate_name(app)?;
    }

    let assets = resolve_assets(&args)?;

    let app_list = if apps.is_empty() {
        "(none)".to_string()
    } else {
        apps.join(", ")
    };
    output::kv("Project name", &name);
    output::kv("Apps", &app_list);
    output::kv("Virtualenv", &args.venv);
    output::kv("Asset wiring", if assets { "yes" } else { "no" });
    println!();

    let root = absolutize(Utf8Path::new(&name))?;
    let layout = ProjectLayout::new(name.clone(), root);
    tracing::debug!("Project root: {}", layout.root());

    // Provision the environment
    let runner = Arc::new(SystemRunner::new());
    let venv = Provisioner::new(layout.root().to_path_buf(), &args.venv, runner);

    let pb = output::spinner("Creating virtual environment...");
    venv.create()
        .await
        .context("Failed to create virtual environment")?;
    pb.finish_and_clear();
    output::success(&format!("Virtual environment at {}", venv.venv_dir()));

    let pb = output::spinner("Installing django...");
    venv.install("django")
        .await
        .context("Failed to install django")?;
    pb.finish_and_clear();
    output::success("Installed django");

    // Generate the project
    let scaffolder = Scaffolder::new(layout.clone(), venv);
    output::info(&format!("Creating Django project: {name}"));
    scaffolder
        .start_project()
        .await
        .context("Failed to create Django project")?;

    if assets {
        scaffolder
            .create_asset_dirs()
            .context("Failed to create template/static directories")?;
    }

    // Generate each app, then patch the generated configuration
    for app in &apps {
        output::info(&format!("Creating app: {app}"));
        scaffolder
            .start_app(app)
            .await
            .with_context(|| format!("Failed to create app '{app}'"))?;

        patch_for_app(&layout, app, assets)
            .with_context(|| format!("Failed to register app '{app}'"))?;
    }

    output::info("Running migrations...");
    scaffolder
        .run_migrations()
        .await
        .context("Failed to run migrations")?;

    if assets {
        let mut urls_file = SourceFile::load(layout.urls_path())?;
        urls::enable_static_serving(&mut urls_file);
        urls_file.save()?;
    }

    println!();
    output::success(&format!("Project '{name}' created"));
    println!();
    output::info("Next steps:");
    println!("   1. cd {name}");
    println!("   2. source {}/bin/activate", args.venv);
    println!("   3. python manage.py runserver");

    Ok(())
}

/// Apply the settings and routing patches for one generated app
fn patch_for_app(layout: &ProjectLayout, app: &str, assets: bool) -> Result<()> {
    let mut settings_file = SourceFile::load(layout.settings_path())?;
    settings::ensure_base_path(&mut settings_file);
    settings::register_app(&mut settings_file, app);
    if assets {
        settings::configure_assets(&mut settings_file)?;
    }
    settings_file.save()?;

    let mut urls_file = SourceFile::load(layout.urls_path())?;
    urls::include_app_routes(&mut urls_file, app)?;
    urls_file.save()?;

    Ok(())
}

fn resolve_name(args: &NewArgs) -> Result<String> {
    if let Some(name) = &args.name {
        return Ok(name.clone());
    }
    if args.non_interactive {
        return Err(anyhow!("Project name is required with --non-interactive"));
    }

    let name: String = Input::new()
        .with_prompt("Django project name")
        .interact_text()?;
    Ok(name.trim().to_string())
}

fn resolve_apps(args: &NewArgs) -> Result<Vec<String>> {
    if !args.apps.is_empty() || args.non_interactive {
        return Ok(args.apps.clone());
    }

    // Collect app names until an empty entry (or the original's `0`)
    let mut apps = Vec::new();
    loop {
        let app: String = Input::new()
            .with_prompt("App name (leave empty or enter 0 to finish)")
            .allow_empty(true)
            .interact_text()?;
        let app = app.trim().to_string();
        if app.is_empty() || app == "0" {
            break;
        }
        apps.push(app);
    }
    Ok(apps)
}

fn resolve_assets(args: &NewArgs) -> Result<bool> {
    if args.assets || args.non_interactive {
        return Ok(args.assets);
    }

    Ok(Confirm::new()
        .with_prompt("Add template/static file setup?")
        .default(false)
        .interact()?)
}
