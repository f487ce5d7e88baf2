use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use clap::Parser;
use fs_err as fs;
use std::path::PathBuf;
use std::process::ExitCode;
use uuid::Uuid;

mod analysis;
mod catalog;
mod cli;
mod config;
mod errors;
mod log;
mod output;
mod prompt;
mod provider;
mod store;
mod ux;
mod wire;

use catalog::GenerationKind;
use cli::{Cli, Command, HistoryAction, InputArgs, OutputArgs, TemplateAction};
use config::Config;
use errors::ForgeError;
use prompt::TokenMap;
use store::{HistoryStore, TemplateStore, TemplateUpdate};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ux::print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut cfg = Config::load(cli.config.as_deref())?;
    if let Some(model) = cli.model {
        cfg.provider = model;
    }
    if cli.no_history {
        cfg.record_history = false;
    }
    let debug = cli.debug;

    match cli.command {
        Command::Readme { template, context, simple, starter, offline, out } => {
            if let Some(id) = starter {
                let content = find_starter(catalog::README_STARTERS, &id)?;
                ux::print_generated(catalog::entry(GenerationKind::Readme).title, content);
                return write_if_requested(GenerationKind::Readme, content, &out);
            }
            if offline {
                let content = catalog::entry(GenerationKind::Readme).default_content;
                ux::print_generated(catalog::entry(GenerationKind::Readme).title, content);
                return write_if_requested(GenerationKind::Readme, content, &out);
            }
            let built = if simple {
                // --simple requires --context at the CLI level.
                let context = context.as_deref().unwrap_or_default();
                prompt::BuiltPrompt {
                    text: prompt::readme_context_prompt(context),
                    unresolved: Vec::new(),
                }
            } else {
                prompt::compose(
                    GenerationKind::Readme,
                    Some(&template),
                    &TokenMap::new(),
                    context.as_deref(),
                )?
            };
            let content = run_generation(GenerationKind::Readme, built, &cfg, debug).await?;
            emit(GenerationKind::Readme, "README.md", &content, &out, &cfg)
        }

        Command::Gitignore { template, patterns, starter, out } => {
            if let Some(id) = starter {
                let content = find_starter(catalog::GITIGNORE_STARTERS, &id)?;
                ux::print_generated(catalog::entry(GenerationKind::Gitignore).title, content);
                return write_if_requested(GenerationKind::Gitignore, content, &out);
            }
            // required_unless_present = "starter" guarantees this.
            let template = template.unwrap_or_default();
            let built = prompt::compose(
                GenerationKind::Gitignore,
                Some(&template),
                &prompt::gitignore_tokens(patterns.as_deref()),
                None,
            )?;
            let content = run_generation(GenerationKind::Gitignore, built, &cfg, debug).await?;
            let title = format!(".gitignore ({template})");
            emit(GenerationKind::Gitignore, &title, &content, &out, &cfg)
        }

        Command::License { license_type, project, author, year, out } => {
            let year = year.unwrap_or_else(|| Utc::now().year().to_string());
            let built = prompt::compose(
                GenerationKind::License,
                Some(&license_type),
                &prompt::license_tokens(&project, &author, &year),
                None,
            )?;
            let content = run_generation(GenerationKind::License, built, &cfg, debug).await?;
            let title = format!("{} license for {project}", license_type.to_uppercase());
            emit(GenerationKind::License, &title, &content, &out, &cfg)
        }

        Command::Requirements { deps, from_code, script, install_cmd, out } => {
            let built = match (&deps, &from_code) {
                (_, Some(path)) => {
                    let code = fs::read_to_string(path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    let text = if script {
                        prompt::requirements_from_script(&code)
                    } else {
                        prompt::requirements_from_code(&code)
                    };
                    prompt::BuiltPrompt { text, unresolved: Vec::new() }
                }
                (Some(_), None) => prompt::compose(
                    GenerationKind::Requirements,
                    None,
                    &TokenMap::new(),
                    deps.as_deref(),
                )?,
                (None, None) => {
                    return Err(ForgeError::Precondition(
                        "provide a dependency list or --from-code <file>".into(),
                    )
                    .into())
                }
            };
            let content =
                run_generation(GenerationKind::Requirements, built, &cfg, debug).await?;
            emit(GenerationKind::Requirements, "requirements.txt", &content, &out, &cfg)?;
            if install_cmd {
                match output::derive_install_command(&content) {
                    Some(cmd) => println!("\n{cmd}"),
                    None => ux::print_warning("no installable packages found in the output"),
                }
            }
            Ok(())
        }

        Command::Codegen { template, input, out } => {
            let text = read_input(&input)?;
            let built = prompt::compose(
                GenerationKind::CodeGen,
                Some(&template),
                &TokenMap::new(),
                Some(&text),
            )?;
            let content = run_generation(GenerationKind::CodeGen, built, &cfg, debug).await?;
            let title = option_label(GenerationKind::CodeGen, &template);
            emit(GenerationKind::CodeGen, &title, &content, &out, &cfg)
        }

        Command::Docs { template, input, out } => {
            let text = read_input(&input)?;
            let built = prompt::compose(
                GenerationKind::Docs,
                Some(&template),
                &TokenMap::new(),
                Some(&text),
            )?;
            let content = run_generation(GenerationKind::Docs, built, &cfg, debug).await?;
            let title = option_label(GenerationKind::Docs, &template);
            emit(GenerationKind::Docs, &title, &content, &out, &cfg)
        }

        Command::Analysis { template, input, json } => {
            let text = read_input(&input)?;
            match template {
                // Free-form review through a catalog option.
                Some(template) => {
                    let built = prompt::compose(
                        GenerationKind::Analysis,
                        Some(&template),
                        &TokenMap::new(),
                        Some(&text),
                    )?;
                    let content =
                        run_generation(GenerationKind::Analysis, built, &cfg, debug).await?;
                    let title = option_label(GenerationKind::Analysis, &template);
                    emit(GenerationKind::Analysis, &title, &content, &no_output(), &cfg)
                }
                // Structured report: the backend is asked for strict JSON.
                None => {
                    let built = prompt::BuiltPrompt {
                        text: prompt::analysis_prompt(&text),
                        unresolved: Vec::new(),
                    };
                    let content =
                        run_generation(GenerationKind::Analysis, built, &cfg, debug).await?;
                    let parsed = analysis::parse_analysis(&content)?;
                    if json {
                        println!("{}", serde_json::to_string_pretty(&parsed)?);
                    } else {
                        ux::print_analysis(&parsed);
                    }
                    record_history(GenerationKind::Analysis, "project analysis", &content, &cfg)
                }
            }
        }

        Command::Kinds => {
            for kind in GenerationKind::ALL {
                let entry = catalog::entry(kind);
                println!("{:<14} {}: {}", kind.to_string(), entry.title, entry.description);
                for opt in entry.options {
                    println!("    --template {:<20} {}", opt.id, opt.label);
                }
                println!("    input hint: {}", entry.placeholder);
            }
            Ok(())
        }

        Command::History { action } => history_command(action, &cfg),
        Command::Template { action } => template_command(action, &cfg),
    }
}

/// Spinner → gateway dispatch → artifact log → error surfacing. Returns
/// the fence-stripped content of a successful generation.
async fn run_generation(
    kind: GenerationKind,
    built: prompt::BuiltPrompt,
    cfg: &Config,
    debug: bool,
) -> Result<String> {
    for token in &built.unresolved {
        ux::print_warning(&format!("placeholder {{{token}}} has no value and is sent as-is"));
    }

    let tx = Uuid::new_v4();
    let pb = ux::spinner(&format!("Generating {kind} with {:?}...", cfg.provider));
    let dispatcher = provider::Dispatcher::new();
    let resp = dispatcher
        .dispatch(&built.text, cfg.provider, cfg, debug)
        .await;
    pb.finish_and_clear();

    let resp = resp.context("generation superseded by a newer request")?;

    let data_dir = store::data_dir(cfg.data_dir.as_deref())?;
    let saved = log::save_generation(
        kind.as_str(),
        cfg.provider,
        &built.text,
        &resp,
        tx,
        &data_dir,
        cfg.save_request,
        cfg.save_response,
    )?;
    if debug {
        log::print_saved_paths(kind.as_str(), &saved);
    }

    match resp.error {
        Some(error) => Err(ForgeError::Provider(error).into()),
        None => Ok(resp.content),
    }
}

/// Print the result, write it where asked, and record history.
fn emit(
    kind: GenerationKind,
    title: &str,
    content: &str,
    out: &OutputArgs,
    cfg: &Config,
) -> Result<()> {
    ux::print_generated(catalog::entry(kind).title, content);
    write_if_requested(kind, content, out)?;
    record_history(kind, title, content, cfg)
}

fn record_history(kind: GenerationKind, title: &str, content: &str, cfg: &Config) -> Result<()> {
    if !cfg.record_history {
        return Ok(());
    }
    let data_dir = store::data_dir(cfg.data_dir.as_deref())?;
    HistoryStore::new(&data_dir).record(kind, title, content)?;
    Ok(())
}

fn read_input(input: &InputArgs) -> Result<String> {
    match (&input.text, &input.file) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        (None, None) => {
            Err(ForgeError::Precondition("provide input text or --file <path>".into()).into())
        }
    }
}

fn option_label(kind: GenerationKind, option_id: &str) -> String {
    catalog::entry(kind)
        .option(option_id)
        .map(|o| o.label.to_string())
        .unwrap_or_else(|| option_id.to_string())
}

fn no_output() -> OutputArgs {
    OutputArgs { out: None, save: false }
}

fn find_starter(
    starters: &'static [catalog::StarterTemplate],
    id: &str,
) -> Result<&'static str> {
    starters
        .iter()
        .find(|t| t.id == id)
        .map(|t| t.content)
        .ok_or_else(|| ForgeError::Precondition(format!("unknown starter '{id}'")).into())
}

/// --save falls through to the kind's default filename.
fn write_if_requested(kind: GenerationKind, content: &str, out: &OutputArgs) -> Result<()> {
    if out.save || out.out.is_some() {
        let written = output::write_artifact(kind, content, out.out.as_deref())?;
        println!("\nwritten to {}", written.display());
    }
    Ok(())
}

fn history_command(action: HistoryAction, cfg: &Config) -> Result<()> {
    let data_dir = store::data_dir(cfg.data_dir.as_deref())?;
    let history = HistoryStore::new(&data_dir);

    match action {
        HistoryAction::List => {
            ux::print_history(&history.load());
            Ok(())
        }
        HistoryAction::Show { id } => {
            let items = history.load();
            let item = items
                .iter()
                .find(|i| i.id == id)
                .ok_or_else(|| ForgeError::Store(format!("no history entry with id {id}")))?;
            ux::print_generated(&item.title, &item.content);
            Ok(())
        }
        HistoryAction::Clear { yes } => {
            if !yes && !ux::confirm("Clear the entire generation history?") {
                println!("Aborted.");
                return Ok(());
            }
            history.clear()?;
            println!("History cleared.");
            Ok(())
        }
    }
}

fn template_command(action: TemplateAction, cfg: &Config) -> Result<()> {
    let data_dir = store::data_dir(cfg.data_dir.as_deref())?;
    let templates = TemplateStore::new(&data_dir);

    match action {
        TemplateAction::List { builtin } => {
            if builtin {
                println!("README starters:");
                for t in catalog::README_STARTERS {
                    println!("  {:<12} {:<12} {}", t.id, t.name, t.description);
                }
                println!(".gitignore starters:");
                for t in catalog::GITIGNORE_STARTERS {
                    println!("  {:<12} {:<12} {}", t.id, t.name, t.description);
                }
                return Ok(());
            }
            let saved = templates.load();
            if saved.is_empty() {
                println!("(no custom templates saved)");
            }
            for t in saved {
                println!("{}  {:<20} [{}] {}", t.id, t.name, t.category, t.description);
            }
            Ok(())
        }
        TemplateAction::Save { name, description, content, tags, category } => {
            let body = fs::read_to_string(&content)
                .with_context(|| format!("failed to read {}", content.display()))?;
            let saved = templates.add(&name, &description, &body, tags, &category)?;
            println!("Saved template {} ({})", saved.name, saved.id);
            Ok(())
        }
        TemplateAction::Update { id, name, description, content, tags, category } => {
            let body = match content {
                Some(path) => Some(
                    fs::read_to_string(&path)
                        .with_context(|| format!("failed to read {}", path.display()))?,
                ),
                None => None,
            };
            let updated = templates.update(
                id,
                TemplateUpdate { name, description, content: body, tags, category },
            )?;
            println!("Updated template {} ({})", updated.name, updated.id);
            Ok(())
        }
        TemplateAction::Delete { id, yes } => {
            if !yes && !ux::confirm("Delete this template?") {
                println!("Aborted.");
                return Ok(());
            }
            templates.delete(id)?;
            println!("Deleted template {id}");
            Ok(())
        }
        TemplateAction::Export { out } => {
            let target = out.unwrap_or_else(|| PathBuf::from(output::TEMPLATE_EXPORT_FILENAME));
            let count = templates.export_to(&target)?;
            println!("Exported {count} template(s) to {}", target.display());
            Ok(())
        }
        TemplateAction::Import { file } => {
            let count = templates.import_from(&file)?;
            println!("Imported {count} template(s)");
            Ok(())
        }
    }
}
