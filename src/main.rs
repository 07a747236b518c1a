//! Seokit - SEO settings engine CLI.

use anyhow::{Result, bail};
use clap::Parser;
use colored::Colorize;
use seokit::{
    breadcrumb::build_hierarchy,
    cli::{Cli, Commands},
    config::SeoConfig,
    log,
    logger::ellipsize,
    pipeline::{self, Pipeline},
    resolve::{ResolutionStatus, Resolved, effective_values},
    schema::{check_cardinality, entries_from_value},
    settings::{
        Scope, fields,
        store::{FileStore, ScopeStore},
    },
};
use std::path::Path;

/// Widest value shown by `status` before it is shortened.
const STATUS_VALUE_WIDTH: usize = 60;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let store = FileStore::new(&config.store.settings);

    match &cli.command {
        Commands::Render { all: true, .. } => render_all(&config, &store),
        Commands::Render { scope, .. } => render(&config, &store, &Scope::parse(scope)),
        Commands::Status { scope } => status(&store, &Scope::parse(scope)),
        Commands::Check => check(&store),
        Commands::Breadcrumbs { id } => breadcrumbs(&config, &store, id),
        Commands::Set { scope, key, value } => set(&store, &Scope::parse(scope), key, value),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SeoConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SeoConfig::from_path(&config_path)?
    } else {
        log!("config"; "`{}` not found, using defaults", config_path.display());
        SeoConfig::default()
    };
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}

/// Print the three blocks of one scope to stdout.
fn render(config: &SeoConfig, store: &FileStore, scope: &Scope) -> Result<()> {
    let settings = store.snapshot()?;
    let pages = build_hierarchy(&pipeline::load_pages(&config.store.pages)?);
    let blocks = Pipeline::from_config(config).render(&settings, scope, &pages);

    for (label, block) in [("head", &blocks.head), ("body", &blocks.body), ("footer", &blocks.footer)] {
        println!("<!-- seokit:{label} -->");
        if !block.is_empty() {
            println!("{block}");
        }
    }
    Ok(())
}

/// Render every scope in parallel and write the blocks to the output directory.
fn render_all(config: &SeoConfig, store: &FileStore) -> Result<()> {
    let settings = store.snapshot()?;
    let pages = build_hierarchy(&pipeline::load_pages(&config.store.pages)?);
    let scopes = pipeline::all_scopes(&settings, &pages);

    log!("render"; "rendering {} scopes...", scopes.len());
    let rendered = Pipeline::from_config(config).render_all(&settings, &scopes, &pages);
    for (scope, blocks) in &rendered {
        pipeline::write_blocks(&config.output.dir, scope, blocks)?;
    }
    log!("render"; "wrote {} scopes to {}", rendered.len(), config.output.dir.display());
    Ok(())
}

/// Field → effective value → origin table for one scope.
fn status(store: &FileStore, scope: &Scope) -> Result<()> {
    let settings = store.snapshot()?;
    let values = effective_values(&settings, scope);
    let width = values.iter().map(|(key, _)| key.len()).max().unwrap_or(0);

    for (key, resolved) in values.iter() {
        println!("{key:<width$}  {}  {}", display_value(resolved), badge(resolved.status));
    }

    let entries = pipeline::entries_for(&settings, scope);
    println!("\n{} schema entries apply to `{scope}`", entries.len());
    Ok(())
}

fn display_value(resolved: &Resolved) -> String {
    let text = match &resolved.value {
        serde_json::Value::String(s) => s.replace('\n', "⏎"),
        other => other.to_string(),
    };
    ellipsize(&text, STATUS_VALUE_WIDTH)
}

fn badge(status: ResolutionStatus) -> String {
    let label = format!("[{}]", status.badge());
    match status {
        ResolutionStatus::Unique => label.green().to_string(),
        ResolutionStatus::Inherited => label.cyan().to_string(),
        ResolutionStatus::UsingGlobal => label.blue().to_string(),
        ResolutionStatus::Global => label.yellow().to_string(),
        ResolutionStatus::Empty => label.dimmed().to_string(),
    }
}

/// Report cardinality violations; fails when any scope has one.
fn check(store: &FileStore) -> Result<()> {
    let settings = store.snapshot()?;
    let report = pipeline::cardinality_report(&settings);
    if report.is_empty() {
        log!("check"; "no cardinality violations");
        return Ok(());
    }
    for (scope, violation) in &report {
        log!("check"; "{scope}: {violation}");
    }
    bail!("{} cardinality violation(s) found", report.len())
}

/// Print the breadcrumb trail of a page.
fn breadcrumbs(config: &SeoConfig, store: &FileStore, id: &str) -> Result<()> {
    let settings = store.snapshot()?;
    let pages = build_hierarchy(&pipeline::load_pages(&config.store.pages)?);
    let crumbs = Pipeline::from_config(config).crumbs(&settings, &Scope::parse(id), &pages);

    if crumbs.is_empty() {
        log!("breadcrumbs"; "no trail for `{id}`");
        return Ok(());
    }
    for (depth, crumb) in crumbs.iter().enumerate() {
        println!("{}{} {}", "  ".repeat(depth), crumb.name, crumb.url.dimmed());
    }
    Ok(())
}

/// Set one field and write the scope back as a whole.
fn set(store: &FileStore, scope: &Scope, key: &str, value: &str) -> Result<()> {
    let value = pipeline::parse_value(value);

    if key == fields::SCHEMA_ENTRIES
        && let Some(violation) = check_cardinality(&entries_from_value(&value)).first()
    {
        bail!("{violation}");
    }
    if !scope.is_global() && fields::is_global_only(key) {
        log!("set"; "`{key}` is global-only, the page value will be ignored");
    }

    let mut record = store.snapshot()?.scope(scope).cloned().unwrap_or_default();
    record.insert(key.to_owned(), value);
    store.replace_scope(scope, record)?;

    log!("set"; "{scope}.{key} saved to {}", store.path().display());
    Ok(())
}
