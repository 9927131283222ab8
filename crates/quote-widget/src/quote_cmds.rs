use std::path::Path;

use anyhow::{Context, Result};
use quote_core::{CategoryFilter, OutputFormat, Severity};
use quote_sync::Notifier;
use tracing::info;

use crate::app::App;
use crate::console::print_quotes;

pub(crate) async fn handle_list(app: &App, category: Option<String>) -> Result<()> {
    let store = app.store().lock().await;
    let filter = match category {
        Some(raw) => CategoryFilter::parse(&raw),
        None => store.selected_category(),
    };
    let quotes: Vec<_> = store.quotes().filtered(&filter).collect();
    print_quotes(&quotes, &app.format)
}

pub(crate) async fn handle_random(app: &App) -> Result<()> {
    let store = app.store().lock().await;
    let picked = store.random_quote(&mut rand::thread_rng());
    let quotes: Vec<_> = picked.iter().collect();
    print_quotes(&quotes, &app.format)
}

pub(crate) async fn handle_last(app: &App) -> Result<()> {
    let last = app.store().lock().await.last_viewed();
    match (&app.format, last) {
        (OutputFormat::Json, last) => println!("{}", serde_json::to_string_pretty(&last)?),
        (OutputFormat::Text, Some(quote)) => println!("{quote}"),
        (OutputFormat::Text, None) => println!("No quote viewed in this session yet."),
    }
    Ok(())
}

pub(crate) async fn handle_add(app: &App, text: &str, category: &str) -> Result<()> {
    let quote = app.engine.submit_quote(category, text).await?;
    if matches!(app.format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    }
    Ok(())
}

pub(crate) async fn handle_categories(app: &App) -> Result<()> {
    let store = app.store().lock().await;
    let selected = store.selected_category();
    let categories = store.categories();

    match app.format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "categories": categories,
                "selected": selected.as_str(),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Text => {
            for category in &categories {
                let marker = if category == selected.as_str() { "*" } else { " " };
                println!("{marker} {category}");
            }
        }
    }
    Ok(())
}

pub(crate) async fn handle_filter(app: &App, category: &str) -> Result<()> {
    let filter = CategoryFilter::parse(category);
    app.store().lock().await.set_selected_category(&filter)?;
    info!(%filter, "selected category");
    handle_list(app, None).await
}

pub(crate) async fn handle_export(app: &App, output: &Path) -> Result<()> {
    let json = app.store().lock().await.export_json()?;
    std::fs::write(output, json)
        .with_context(|| format!("Failed to write export: {}", output.display()))?;
    app.notifier.notify(
        &format!("Quotes exported to {}", output.display()),
        Severity::Info,
    );
    Ok(())
}

pub(crate) async fn handle_import(app: &App, path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read import file: {}", path.display()))?;
    let count = app.store().lock().await.import_json(&raw)?;
    info!(count, path = %path.display(), "imported quotes");
    app.notifier
        .notify("Quotes imported successfully!", Severity::Success);
    Ok(())
}
