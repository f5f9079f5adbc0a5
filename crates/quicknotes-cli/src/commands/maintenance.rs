use std::path::PathBuf;
use std::sync::Arc;

use quicknotes_core::clock::SystemClock;
use quicknotes_core::error_log::read_error_log;
use quicknotes_core::maintenance::{error_log_max_age, prune_error_log};
use quicknotes_core::settings::{ensure_settings, load_settings, InstallOutcome};
use quicknotes_core::storage::{FileStore, KeyValueStore};
use quicknotes_core::VERSION;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::{InitArgs, JsonArgs};
use crate::config::{default_store_path, expand_tilde, write_config, QuickNotesConfig};
use crate::ui::format::{format_bytes, format_millis};
use crate::ui::{kv, OutputMode};

pub async fn handle_init(ctx: &AppContext<'_>, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = match &args.config_path {
        Some(path) => PathBuf::from(path),
        None => resolve_config_path()?,
    };
    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {}. Use --force to overwrite.",
            config_path.display()
        ));
    }

    let store_path = match args.path.clone().or_else(|| ctx.cli().store.clone()) {
        Some(path) => expand_tilde(&path)?,
        None => default_store_path()?,
    };
    write_config(&config_path, &QuickNotesConfig::new(store_path.clone()))?;

    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&store_path));
    let outcome = ensure_settings(store.as_ref(), &SystemClock, VERSION).await?;

    if !ctx.quiet() {
        match outcome {
            InstallOutcome::Installed => {
                println!("Initialized Quick Notes store at {}", store_path.display())
            }
            InstallOutcome::Updated { previous } => println!(
                "Updated store at {} from v{} to v{}",
                store_path.display(),
                previous,
                VERSION
            ),
            InstallOutcome::Unchanged => {
                println!("Store at {} is already initialized", store_path.display())
            }
        }
        println!("Config written to {}", config_path.display());
    }
    Ok(())
}

pub async fn handle_stats(ctx: &AppContext<'_>, args: &JsonArgs) -> anyhow::Result<()> {
    let session = ctx.open()?;
    let stats = session.notes.get_stats().await;
    let settings = load_settings(session.kv.as_ref()).await.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "failed to read settings");
        None
    });
    let max_notes = session.notes.config().max_notes;

    if args.json {
        let output = serde_json::json!({
            "notesCount": stats.notes_count,
            "maxNotes": max_notes,
            "storageBytesUsed": stats.storage_bytes_used,
            "version": VERSION,
            "installedVersion": settings.as_ref().map(|s| s.version.clone()),
            "installedAt": settings.as_ref().map(|s| s.installed_at),
            "path": session.path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let mode = OutputMode::from_env(false, None);
    println!("{}", kv(mode, "Path", &session.path.display().to_string()));
    println!(
        "{}",
        kv(mode, "Notes", &format!("{} / {}", stats.notes_count, max_notes))
    );
    println!(
        "{}",
        kv(
            mode,
            "Storage",
            &format_bytes(stats.storage_bytes_used as u64)
        )
    );
    println!("{}", kv(mode, "Version", VERSION));
    if let Some(settings) = settings {
        println!(
            "{}",
            kv(
                mode,
                "Installed",
                &format_millis(settings.installed_at, mode.is_pretty())
            )
        );
    }
    Ok(())
}

pub async fn handle_errors(ctx: &AppContext<'_>, args: &JsonArgs) -> anyhow::Result<()> {
    let session = ctx.open()?;
    let entries = read_error_log(session.kv.as_ref()).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        if !ctx.quiet() {
            println!("No errors logged.");
        }
        return Ok(());
    }
    for entry in entries.iter().rev() {
        let action = entry.action.as_deref().unwrap_or("-");
        match &entry.note_id {
            Some(note_id) => println!(
                "{} {} [{}] {}",
                entry.timestamp.to_rfc3339(),
                action,
                note_id,
                entry.error_message
            ),
            None => println!(
                "{} {} {}",
                entry.timestamp.to_rfc3339(),
                action,
                entry.error_message
            ),
        }
    }
    Ok(())
}

pub async fn handle_cleanup(ctx: &AppContext<'_>) -> anyhow::Result<()> {
    let session = ctx.open()?;
    let removed = prune_error_log(
        session.kv.as_ref(),
        session.clock.as_ref(),
        error_log_max_age(),
    )
    .await?;
    if !ctx.quiet() {
        println!("Removed {} old error log entries", removed);
    }
    Ok(())
}
