use std::io::IsTerminal;

use crate::app::AppContext;
use crate::cli::{AddArgs, ClearArgs, DeleteArgs, EditArgs, ListArgs, SearchArgs, ShowArgs};
use crate::helpers::{parse_output_format, read_content, resolve_note_id};
use crate::output::{note_json, print_note, print_note_list};
use crate::ui::OutputMode;

fn resolve_mode(json: bool, format: Option<&str>) -> anyhow::Result<OutputMode> {
    let parsed = parse_output_format(format)?;
    if json && parsed.is_some() {
        return Err(anyhow::anyhow!("--format cannot be used with --json"));
    }
    Ok(OutputMode::from_env(json, format))
}

pub async fn handle_add(ctx: &AppContext<'_>, args: &AddArgs) -> anyhow::Result<()> {
    let content = read_content(args.content.clone())?;
    let session = ctx.open()?;
    let note = session.notes.save(&content).await?;
    if !ctx.quiet() {
        println!("Added note {}", note.id);
    }
    Ok(())
}

pub async fn handle_list(ctx: &AppContext<'_>, args: &ListArgs) -> anyhow::Result<()> {
    let mode = resolve_mode(args.json, args.format.as_deref())?;
    let session = ctx.open()?;
    let mut notes = session.notes.get_all().await;
    if let Some(limit) = args.limit {
        notes.truncate(limit);
    }
    print_note_list(&notes, mode, ctx.quiet())
}

pub async fn handle_search(ctx: &AppContext<'_>, args: &SearchArgs) -> anyhow::Result<()> {
    let mode = resolve_mode(args.json, args.format.as_deref())?;
    let session = ctx.open()?;
    let mut notes = session.notes.search(&args.query).await;
    if let Some(limit) = args.limit {
        notes.truncate(limit);
    }
    print_note_list(&notes, mode, ctx.quiet())
}

pub async fn handle_show(ctx: &AppContext<'_>, args: &ShowArgs) -> anyhow::Result<()> {
    let session = ctx.open()?;
    let notes = session.notes.try_get_all().await?;
    let id = resolve_note_id(&notes, &args.id)?;
    let note = notes
        .into_iter()
        .find(|note| note.id == id)
        .ok_or_else(|| anyhow::anyhow!("Note not found: {}", id))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&note_json(&note))?);
    } else {
        print_note(&note, ctx.quiet());
    }
    Ok(())
}

pub async fn handle_edit(ctx: &AppContext<'_>, args: &EditArgs) -> anyhow::Result<()> {
    let session = ctx.open()?;
    let notes = session.notes.try_get_all().await?;
    let id = resolve_note_id(&notes, &args.id)?;
    let content = read_content(args.content.clone())?;

    let updated = session
        .notes
        .update(&id, &content)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Note not found: {}", id))?;
    if !ctx.quiet() {
        println!("Edited note {}", updated.id);
    }
    Ok(())
}

pub async fn handle_delete(ctx: &AppContext<'_>, args: &DeleteArgs) -> anyhow::Result<()> {
    let session = ctx.open()?;
    let notes = session.notes.try_get_all().await?;
    let id = resolve_note_id(&notes, &args.id)?;

    if !session.notes.delete(&id).await? {
        return Err(anyhow::anyhow!("Note not found: {}", id));
    }
    if !ctx.quiet() {
        println!("Deleted note {}", id);
    }
    Ok(())
}

pub async fn handle_clear(ctx: &AppContext<'_>, args: &ClearArgs) -> anyhow::Result<()> {
    let session = ctx.open()?;
    if !args.yes {
        if !std::io::stdin().is_terminal() {
            return Err(anyhow::anyhow!(
                "Refusing to delete all notes without confirmation. Pass --yes."
            ));
        }
        let count = session.notes.get_all().await.len();
        let proceed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete all {} notes?", count))
            .default(false)
            .interact()?;
        if !proceed {
            return Err(anyhow::anyhow!("Clear cancelled"));
        }
    }

    session.notes.clear_all().await?;
    if !ctx.quiet() {
        println!("All notes cleared");
    }
    Ok(())
}
