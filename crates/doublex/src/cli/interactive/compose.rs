//! Guided compose flow.
//!
//! Walks the user through: first folder → second folder (optional) →
//! output folder → resize → greyscale → confirmation → run.
//! Builds a `ComposeArgs` and delegates to `cli::compose::execute()`.

use console::Style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use doublex_core::config::expand_path;
use doublex_core::{Config, FileDiscovery};
use std::path::PathBuf;

use super::theme::doublex_theme;
use crate::cli::compose::{execute as run_compose, ComposeArgs};

/// Walk the user through one compose run.
pub async fn guided_compose(config: &Config) -> anyhow::Result<()> {
    let theme = doublex_theme();
    let discovery = FileDiscovery::new(config.pairing.clone());

    // ── Step 1: First folder, must contain eligible images ─────────────────

    let (dir1, count1) = loop {
        let Some(path) = prompt_required_dir(&theme, "First image folder")? else {
            return Ok(());
        };

        let found = discovery.discover(&path)?;
        if found.is_empty() {
            warn("No eligible images found in that folder.");
            continue;
        }
        break (path, found.len());
    };
    note(&format!("Found {count1} image(s)"));

    // ── Step 2: Second folder, empty to split the first ─────────────────────

    let dir2 = loop {
        let Some(path) =
            prompt_optional_dir(&theme, "Second image folder (empty to split the first)")?
        else {
            return Ok(());
        };
        let Some(path) = path else { break None };

        let found = discovery.discover(&path)?;
        if found.is_empty() {
            warn("No eligible images found in that folder.");
            continue;
        }
        note(&format!(
            "Found {} image(s) → {} pair(s)",
            found.len(),
            found.len().min(count1)
        ));
        break Some(path);
    };
    if dir2.is_none() {
        note(&format!("Splitting into halves → {} pair(s)", count1 / 2));
    }

    // ── Step 3: Output folder ───────────────────────────────────────────────

    let Some(output) = prompt_required_dir(&theme, "Output folder")? else {
        return Ok(());
    };

    // ── Step 4: Flags ───────────────────────────────────────────────────────

    let Some(resize) = Confirm::with_theme(&theme)
        .with_prompt("Downsample both images before blending?")
        .default(false)
        .interact_opt()?
    else {
        return Ok(());
    };

    let Some(greyscale) = Confirm::with_theme(&theme)
        .with_prompt("Convert to greyscale?")
        .default(false)
        .interact_opt()?
    else {
        return Ok(());
    };

    // ── Step 5: Confirm and run ─────────────────────────────────────────────

    let go = Confirm::with_theme(&theme)
        .with_prompt("Start?")
        .default(true)
        .interact_opt()?;
    if go != Some(true) {
        return Ok(());
    }

    let args = ComposeArgs {
        dir1,
        with: dir2,
        output,
        resize,
        greyscale,
        ..ComposeArgs::default()
    };
    run_compose(args, config).await
}

/// Ask until the answer names an existing directory. `None` on interrupt.
fn prompt_required_dir(theme: &ColorfulTheme, prompt: &str) -> anyhow::Result<Option<PathBuf>> {
    loop {
        let Some(raw) = ask(theme, prompt, false)? else {
            return Ok(None);
        };
        if let Some(path) = existing_dir(&raw) {
            return Ok(Some(path));
        }
    }
}

/// Like `prompt_required_dir`, but an empty answer yields `Some(None)`.
fn prompt_optional_dir(
    theme: &ColorfulTheme,
    prompt: &str,
) -> anyhow::Result<Option<Option<PathBuf>>> {
    loop {
        let Some(raw) = ask(theme, prompt, true)? else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(Some(None));
        }
        if let Some(path) = existing_dir(&raw) {
            return Ok(Some(Some(path)));
        }
    }
}

fn ask(theme: &ColorfulTheme, prompt: &str, allow_empty: bool) -> anyhow::Result<Option<String>> {
    super::handle_interrupt(
        Input::<String>::with_theme(theme)
            .with_prompt(prompt)
            .allow_empty(allow_empty)
            .interact_text(),
    )
}

fn existing_dir(raw: &str) -> Option<PathBuf> {
    let path = expand_path(raw.trim());
    if path.is_dir() {
        Some(path)
    } else {
        warn(&format!("Folder not found: {}", path.display()));
        None
    }
}

fn warn(message: &str) {
    let style = Style::new().for_stderr().yellow();
    eprintln!("  {}", style.apply_to(message));
}

fn note(message: &str) {
    let style = Style::new().for_stderr().dim();
    eprintln!("  {}", style.apply_to(message));
}
