//! Interactive mode: a guided experience for a bare `doublex` invocation.
//!
//! When `doublex` is invoked with no subcommand on a TTY, this module asks
//! for the same inputs as `doublex compose` and delegates to it.

pub mod compose;
pub mod theme;

use console::Style;
use dialoguer::Select;
use doublex_core::Config;

/// Convert a dialoguer result into `Ok(Some(value))` on success, `Ok(None)` on
/// interrupt (Ctrl+C / terminal disconnect), and `Err` for other I/O failures.
fn handle_interrupt<T>(result: dialoguer::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Main menu options presented to the user.
const MENU_ITEMS: &[&str] = &["Create double exposures", "Show configuration", "Exit"];

/// Entry point for interactive mode.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    theme::print_banner();

    let theme = theme::doublex_theme();

    loop {
        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(MENU_ITEMS)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(0) => {
                if let Err(e) = compose::guided_compose(config).await {
                    let error = Style::new().for_stderr().red();
                    eprintln!("  {}", error.apply_to(format!("Error: {e:#}")));
                }
            }
            Some(1) => show_config(config)?,
            Some(2) | None => break,
            _ => unreachable!(),
        }
    }

    Ok(())
}

fn show_config(config: &Config) -> anyhow::Result<()> {
    let dim = Style::new().for_stderr().dim();
    eprintln!(
        "  {}",
        dim.apply_to(format!("# {}", Config::default_path().display()))
    );
    for line in config.to_toml()?.lines() {
        eprintln!("  {line}");
    }
    eprintln!();
    Ok(())
}
