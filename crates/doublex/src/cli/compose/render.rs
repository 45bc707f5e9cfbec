//! Foreground side of a compose run: progress display and final summary.

use doublex_core::{ProgressEvent, ProgressMode, RunConfiguration, RunHandle, RunSummary};

/// Drain the worker's progress stream, then wait for its result.
pub async fn drive(mut handle: RunHandle, mode: ProgressMode) -> anyhow::Result<RunSummary> {
    match mode {
        ProgressMode::Percent => {
            let progress = create_progress_bar();
            while let Some(event) = handle.next_event().await {
                if let Some(percent) = event.percent() {
                    progress.set_position(percent as u64);
                }
                match &event {
                    ProgressEvent::PairCompleted { output, .. } => {
                        if let Some(name) = output.file_name() {
                            progress.set_message(name.to_string_lossy().into_owned());
                        }
                    }
                    ProgressEvent::Failed { .. } => progress.abandon(),
                    _ => {}
                }
            }
            progress.finish_and_clear();
        }
        ProgressMode::Verbose => {
            while let Some(event) = handle.next_event().await {
                eprintln!("  {}", status_line(&event));
            }
        }
    }

    Ok(handle.finish().await?)
}

fn status_line(event: &ProgressEvent) -> String {
    match event.percent() {
        Some(percent) if !event.is_terminal() => format!("{event} ({percent}%)"),
        _ => event.to_string(),
    }
}

/// Create a 0-100 progress bar for a compose run.
fn create_progress_bar() -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
            .unwrap()
            .progress_chars("##-"),
    );
    pb.set_message("starting...");
    pb
}

/// Print a formatted summary table after the run.
pub fn print_summary(summary: &RunSummary, run: &RunConfiguration) {
    let elapsed = summary.elapsed.as_secs_f64();
    let rate = if elapsed > 0.0 {
        summary.written() as f64 / elapsed
    } else {
        0.0
    };

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("          Operation completed");
    eprintln!("  ====================================");
    eprintln!("    Written:      {:>8}", summary.written());
    if summary.dropped > 0 {
        eprintln!("    Unpaired:     {:>8}", summary.dropped);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Resize:       {:>8}", on_off(run.resize));
    eprintln!("    Greyscale:    {:>8}", on_off(run.convert_greyscale));
    eprintln!("    Duration:     {:>7.1}s", elapsed);
    eprintln!("    Rate:         {:>7.1} img/sec", rate);
    eprintln!("  ====================================");
    eprintln!("    Output: {}", run.output_dir.display());
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doublex_core::Stage;
    use std::path::PathBuf;

    #[test]
    fn status_line_appends_percent_to_pair_events() {
        let event = ProgressEvent::PairCompleted {
            index: 1,
            total: 2,
            output: PathBuf::from("/out/a_b.jpg"),
        };
        assert_eq!(status_line(&event), "[2/2] Wrote /out/a_b.jpg (100%)");
    }

    #[test]
    fn status_line_plain_for_stages_and_completion() {
        let stage = ProgressEvent::Stage {
            index: 0,
            total: 3,
            stage: Stage::Resize,
        };
        assert_eq!(status_line(&stage), "[1/3] Resizing");
        assert_eq!(
            status_line(&ProgressEvent::Completed { written: 3 }),
            "Operation completed: 3 image(s) written"
        );
    }

    #[test]
    fn on_off_labels() {
        assert_eq!(on_off(true), "on");
        assert_eq!(on_off(false), "off");
    }
}
