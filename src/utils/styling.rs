//! Terminal styling utilities for the pipeline CLI

use std::path::Path;
use std::time::Duration;

use console::{measure_text_width, style, Emoji};

use crate::pipeline::{MetricsBasis, PipelineConfig};

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static SCALE: Emoji<'_, '_> = Emoji("📏 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
     ___ _____ _   _ ___  ___ _  _ _____ ____  __  __
    / __|_   _| | | |   \| __| \| |_   _|__ / / / /  \
    \__ \ | | | |_| | |) | _|| .` | | |  |_ \/ _ \ () |
    |___/ |_|  \___/|___/|___|_|\_| |_| |___/\___/\__/
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {} {}",
        CHART,
        style("Student performance analytics").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Inner width of the configuration card, between the borders
const CARD_WIDTH: usize = 54;

/// One card line padded by display width, so styling and emoji don't shift
/// the right border
fn card_row(content: &str) -> String {
    let padding = CARD_WIDTH.saturating_sub(measure_text_width(content));
    format!("│{}{}│", content, " ".repeat(padding))
}

/// Print configuration card
pub fn print_config(config: &PipelineConfig) {
    let line = "─".repeat(CARD_WIDTH);

    let basis = match config.basis {
        MetricsBasis::Prepared => "prepared (standardized)",
        MetricsBasis::Raw => "raw (0-20 scale)",
    };

    println!("    ┌{}┐", line);
    println!(
        "    {}",
        card_row(&format!(" {}", style("⚙️  Configuration").cyan().bold()))
    );
    println!("    ├{}┤", line);
    println!(
        "    {}",
        card_row(&format!(
            "  {}Math:       {}",
            FOLDER,
            truncate_path(&config.paths.math, 34)
        ))
    );
    println!(
        "    {}",
        card_row(&format!(
            "  {}Portuguese: {}",
            FOLDER,
            truncate_path(&config.paths.portuguese, 34)
        ))
    );
    println!("    ├{}┤", line);
    println!(
        "    {}",
        card_row(&format!("  {}Metrics basis: {}", SCALE, style(basis).yellow()))
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning to stderr
pub fn print_warning(message: &str) {
    eprintln!("    {} {}", WARN, style(message).yellow());
}

/// Print how long a step took
pub fn print_step_time(elapsed: Duration) {
    println!(
        "    {}",
        style(format!("⏱  {:.2}s", elapsed.as_secs_f64())).dim()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Student360 analysis complete!").green().bold()
    );
    println!();
}

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}
