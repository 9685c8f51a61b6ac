use owo_colors::OwoColorize;
use postcraft_core::{ArticleData, Tone};

use crate::VERSION;

const RULE_WIDTH: usize = 60;

/// Print a styled banner for interactive and verbose mode
pub fn print_banner() {
    eprintln!("\n{} {} {}", "Postcraft".bold().bright_blue(), "v".dimmed(), VERSION.dimmed());
    eprintln!("{}", "Turn articles into LinkedIn posts\n".dimmed());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Print a generated post.
///
/// The rules go to stderr so stdout carries only the post text.
pub fn print_post(text: &str) {
    eprintln!("{}", "─".repeat(RULE_WIDTH).dimmed());
    println!("{}", text);
    eprintln!("{}", "─".repeat(RULE_WIDTH).dimmed());
}

/// Print the numbered tone menu
pub fn print_tone_menu(current: Tone) {
    for (i, tone) in Tone::ALL.iter().enumerate() {
        let marker = if *tone == current { "*" } else { " " };
        eprintln!("  {} {} {}", marker.bright_green(), format!("{}.", i + 1).dimmed(), tone.as_str().bright_white());
    }
}

/// Print what was extracted from an article
pub fn print_article_details(article: &ArticleData) {
    eprintln!("\n{}", "═".repeat(RULE_WIDTH).dimmed());
    eprintln!("{}", "Article".bold().cyan());
    eprintln!("{}", "═".repeat(RULE_WIDTH).dimmed());
    eprintln!("  {} {}", "Title:".dimmed(), article.title.bright_white());
    eprintln!("  {} {}", "Author:".dimmed(), article.author.bright_white());
    eprintln!("  {} {}", "Date:".dimmed(), article.date.bright_white());
    eprintln!("  {} {}", "Summary:".dimmed(), article.summary.bright_white());
    eprintln!("  {} {}\n", "Content:".dimmed(), format_size(article.content.len()).bright_white());
}

/// Print timing information with color coding
pub fn print_timing(label: &str, duration: std::time::Duration) {
    let ms = duration.as_secs_f64() * 1000.0;
    let label = format!("{}:", label);

    if ms < 1000.0 {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "fast".dimmed());
    } else if ms < 5000.0 {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "moderate".bright_yellow());
    } else {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "slow".bright_red());
    }
}

/// Format byte size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
