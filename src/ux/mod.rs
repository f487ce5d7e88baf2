use chrono::DateTime;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;

use crate::store::HistoryItem;
use crate::wire::ProjectAnalysis;

/// Spinner shown while a backend call is in flight. The caller holds the
/// handle and finishes it when the response lands.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn confirm(prompt: &str) -> bool {
    print!("{} [y/N]: ", prompt);
    let _ = io::stdout().flush();
    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        let ans = s.trim().to_lowercase();
        ans == "y" || ans == "yes"
    } else {
        false
    }
}

pub fn print_generated(title: &str, content: &str) {
    println!("\n{}", format!("=== {title} ===").bold());
    println!("{content}");
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message);
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message);
}

pub fn print_history(items: &[HistoryItem]) {
    if items.is_empty() {
        println!("(history is empty)");
        return;
    }
    println!("\n{}", "=== Generation History ===".bold());
    for (i, item) in items.iter().enumerate() {
        let when = DateTime::from_timestamp_millis(item.timestamp)
            .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "unknown time".into());
        println!(
            "{}. {}  {}  {}  {}",
            i + 1,
            format!("[{}]", item.kind).cyan().bold(),
            item.title.bold(),
            when.dimmed(),
            item.id.to_string().dimmed(),
        );
    }
    println!();
}

pub fn print_analysis(analysis: &ProjectAnalysis) {
    println!("\n{}", "=== Project Analysis ===".bold());

    println!("\n{}", "Dependencies".bold());
    if analysis.dependencies.is_empty() {
        println!("  (none detected)");
    }
    for dep in &analysis.dependencies {
        match &dep.vulnerabilities {
            Some(vulns) if !vulns.is_empty() => {
                println!(
                    "  {} {}@{}  vulnerabilities: {}",
                    "!".red().bold(),
                    dep.name,
                    dep.version,
                    vulns.join(", ").red()
                );
            }
            _ => println!("  {} {}@{}", "✓".green(), dep.name, dep.version),
        }
    }

    println!("\n{}", "License recommendations".bold());
    for lic in &analysis.licenses {
        println!("  {}  compatible with: {}", lic.name.bold(), lic.compatibility.join(", "));
    }

    println!("\n{}", "Recommendations".bold());
    print_recommendation_list(".gitignore patterns", &analysis.recommendations.gitignore);
    print_recommendation_list("README sections", &analysis.recommendations.readme);
    print_recommendation_list("License", &analysis.recommendations.license);
    println!();
}

fn print_recommendation_list(label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("  {}", label.cyan());
    for item in items {
        println!("   - {item}");
    }
}
