//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the metchat CLI.

use metchat::types::WeatherReport;
use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the startup banner
    pub fn banner(&self) {
        if self.colored {
            println!(
                "\n   {} {}\n",
                "metchat".bright_cyan().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            println!("\n   metchat v{}\n", env!("CARGO_PKG_VERSION"));
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  {}", title);
            println!("  {}", "-".repeat(title.len()));
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {:<16} {}", format!("{}:", key).dimmed(), value.bright_white());
        } else {
            println!("    {:<16} {}", format!("{}:", key), value);
        }
    }

    /// Print a forecast lookup result
    pub fn weather_report(&self, report: &WeatherReport) {
        self.header(&format!("Weather in {}", report.city));
        self.kv("Conditions", &report.description);
        self.kv("Temperature", &format!("{}°C", report.temperature_celsius));
        self.kv(
            "Precipitation",
            &format!("{}% chance", report.precipitation_probability),
        );
        if !report.period_label.is_empty() {
            self.kv("Period", &report.period_label);
        }
        println!();
    }
}
