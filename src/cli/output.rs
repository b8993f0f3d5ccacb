//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the relay-console CLI.

use crate::types::UserIdentity;
use owo_colors::OwoColorize;

/// Output style configuration
#[derive(Debug, Clone, Copy)]
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
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

    /// Print the console banner
    pub fn banner(&self) {
        if self.colored {
            println!(
                "\n   {} {}\n",
                "Relay Console".bright_cyan().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            println!("\n   Relay Console v{}\n", env!("CARGO_PKG_VERSION"));
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

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Print a hint/tip message
    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "»".dimmed(), message.dimmed().italic());
        } else {
            println!("\n  [HINT] {}", message);
        }
    }

    /// Print a block of pre-formatted text (e.g. JSON), indented
    pub fn block(&self, text: &str) {
        for line in text.lines() {
            println!("    {}", line);
        }
    }

    /// Print every identity field, marking absent claims
    pub fn identity(&self, identity: &UserIdentity) {
        let show = |value: Option<&str>| value.unwrap_or("-").to_string();
        let show_ts = |value: Option<i64>| value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());

        self.kv("id", &show(identity.id.as_deref()));
        self.kv("accountOwnerId", &show(identity.account_owner_id.as_deref()));
        self.kv("role", &show(identity.role.as_deref()));
        self.kv("userName", &show(identity.user_name.as_deref()));
        self.kv("email", &show(identity.email.as_deref()));
        self.kv("name", &show(identity.display_name()));
        self.kv("iat", &show_ts(identity.iat));
        self.kv("exp", &show_ts(identity.exp));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_default() {
        let output = Output::default();
        assert!(output.colored);
        assert!(!Output::no_color().colored);
    }

    #[test]
    fn test_output_methods_no_panic() {
        // Smoke test - ensure none of the output methods panic
        let output = Output::no_color();

        output.banner();
        output.success("test success");
        output.info("test info");
        output.warning("test warning");
        output.error("test error");
        output.header("Test Header");
        output.kv("key", "value");
        output.hint("hint message");
        output.block("{\n  \"a\": 1\n}");
        output.identity(&UserIdentity::default());
    }

    #[test]
    fn test_output_methods_colored_no_panic() {
        let output = Output::new();

        output.banner();
        output.success("test success");
        output.warning("test warning");
        output.identity(&UserIdentity {
            user_name: Some("alice".to_string()),
            exp: Some(1640998800),
            ..Default::default()
        });
    }
}
