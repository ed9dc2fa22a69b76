use anyhow::Result;
use clap::ValueEnum;
use colored::{Color, Colorize};
use comfy_table::{Attribute, Cell, Color as TableColor, Table};
use serde::Serialize;

/// Marker for primary-key fields in mapping tables.
pub const PRIMARY_KEY_MARK: &str = "🔑";
/// Marker for entities whose metadata failed to resolve.
pub const FAILED_MARK: &str = "✗";

/// Kind of status line, which fixes its marker and color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tone {
    Success,
    Failure,
    Warning,
    Info,
    Detail,
}

impl Tone {
    fn marker(self) -> &'static str {
        match self {
            Tone::Success => "✓",
            Tone::Failure => FAILED_MARK,
            Tone::Warning => "⚠",
            Tone::Info => "ℹ",
            Tone::Detail => "→",
        }
    }

    fn color(self) -> Color {
        match self {
            Tone::Success => Color::Green,
            Tone::Failure => Color::Red,
            Tone::Warning => Color::Yellow,
            Tone::Info => Color::Blue,
            Tone::Detail => Color::BrightBlack,
        }
    }
}

/// Output format options for CLI commands
#[derive(Clone, Debug, ValueEnum, Default, PartialEq)]
pub enum OutputFormat {
    /// Formatted table output (default)
    #[default]
    Table,
    /// JSON output for scripting
    Json,
    /// Compact single-line output
    Compact,
}

/// Global CLI options that affect output and behavior
#[derive(Clone, Debug, Default)]
pub struct GlobalOptions {
    pub output_format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub no_color: bool,
}

/// Trait for data that can be displayed as a table
pub trait TableDisplay {
    fn to_table(&self, output: &OutputManager) -> Table;
    fn to_compact(&self) -> String;
}

/// Output manager handles formatting and display
pub struct OutputManager {
    pub options: GlobalOptions,
}

impl OutputManager {
    pub fn new(options: GlobalOptions) -> Self {
        Self { options }
    }

    /// Render data according to the configured output format
    pub fn render<T>(&self, data: &T) -> Result<String>
    where
        T: Serialize + TableDisplay,
    {
        Ok(match self.options.output_format {
            OutputFormat::Json => serde_json::to_string_pretty(data)?,
            OutputFormat::Table => data.to_table(self).to_string(),
            OutputFormat::Compact => data.to_compact(),
        })
    }

    /// Display data according to the configured output format
    pub fn display<T>(&self, data: &T) -> Result<()>
    where
        T: Serialize + TableDisplay,
    {
        if self.options.quiet {
            return Ok(());
        }
        println!("{}", self.render(data)?);
        Ok(())
    }

    /// Whether messages meant for humans should be printed
    fn chatty(&self) -> bool {
        !self.options.quiet && self.options.output_format != OutputFormat::Json
    }

    fn decorate(&self, tone: Tone, message: &str) -> String {
        let marker = tone.marker();
        if self.options.no_color {
            format!("{marker} {message}")
        } else {
            format!("{} {}", marker.color(tone.color()), message.color(tone.color()))
        }
    }

    /// Display a success message with color and icon
    pub fn success(&self, message: &str) {
        if self.chatty() {
            println!("{}", self.decorate(Tone::Success, message));
        }
    }

    /// Display an error message with color and icon
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.decorate(Tone::Failure, message));
    }

    /// Display a warning message
    pub fn warning(&self, message: &str) {
        if self.chatty() {
            println!("{}", self.decorate(Tone::Warning, message));
        }
    }

    /// Display info message with color and icon
    pub fn info(&self, message: &str) {
        if self.chatty() {
            println!("{}", self.decorate(Tone::Info, message));
        }
    }

    /// Display verbose information (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.options.verbose && !self.options.quiet {
            eprintln!("{}", self.decorate(Tone::Detail, message));
        }
    }

    /// Display a heading
    pub fn heading(&self, text: &str) {
        if self.chatty() {
            let output = if self.options.no_color {
                format!("\n{text}\n{}", "=".repeat(text.len()))
            } else {
                format!("\n{}", text.color(Color::BrightBlue).bold())
            };
            println!("{output}");
        }
    }

    /// Display a key-value pair
    pub fn key_value(&self, key: &str, value: &str) {
        if self.chatty() {
            let output = if self.options.no_color {
                format!("{key}: {value}")
            } else {
                format!("{}: {}", key.color(Color::BrightCyan).bold(), value.color(Color::White))
            };
            println!("{output}");
        }
    }

    /// Display a bullet list item
    pub fn bullet(&self, text: &str) {
        if self.chatty() {
            let output = if self.options.no_color {
                format!("  • {text}")
            } else {
                format!("  {} {text}", "•".color(Tone::Detail.color()))
            };
            println!("{output}");
        }
    }

    /// Create a themed table with a header row
    pub fn create_table(&self, headers: &[&str]) -> Table {
        let mut table = Table::new();

        if !self.options.no_color {
            table.load_preset(comfy_table::presets::UTF8_FULL_CONDENSED);
        } else {
            table.load_preset(comfy_table::presets::ASCII_FULL);
        }

        let header_cells: Vec<Cell> = headers
            .iter()
            .map(|h| {
                let cell = Cell::new(h).add_attribute(Attribute::Bold);
                if self.options.no_color {
                    cell
                } else {
                    cell.fg(TableColor::Cyan)
                }
            })
            .collect();
        table.set_header(header_cells);

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    impl TableDisplay for TestData {
        fn to_table(&self, output: &OutputManager) -> Table {
            let mut table = output.create_table(&["Name", "Value"]);
            table.add_row(vec![Cell::new(&self.name), Cell::new(self.value.to_string())]);
            table
        }

        fn to_compact(&self) -> String {
            format!("{}={}", self.name, self.value)
        }
    }

    fn data() -> TestData {
        TestData {
            name: "test".to_string(),
            value: 42,
        }
    }

    #[test]
    fn test_render_json() {
        let manager = OutputManager::new(GlobalOptions {
            output_format: OutputFormat::Json,
            ..Default::default()
        });
        let rendered = manager.render(&data()).unwrap();
        assert!(rendered.contains("\"value\": 42"));
    }

    #[test]
    fn test_render_compact() {
        let manager = OutputManager::new(GlobalOptions {
            output_format: OutputFormat::Compact,
            ..Default::default()
        });
        assert_eq!(manager.render(&data()).unwrap(), "test=42");
    }

    #[test]
    fn test_render_table() {
        let manager = OutputManager::new(GlobalOptions {
            no_color: true,
            ..Default::default()
        });
        let rendered = manager.render(&data()).unwrap();
        assert!(rendered.contains("Name"));
        assert!(rendered.contains("42"));
    }

    #[test]
    fn test_plain_status_lines() {
        let manager = OutputManager::new(GlobalOptions {
            no_color: true,
            ..Default::default()
        });
        assert_eq!(manager.decorate(Tone::Failure, "unknown serializer"), "✗ unknown serializer");
        assert_eq!(manager.decorate(Tone::Detail, "scanning"), "→ scanning");
    }

    #[test]
    fn test_output_manager_quiet() {
        let manager = OutputManager::new(GlobalOptions {
            quiet: true,
            ..Default::default()
        });
        assert!(manager.display(&data()).is_ok());
    }
}
