//! Output formatting

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Parse the `default_format` config value; unknown names are ignored
    pub fn from_config(value: Option<&str>) -> Option<Self> {
        value.and_then(|v| Self::from_str(v, true).ok())
    }

    pub fn render<T: Serialize>(&self, data: &T) -> String {
        match self {
            OutputFormat::Yaml => serde_yaml::to_string(data).unwrap_or_default(),
            // Arbitrary JSON has no fixed columns, so tables fall back to JSON.
            OutputFormat::Json | OutputFormat::Table => {
                serde_json::to_string_pretty(data).unwrap_or_default()
            }
        }
    }

    pub fn print<T: Serialize>(&self, data: &T) {
        println!("{}", self.render(data));
    }

    /// Like `print`, but tables get real columns
    pub fn print_rows<T: Serialize + Tabled>(&self, rows: &[T]) {
        match self {
            OutputFormat::Table if rows.is_empty() => println!("{}", "(none)".dimmed()),
            OutputFormat::Table => println!("{}", Table::new(rows)),
            _ => self.print(&rows),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_from_config() {
        assert_eq!(OutputFormat::from_config(Some("JSON")), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_config(Some("yaml")), Some(OutputFormat::Yaml));
        assert_eq!(OutputFormat::from_config(Some("xml")), None);
        assert_eq!(OutputFormat::from_config(None), None);
    }

    #[test]
    fn test_render() {
        let data = json!({ "id": 7 });
        assert_eq!(OutputFormat::Json.render(&data), "{\n  \"id\": 7\n}");
        assert_eq!(OutputFormat::Yaml.render(&data), "id: 7\n");
    }
}
