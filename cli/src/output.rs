//! Output formatting

use clap::ValueEnum;
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Effective format for this invocation: an explicit `--format` wins,
    /// then the configured `default_format`, then table. An unparseable
    /// configured value falls through to table.
    pub fn resolve(flag: Option<OutputFormat>, configured: Option<&str>) -> OutputFormat {
        flag.or_else(|| configured.and_then(|s| OutputFormat::from_str(s, true).ok()))
            .unwrap_or(OutputFormat::Table)
    }

    /// Print a single record. Table format falls back to pretty JSON since
    /// detail records nest.
    pub fn print<T: Serialize>(&self, data: &T) {
        match self {
            OutputFormat::Json | OutputFormat::Table => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Yaml => {
                println!("{}", serde_yaml::to_string(data).unwrap_or_default());
            }
        }
    }

    /// Print a list of records, as a real table when asked for one.
    pub fn print_rows<T: Serialize + Tabled>(&self, rows: &[T]) {
        match self {
            OutputFormat::Table => {
                println!("{}", Table::new(rows));
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&rows).unwrap_or_default());
            }
            OutputFormat::Yaml => {
                println!("{}", serde_yaml::to_string(&rows).unwrap_or_default());
            }
        }
    }

    /// Print a plain string list.
    pub fn print_names(&self, names: &[String]) {
        match self {
            OutputFormat::Table => {
                for name in names {
                    println!("{}", name);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(names).unwrap_or_default());
            }
            OutputFormat::Yaml => {
                println!("{}", serde_yaml::to_string(names).unwrap_or_default());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flag_beats_configured_default() {
        let format = OutputFormat::resolve(Some(OutputFormat::Yaml), Some("json"));
        assert_eq!(format, OutputFormat::Yaml);
    }

    #[test]
    fn configured_default_applies_without_a_flag() {
        assert_eq!(
            OutputFormat::resolve(None, Some("json")),
            OutputFormat::Json
        );
        assert_eq!(
            OutputFormat::resolve(None, Some("YAML")),
            OutputFormat::Yaml
        );
    }

    #[test]
    fn table_is_the_fallback() {
        assert_eq!(OutputFormat::resolve(None, None), OutputFormat::Table);
        assert_eq!(
            OutputFormat::resolve(None, Some("csv")),
            OutputFormat::Table
        );
    }
}
