use crate::utils::errors::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Display;

/// How command results are rendered on stdout
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    #[default]
    Table,
    Json,
    Yaml,
}

/// Output format configuration
#[derive(Clone, Debug)]
pub struct OutputFormat {
    pub raw: bool,
    pub mode: OutputMode,
}

impl OutputFormat {
    pub fn new(raw: bool, mode: OutputMode) -> Self {
        Self { raw, mode }
    }

    /// Whether results should be emitted as a serialized document rather than a table
    pub fn is_structured(&self) -> bool {
        self.mode != OutputMode::Table
    }

    /// Serialize a value as JSON or YAML; table mode falls back to pretty JSON
    pub fn render_document<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        match self.mode {
            OutputMode::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputMode::Json | OutputMode::Table => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    pub fn print_document<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let rendered = self.render_document(value)?;
        println!("{}", rendered.trim_end());
        Ok(())
    }

    /// Print tabular data - either raw (tab-separated) or formatted (column-aligned)
    pub fn print_table<T>(&self, data: &[Vec<T>])
    where
        T: Display + AsRef<str>,
    {
        for line in self.format_table(data) {
            println!("{line}");
        }
    }

    /// Print single-column data
    pub fn print_list<T>(&self, items: &[T])
    where
        T: Display,
    {
        for item in items {
            println!("{item}");
        }
    }

    /// Print key-value pairs
    pub fn print_key_value<K, V>(&self, pairs: &[(K, V)])
    where
        K: Display + AsRef<str>,
        V: Display + AsRef<str>,
    {
        let data: Vec<Vec<String>> = pairs
            .iter()
            .map(|(k, v)| vec![k.to_string(), v.to_string()])
            .collect();

        self.print_table(&data);
    }

    fn format_table<T>(&self, data: &[Vec<T>]) -> Vec<String>
    where
        T: Display + AsRef<str>,
    {
        if data.is_empty() {
            return Vec::new();
        }

        if self.raw {
            return data
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| cell.as_ref())
                        .collect::<Vec<_>>()
                        .join("\t")
                })
                .collect();
        }

        // Column-aligned like `column -t`
        let num_cols = data.iter().map(Vec::len).max().unwrap_or(0);
        let mut col_widths = vec![0; num_cols];
        for row in data {
            for (i, cell) in row.iter().enumerate() {
                col_widths[i] = col_widths[i].max(cell.as_ref().chars().count());
            }
        }

        data.iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(i, cell)| {
                        if i == row.len() - 1 {
                            cell.to_string()
                        } else {
                            format!("{:<width$}", cell.as_ref(), width = col_widths[i])
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("  ")
            })
            .collect()
    }
}
