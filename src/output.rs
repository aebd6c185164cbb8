use comfy_table::{ContentArrangement, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use serde_json::Value;

pub struct Column {
    pub header: &'static str,
    pub path: &'static str,
}

impl Column {
    pub const fn new(header: &'static str, path: &'static str) -> Self {
        Self { header, path }
    }
}

fn extract_field(value: &Value, path: &str) -> String {
    let mut current = value;
    for key in path.split('.') {
        match current {
            Value::Object(map) => {
                current = map.get(key).unwrap_or(&Value::Null);
            }
            _ => return "-".to_string(),
        }
    }
    match current {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Print `data` as JSON, YAML, or a table built from `columns`.
pub fn render(data: &Value, columns: &[Column], format: &str) {
    match format {
        "json" => {
            println!(
                "{}",
                serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string())
            );
        }
        "yaml" => {
            println!(
                "{}",
                serde_yaml::to_string(data).unwrap_or_else(|_| data.to_string())
            );
        }
        _ => match data {
            Value::Array(items) => {
                if items.is_empty() {
                    println!("No messages yet.");
                    return;
                }
                let mut table = new_table();
                table.set_header(columns.iter().map(|c| c.header).collect::<Vec<_>>());
                for item in items {
                    table.add_row(
                        columns
                            .iter()
                            .map(|c| extract_field(item, c.path))
                            .collect::<Vec<_>>(),
                    );
                }
                println!("{table}");
            }
            Value::Object(_) => {
                let mut table = new_table();
                table.set_header(vec!["Field", "Value"]);
                for col in columns {
                    table.add_row(vec![col.header.to_string(), extract_field(data, col.path)]);
                }
                println!("{table}");
            }
            _ => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string())
                );
            }
        },
    }
}

pub fn print_success(msg: &str) {
    use colored::Colorize;
    println!("{}", msg.green());
}

pub fn print_error(msg: &str) {
    use colored::Colorize;
    eprintln!("{}", msg.red());
}
