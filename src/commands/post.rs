use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

use guestlog::error::Result;
use guestlog::{FunctionRequest, MessageAppender};

use crate::output::{self, Column};

const ADDED_COLUMNS: &[Column] = &[
    Column::new("Username", "added.username"),
    Column::new("Message", "added.message"),
    Column::new("Timestamp", "added.timestamp"),
];

pub async fn run(
    username: &str,
    message: &str,
    appender: &MessageAppender,
    output_format: &str,
) -> Result<()> {
    let body = json!({ "username": username, "message": message }).to_string();

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} Posting as {msg}...") {
        spinner.set_style(style);
    }
    spinner.set_message(username.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));

    let outcome = appender.append(&FunctionRequest::post(body)).await;
    spinner.finish_and_clear();

    let result = serde_json::to_value(outcome?)?;
    if output_format == "table" {
        output::print_success("Message added");
    }
    output::render(&result, ADDED_COLUMNS, output_format);
    Ok(())
}
