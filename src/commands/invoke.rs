use std::path::Path;

use guestlog::error::{GuestlogError, Result};
use guestlog::{FunctionRequest, MessageAppender};

pub const DEFAULT_EVENT_PATH: &str = "/tmp/input.json";

/// Function entry point: read the event document, print the response document.
pub async fn run(event_path: &Path, appender: &MessageAppender) -> Result<()> {
    let data = std::fs::read_to_string(event_path).map_err(|e| {
        GuestlogError::Input(format!("Cannot read event file {}: {e}", event_path.display()))
    })?;
    let event: FunctionRequest = serde_json::from_str(&data)
        .map_err(|e| GuestlogError::Input(format!("Invalid event document: {e}")))?;

    let response = appender.handle(event).await;
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
