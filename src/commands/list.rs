use serde_json::Value;

use guestlog::{ContentStore, GuestlogConfig, Result, message_log};

use crate::output::{self, Column};

const MESSAGE_COLUMNS: &[Column] = &[
    Column::new("Username", "username"),
    Column::new("Message", "message"),
    Column::new("Timestamp", "timestamp"),
];

/// Read-only dump of the stored log.
pub async fn run(config: &GuestlogConfig, store: &dyn ContentStore, output_format: &str) -> Result<()> {
    let target = config.resolve()?;
    let remote = store.read_file(&target).await?;
    let log = message_log::decode_file(&remote)?;
    output::render(&Value::Array(log), MESSAGE_COLUMNS, output_format);
    Ok(())
}
