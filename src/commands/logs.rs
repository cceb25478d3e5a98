//! Log buffer dump handler

use crate::app::App;
use crate::error::Result;

/// Dumps the in-memory log buffer collected during this invocation.
pub fn run_logs(app: &App, json: bool) -> Result<()> {
    let logs = app.logger.get_logs();

    if json {
        println!("{}", serde_json::to_string_pretty(&logs)?);
        return Ok(());
    }

    if logs.is_empty() {
        println!("No log entries");
        return Ok(());
    }

    for entry in &logs {
        let details = entry
            .details
            .as_ref()
            .map(|d| format!(" {}", d))
            .unwrap_or_default();
        println!(
            "{} [{}] {}{}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.level.as_str(),
            entry.message,
            details
        );
    }
    Ok(())
}
