use crate::usecase::report::SccReport;
use anyhow::{Context, Result};
use tokio::fs;
use tokio::io::{self, AsyncWriteExt};

pub fn report_to_json(report: &SccReport) -> Result<String> {
    let pretty = serde_json::to_string_pretty(report)?;
    Ok(pretty)
}

pub async fn write_report_file(path: &str, report: &SccReport) -> Result<()> {
    let pretty = report_to_json(report)?;
    fs::write(path, pretty)
        .await
        .with_context(|| format!("writing report: {path}"))?;
    Ok(())
}

/// Writes `body` to `path`, or to stdout when no path is given.
pub async fn write_output(path: Option<&str>, body: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, body)
            .await
            .with_context(|| format!("writing output: {path}")),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(body.as_bytes()).await?;
            stdout.flush().await?;
            Ok(())
        }
    }
}
