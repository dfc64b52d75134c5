use crate::usecase::event::AppEvent;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

fn app_event_to_json(ev: &AppEvent) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(ev)
}

pub fn spawn_ndjson_printer(mut rx: mpsc::Receiver<AppEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(ev) = rx.recv().await {
            match app_event_to_json(&ev) {
                // NDJSON to stdout.
                Ok(line) => println!("{line}"),
                Err(e) => warn!(error = %e, "dropping unserializable event"),
            }
        }
    })
}
