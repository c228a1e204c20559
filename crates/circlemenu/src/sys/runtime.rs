use crate::events::AppEvent;
use async_channel::Sender;
use std::thread;
use tokio::runtime::Runtime;

/// Runs the control socket and the config watcher on their own tokio
/// runtime, off the GTK main thread.
pub fn start_background_services(tx: Sender<AppEvent>) {
    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create Tokio runtime: {}", e);
                return;
            }
        };

        rt.block_on(async {
            let server = tokio::spawn(crate::sys::server::run_server(tx.clone()));
            let watcher = tokio::spawn(crate::config::run_async_watcher(tx));

            for (name, task) in [("control socket", server), ("config watcher", watcher)] {
                if let Err(e) = task.await {
                    log::error!("{} stopped: {}", name, e);
                }
            }
        });
    });
}
