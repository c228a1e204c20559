use crate::events::AppEvent;
use async_channel::Sender;
use sectorwheel::control::{ControlCommand, ParseCommandError, SOCKET_PATH};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

pub async fn run_server(tx: Sender<AppEvent>) {
    let listener = match bind(Path::new(SOCKET_PATH)) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind {}: {}", SOCKET_PATH, e);
            return;
        }
    };
    log::info!("Listening for commands on {}", SOCKET_PATH);

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                tokio::spawn(serve_client(stream, tx.clone()));
            }
            Err(e) => log::error!("Failed to accept connection: {}", e),
        }
    }
}

/// Binds `path`, replacing a socket left behind by an earlier run.
fn bind(path: &Path) -> std::io::Result<UnixListener> {
    if path.exists() {
        fs_err::remove_file(path)?;
    }
    UnixListener::bind(path)
}

async fn serve_client(stream: UnixStream, tx: Sender<AppEvent>) {
    let mut lines = BufReader::new(stream).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                log::warn!("Control client read failed: {}", e);
                break;
            }
        };

        match event_for_line(&line) {
            Ok(Some(event)) => {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => log::warn!("Ignoring control line '{}': {}", line.trim(), e),
        }
    }
}

/// Blank lines are not commands.
fn event_for_line(line: &str) -> Result<Option<AppEvent>, ParseCommandError> {
    match line.parse::<ControlCommand>() {
        Ok(command) => {
            log::debug!("control command '{}'", command);
            Ok(Some(AppEvent::from(command)))
        }
        Err(ParseCommandError::Empty) => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sectorwheel::ItemId;

    #[test]
    fn test_lines_become_app_events() {
        assert!(matches!(event_for_line("show"), Ok(Some(AppEvent::Show))));
        assert!(matches!(
            event_for_line("rotate 90\r"),
            Ok(Some(AppEvent::Rotate(90)))
        ));
        assert!(matches!(
            event_for_line("select 2"),
            Ok(Some(AppEvent::Select(id))) if id == ItemId::new(2)
        ));
    }

    #[test]
    fn test_blank_and_bad_lines() {
        assert!(matches!(event_for_line("   "), Ok(None)));
        assert_eq!(
            event_for_line("spin").err(),
            Some(ParseCommandError::Unknown("spin".to_string()))
        );
        assert_eq!(
            event_for_line("rotate left").err(),
            Some(ParseCommandError::BadArgument("rotate"))
        );
    }
}
