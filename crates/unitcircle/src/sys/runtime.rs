use crate::events::AppEvent;
use crate::sys::input::parse_line;
use async_channel::Sender;
use std::thread;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Runtime;

pub fn start_background_services(tx: Sender<AppEvent>) {
    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create Tokio runtime: {}", e);
                let _ = tx.send_blocking(AppEvent::Quit);
                return;
            }
        };

        rt.block_on(async {
            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    read_commands(tx).await;
                });
            }

            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        let _ = tx.send(AppEvent::Quit).await;
                    }
                });
            }

            std::future::pending::<()>().await;
        });
    });
}

/// Forwards parsed stdin lines until EOF, then asks the app to quit.
pub async fn read_commands(tx: Sender<AppEvent>) {
    let reader = BufReader::new(tokio::io::stdin());
    let mut lines = reader.lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match parse_line(&line) {
                Some(event) => {
                    if tx.send(event).await.is_err() {
                        return;
                    }
                }
                None if line.trim().is_empty() => {}
                None => log::warn!("Unrecognised command: {}", line.trim()),
            },
            Ok(None) => break,
            Err(e) => {
                log::error!("Failed to read input: {}", e);
                break;
            }
        }
    }

    let _ = tx.send(AppEvent::Quit).await;
}
