//! Interactive chat client.

use chrono::Local;
use futures_util::{SinkExt, StreamExt};
use hibiki_server::infrastructure::dto::websocket::ChatMessageDto;
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::{ClientError, endpoint_url};

/// Join the chat relay and send every line typed on the terminal.
///
/// Returns when the user ends input (Ctrl-D / Ctrl-C) or the server closes
/// the connection.
pub async fn run_chat(base_url: &str, username: String, color: String) -> Result<(), ClientError> {
    let url = endpoint_url(base_url, "/ws");
    let (ws, _response) = connect_async(url.as_str()).await?;
    tracing::info!("Connected to {}", url);

    let (mut write, mut read) = ws.split();

    // rustyline blocks, so it runs on its own thread and forwards lines
    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();
    let prompt = format!("{username}> ");
    let readline_task = tokio::task::spawn_blocking(move || read_lines(&prompt, line_tx));

    let mut print_task = tokio::spawn(async move {
        while let Some(msg) = read.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    let time = Local::now().format("%H:%M:%S").to_string();
                    println!("{}", format_incoming(text.as_str(), &time));
                }
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("Read error: {}", e);
                    break;
                }
            }
        }
    });

    loop {
        tokio::select! {
            line = line_rx.recv() => {
                let Some(content) = line else { break };
                let message = ChatMessageDto {
                    username: username.clone(),
                    color: color.clone(),
                    content,
                };
                let json = serde_json::to_string(&message)?;
                write.send(Message::text(json)).await?;
            }
            _ = &mut print_task => {
                println!("Server closed the connection");
                break;
            }
        }
    }

    let _ = write.close().await;
    print_task.abort();

    if readline_task.is_finished() {
        match readline_task.await {
            Ok(result) => result?,
            Err(e) => tracing::warn!("Line editor task failed: {}", e),
        }
    }

    Ok(())
}

fn read_lines(prompt: &str, tx: mpsc::UnboundedSender<String>) -> Result<(), ClientError> {
    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);
                if tx.send(line.to_string()).is_err() {
                    return Ok(());
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(()),
            Err(e) => return Err(e.into()),
        }
    }
}

/// Render one relayed message for the terminal.
///
/// Anything that is not a chat message is printed as is.
pub fn format_incoming(text: &str, time: &str) -> String {
    match serde_json::from_str::<ChatMessageDto>(text) {
        Ok(message) => format!(
            "[{}] {} ({}): {}",
            time, message.username, message.color, message.content
        ),
        Err(_) => format!("[{time}] {text}"),
    }
}
