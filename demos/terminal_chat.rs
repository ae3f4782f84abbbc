//! Terminal chat client.
//!
//! Each line typed on stdin is committed like pressing Enter in the page's
//! message field. Received lines are printed to stdout.
//!
//! Run with:
//! `cargo run --example terminal_chat -- http://127.0.0.1:8000/room/1/ 1 42 alice`

use roomchat::chat::{ChatConfig, ChatSession, PageEvent};
use roomchat::page::{ChatBoxDataset, KeyEvent, TerminalLog, TextInput};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [page_url, room, user_id, username] = args.as_slice() else {
        eprintln!("usage: terminal_chat <page-url> <room-id> <user-id> <username>");
        std::process::exit(2);
    };

    let dataset = ChatBoxDataset::from_attributes([
        ("data-room-id", room.as_str()),
        ("data-user-id", user_id.as_str()),
        ("data-username", username.as_str()),
    ])?;
    let config = ChatConfig::builder()
        .page_url(page_url)?
        .chat_box(dataset)
        .connect_timeout(Duration::from_secs(10))
        .build()?;

    let log = TerminalLog::new(std::io::stdout()).with_timestamps();
    let session = ChatSession::connect(&config, TextInput::new(), log).await?;

    let (events, rx) = mpsc::channel(32);
    let running = tokio::spawn(session.run(rx));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if events.send(PageEvent::Input(line)).await.is_err() {
            break;
        }
        if events
            .send(PageEvent::KeyPress(KeyEvent::commit()))
            .await
            .is_err()
        {
            break;
        }
    }
    let _ = events.send(PageEvent::Unload).await;

    let client = running.await?;
    println!("session ended ({:?})", client.state());
    Ok(())
}
