//! Behaviour of the chat client handlers, without a network.

use roomchat::base::clientstate::ClientState;
use roomchat::chat::ChatClient;
use roomchat::page::{KeyEvent, MessageInput, RoomId, ScrollLog, TextInput, UserIdentity};
use roomchat::ws::Message;
use tokio::sync::mpsc;

fn client_with(
    value: &str,
    viewport: usize,
) -> (
    ChatClient<TextInput, ScrollLog>,
    mpsc::UnboundedReceiver<Message>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let client = ChatClient::new(
        RoomId::new("7").unwrap(),
        UserIdentity::new("42", "alice"),
        TextInput::with_value(value),
        ScrollLog::new(viewport),
        tx,
    );
    (client, rx)
}

fn sent(rx: &mut mpsc::UnboundedReceiver<Message>) -> Vec<String> {
    let mut frames = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        frames.push(msg.as_text().expect("text frame").to_string());
    }
    frames
}

#[test]
fn test_send_trims_and_clears() {
    let (mut client, mut rx) = client_with("  hello ", 5);
    client.send_message();

    assert_eq!(
        sent(&mut rx),
        vec![r#"{"user_id":"42","username":"alice","message":"hello"}"#.to_string()]
    );
    assert_eq!(client.input().value(), "");
}

#[test]
fn test_send_keeps_inner_whitespace() {
    let (mut client, mut rx) = client_with("\thello   world\n", 5);
    client.send_message();

    let frames = sent(&mut rx);
    assert_eq!(frames.len(), 1);
    let value: serde_json::Value = serde_json::from_str(&frames[0]).unwrap();
    assert_eq!(value["message"], "hello   world");
}

#[test]
fn test_blank_input_is_noop() {
    for blank in ["", " ", "\t\n  ", "\u{3000}"] {
        let (mut client, mut rx) = client_with(blank, 5);
        client.send_message();

        assert!(sent(&mut rx).is_empty(), "sent for {:?}", blank);
        assert_eq!(client.input().value(), blank);
    }
}

#[test]
fn test_each_send_is_one_frame() {
    let (mut client, mut rx) = client_with("one", 5);
    client.send_message();
    client.input_mut().set_value("two");
    client.send_message();
    client.send_message(); // field is empty now

    let frames = sent(&mut rx);
    assert_eq!(frames.len(), 2);
    assert!(frames[0].contains(r#""message":"one""#));
    assert!(frames[1].contains(r#""message":"two""#));
}

#[test]
fn test_receive_appends_and_scrolls() {
    let (mut client, _rx) = client_with("", 3);
    for i in 0..5 {
        client.receive(Message::Text(format!(
            r#"{{"username":"bob","message":"hi {}"}}"#,
            i
        )));
        let log = client.log();
        assert_eq!(log.len(), i + 1);
        assert_eq!(log.scroll_top(), log.max_scroll_top());
    }

    let log = client.log();
    assert_eq!(log.entries()[0].text(), "bob: hi 0");
    assert_eq!(log.entries()[4].text(), "bob: hi 4");
    assert_eq!(log.scroll_top(), 2);
}

#[test]
fn test_receive_single_line() {
    let (mut client, _rx) = client_with("", 10);
    client.receive(Message::Text(r#"{"username":"bob","message":"hi"}"#.into()));

    let entries = client.log().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].text(), "bob: hi");
}

#[test]
fn test_receive_drops_incomplete_frames() {
    let (mut client, _rx) = client_with("", 10);
    for payload in [
        r#"{"message":"hi"}"#,
        r#"{"username":"bob"}"#,
        r#"{"username":"","message":"hi"}"#,
        r#"{"username":"bob","message":""}"#,
        r#"{"username":null,"message":"hi"}"#,
        r#"{"user":"bob","message":"hi"}"#,
        "[]",
        "42",
    ] {
        client.receive(Message::Text(payload.into()));
    }

    assert!(client.log().is_empty());
    assert_eq!(client.state(), ClientState::Connected);
}

#[test]
fn test_malformed_frame_does_not_break_handler_chain() {
    let (mut client, _rx) = client_with("", 10);
    client.receive(Message::Text("not json at all".into()));
    client.receive(Message::Text("{\"username\":".into()));
    client.receive(Message::Text(r#"{"username":"bob","message":"still here"}"#.into()));

    assert_eq!(client.log().len(), 1);
    assert_eq!(client.log().entries()[0].text(), "bob: still here");
}

#[test]
fn test_markup_rendered_as_text() {
    let (mut client, _rx) = client_with("", 10);
    client.receive(Message::Text(
        r#"{"username":"<b>eve</b>","message":"<script>alert(1)</script>"}"#.into(),
    ));

    assert_eq!(
        client.log().entries()[0].text(),
        "<b>eve</b>: <script>alert(1)</script>"
    );
}

#[test]
fn test_commit_key_sends_once() {
    let (mut client, mut rx) = client_with("hello", 5);
    let mut key = KeyEvent::commit();
    client.handle_key(&mut key);

    assert!(key.default_prevented());
    assert_eq!(sent(&mut rx).len(), 1);
    assert_eq!(client.input().value(), "");
}

#[test]
fn test_other_keys_do_not_send() {
    let (mut client, mut rx) = client_with("hello", 5);
    for name in ["a", "Shift", "Tab", "Escape", " "] {
        let mut key = KeyEvent::new(name);
        client.handle_key(&mut key);
        assert!(!key.default_prevented());
    }

    assert!(sent(&mut rx).is_empty());
    assert_eq!(client.input().value(), "hello");
}

#[test]
fn test_commit_key_on_blank_input_still_prevents_default() {
    let (mut client, mut rx) = client_with("   ", 5);
    let mut key = KeyEvent::commit();
    client.handle_key(&mut key);

    assert!(key.default_prevented());
    assert!(sent(&mut rx).is_empty());
}

#[test]
fn test_close_is_terminal() {
    let (mut client, mut rx) = client_with("hello", 5);
    client.on_close(None);
    client.on_close(None);
    assert_eq!(client.state(), ClientState::Closed);

    client.receive(Message::Text(r#"{"username":"bob","message":"hi"}"#.into()));
    client.handle_key(&mut KeyEvent::commit());

    assert!(client.log().is_empty());
    assert!(sent(&mut rx).is_empty());
}
