//! Tests for the Telegram channel module.

use super::polling::{to_incoming, updates_url};
use super::send::parse_chat_id;
use super::types::*;
use super::*;
use crate::utils::split_message;
use glossa_core::{message::OutgoingMessage, traits::Channel};

fn test_channel() -> TelegramChannel {
    TelegramChannel::new(TelegramConfig {
        bot_token: "123:abc".into(),
        ..Default::default()
    })
}

#[test]
fn test_base_url_from_config() {
    let ch = test_channel();
    assert_eq!(ch.base_url, "https://api.telegram.org/bot123:abc");

    let custom = TelegramChannel::new(TelegramConfig {
        bot_token: "t".into(),
        api_url: "http://localhost:8081/".into(),
        ..Default::default()
    });
    assert_eq!(custom.base_url, "http://localhost:8081/bott");
}

#[test]
fn test_updates_url() {
    assert_eq!(
        updates_url("https://api.telegram.org/botX", 60, None),
        "https://api.telegram.org/botX/getUpdates?timeout=60"
    );
    assert_eq!(
        updates_url("https://api.telegram.org/botX", 60, Some(42)),
        "https://api.telegram.org/botX/getUpdates?timeout=60&offset=42"
    );
}

#[test]
fn test_split_short_message() {
    let chunks = split_message("hello", 4096);
    assert_eq!(chunks, vec!["hello"]);
}

#[test]
fn test_split_long_message() {
    let text = "a\n".repeat(3000);
    let chunks = split_message(&text, 4096);
    assert!(chunks.len() >= 2);
    for chunk in &chunks {
        assert!(chunk.len() <= 4096);
    }
    assert_eq!(chunks.concat(), text);
}

#[test]
fn test_split_multibyte_message() {
    // Cyrillic chars are two bytes; an odd limit would land mid-char.
    let text = "Привіт".repeat(1000);
    let chunks = split_message(&text, 4095);
    assert!(chunks.len() >= 2);
    for chunk in &chunks {
        assert!(chunk.len() <= 4095);
    }
    assert_eq!(chunks.concat(), text);
}

#[test]
fn test_tg_update_text_message() {
    let json = r#"{
        "update_id": 900,
        "message": {
            "message_id": 2,
            "from": {"id": 7, "is_bot": false, "first_name": "Ana", "username": "ana"},
            "chat": {"id": 100, "type": "private"},
            "date": 1700000000,
            "text": "/es hola"
        }
    }"#;
    let update: TgUpdate = serde_json::from_str(json).unwrap();
    assert_eq!(update.update_id, 900);

    let incoming = to_incoming(update.message.unwrap()).unwrap();
    assert_eq!(incoming.channel, "telegram");
    assert_eq!(incoming.sender_id, "7");
    assert_eq!(incoming.text, "/es hola");
    assert_eq!(incoming.reply_target.as_deref(), Some("100"));
    assert_eq!(incoming.timestamp.timestamp(), 1_700_000_000);
}

#[test]
fn test_tg_update_without_message() {
    let json = r#"{"update_id": 5, "edited_message": {"message_id": 1}}"#;
    let update: TgUpdate = serde_json::from_str(json).unwrap();
    assert!(update.message.is_none());
}

#[test]
fn test_message_without_text_is_skipped() {
    let json = r#"{
        "message_id": 3,
        "chat": {"id": 100, "type": "private"},
        "date": 1700000000,
        "sticker": {"file_id": "x"}
    }"#;
    let msg: TgMessage = serde_json::from_str(json).unwrap();
    assert!(to_incoming(msg).is_none());
}

#[test]
fn test_message_with_empty_text_is_skipped() {
    let json = r#"{"message_id": 3, "chat": {"id": 100}, "text": ""}"#;
    let msg: TgMessage = serde_json::from_str(json).unwrap();
    assert!(to_incoming(msg).is_none());
}

#[test]
fn test_channel_post_without_sender_uses_chat_id() {
    let json = r#"{"message_id": 9, "chat": {"id": -100500, "type": "group"}, "text": "hallo"}"#;
    let msg: TgMessage = serde_json::from_str(json).unwrap();
    let incoming = to_incoming(msg).unwrap();
    assert_eq!(incoming.sender_id, "-100500");
    assert_eq!(incoming.reply_target.as_deref(), Some("-100500"));
}

#[test]
fn test_incoming_ids_are_unique() {
    let json = r#"{"message_id": 1, "chat": {"id": 1}, "text": "same"}"#;
    let a = to_incoming(serde_json::from_str(json).unwrap()).unwrap();
    let b = to_incoming(serde_json::from_str(json).unwrap()).unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn test_get_updates_error_response() {
    let json = r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#;
    let resp: TgResponse<Vec<TgUpdate>> = serde_json::from_str(json).unwrap();
    assert!(!resp.ok);
    assert!(resp.result.is_none());
    assert_eq!(resp.description.as_deref(), Some("Unauthorized"));
}

#[test]
fn test_identity_from_get_me() {
    let json = r#"{"ok": true, "result": {"id": 42, "is_bot": true, "first_name": "Glossa", "username": "glossa_bot"}}"#;
    let resp: TgResponse<TgUser> = serde_json::from_str(json).unwrap();
    let me = identity_from(resp).unwrap();
    assert_eq!(me.id, 42);
    assert_eq!(me.username, "glossa_bot");
}

#[test]
fn test_identity_from_rejected_token() {
    let json = r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#;
    let resp: TgResponse<TgUser> = serde_json::from_str(json).unwrap();
    let err = identity_from(resp).unwrap_err();
    assert!(err.to_string().contains("Unauthorized"));
}

#[test]
fn test_parse_chat_id() {
    assert_eq!(parse_chat_id("100").unwrap(), 100);
    assert_eq!(parse_chat_id("-1001234").unwrap(), -1001234);
    assert!(parse_chat_id("abc").is_err());
}

#[tokio::test]
async fn test_send_without_reply_target_fails() {
    let ch = test_channel();
    let err = ch
        .send(OutgoingMessage {
            text: "hi".into(),
            reply_target: None,
        })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("no reply_target"));
}

#[tokio::test]
async fn test_send_with_invalid_chat_id_fails() {
    let ch = test_channel();
    let err = ch
        .send(OutgoingMessage {
            text: "hi".into(),
            reply_target: Some("not-a-number".into()),
        })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("invalid telegram chat_id"));
}

#[tokio::test]
async fn test_stop_aborts_polling_task() {
    // Nothing listens on port 1, so the loop sits in its retry sleep.
    let ch = TelegramChannel::new(TelegramConfig {
        bot_token: "t".into(),
        api_url: "http://127.0.0.1:1".into(),
        retry_delay_secs: 600,
        ..Default::default()
    });

    let mut rx = ch.start().await.unwrap();
    assert!(ch.poll_task.lock().unwrap().is_some());

    ch.stop().await.unwrap();
    assert!(ch.poll_task.lock().unwrap().is_none());

    // The aborted task drops its sender, which closes the receiver.
    let closed = tokio::time::timeout(std::time::Duration::from_secs(5), rx.recv())
        .await
        .expect("poll task still running after stop");
    assert!(closed.is_none());
}

#[tokio::test]
async fn test_stop_without_start_is_ok() {
    let ch = test_channel();
    ch.stop().await.unwrap();
    assert!(ch.poll_task.lock().unwrap().is_none());
}
