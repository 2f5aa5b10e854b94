//! Live feed updates over Faye
//!
//! The feed service pushes notifications through a Faye (Bayeux) server.
//! One WebSocket per subscription: handshake, subscribe to the feed's
//! channel, then keep a `/meta/connect` outstanding while data messages
//! arrive on the channel.

use std::future::Future;
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use crate::domain::entities::{FeedRef, FeedUpdate};
use crate::domain::ports::{FeedEvent, FeedSubscription};
use crate::error::FeedError;

const HANDSHAKE: &str = "/meta/handshake";
const SUBSCRIBE: &str = "/meta/subscribe";
const CONNECT: &str = "/meta/connect";

/// Updates held for a slow subscriber before the socket reader waits
const UPDATE_BUFFER: usize = 64;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;
type Writer = SplitSink<Socket, Message>;
type Reader = SplitStream<Socket>;

/// A Bayeux message received from the server
#[derive(Debug, Deserialize)]
pub(crate) struct BayeuxMessage {
    pub channel: String,
    #[serde(rename = "clientId")]
    pub client_id: Option<String>,
    pub successful: Option<bool>,
    pub error: Option<String>,
    pub data: Option<Value>,
}

/// Faye channel carrying notifications for a feed
pub(crate) fn channel_name(app_id: &str, feed: &FeedRef) -> String {
    format!("/site-{}-feed-{}{}", app_id, feed.kind.slug(), feed.user_id)
}

pub(crate) fn handshake_message(id: u64) -> Value {
    json!([{
        "channel": HANDSHAKE,
        "version": "1.0",
        "supportedConnectionTypes": ["websocket"],
        "id": id.to_string(),
    }])
}

/// Subscribe request. The feed token travels as the `signature` extension.
pub(crate) fn subscribe_message(
    id: u64,
    client_id: &str,
    channel: &str,
    api_key: &str,
    feed: &FeedRef,
) -> Value {
    json!([{
        "channel": SUBSCRIBE,
        "clientId": client_id,
        "subscription": channel,
        "id": id.to_string(),
        "ext": {
            "user_id": channel.trim_start_matches('/'),
            "api_key": api_key,
            "signature": feed.token,
        },
    }])
}

pub(crate) fn connect_message(id: u64, client_id: &str) -> Value {
    json!([{
        "channel": CONNECT,
        "clientId": client_id,
        "connectionType": "websocket",
        "id": id.to_string(),
    }])
}

/// Parse a frame; servers send either a batch (array) or a single message
pub(crate) fn parse_frame(text: &str) -> Result<Vec<BayeuxMessage>, FeedError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| FeedError::Deserialization(e.to_string()))?;

    let messages = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|message| vec![message])
    };
    messages.map_err(|e| FeedError::Deserialization(e.to_string()))
}

/// Bound a setup step; a stalled server becomes `FeedError::Timeout`
async fn within<T, Fut>(limit: Duration, step: &'static str, fut: Fut) -> Result<T, FeedError>
where
    Fut: Future<Output = Result<T, FeedError>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| FeedError::Timeout(step))?
}

/// Open a live subscription to `feed`.
///
/// Connecting, the handshake reply and the subscribe reply each get
/// `setup_timeout`.
pub async fn subscribe(
    faye_url: &str,
    app_id: &str,
    api_key: &str,
    feed: &FeedRef,
    setup_timeout: Duration,
) -> Result<FeedSubscription, FeedError> {
    let channel = channel_name(app_id, feed);
    let (socket, _) = within(setup_timeout, "connection", async {
        connect_async(faye_url).await.map_err(FeedError::from)
    })
    .await?;
    let (mut writer, mut reader) = socket.split();
    let mut next_id = 0u64;

    next_id += 1;
    send(&mut writer, handshake_message(next_id)).await?;
    let reply = within(setup_timeout, HANDSHAKE, await_reply(&mut reader, HANDSHAKE)).await?;
    let client_id = match (reply.successful, reply.client_id) {
        (Some(true), Some(client_id)) => client_id,
        _ => {
            return Err(FeedError::Rejected(
                reply.error.unwrap_or_else(|| "handshake refused".to_string()),
            ))
        }
    };

    next_id += 1;
    send(
        &mut writer,
        subscribe_message(next_id, &client_id, &channel, api_key, feed),
    )
    .await?;
    let reply = within(setup_timeout, SUBSCRIBE, await_reply(&mut reader, SUBSCRIBE)).await?;
    if reply.successful != Some(true) {
        return Err(FeedError::Rejected(
            reply
                .error
                .unwrap_or_else(|| "subscription refused".to_string()),
        ));
    }

    next_id += 1;
    send(&mut writer, connect_message(next_id, &client_id)).await?;

    tracing::debug!(channel = %channel, client_id = %client_id, "Faye subscription established");

    let (updates, receiver) = mpsc::channel(UPDATE_BUFFER);
    let transport = tokio::spawn(pump(writer, reader, client_id, channel, updates, next_id));

    Ok(FeedSubscription::new(feed.clone(), receiver).with_transport(transport))
}

async fn send(writer: &mut Writer, message: Value) -> Result<(), FeedError> {
    writer.send(Message::Text(message.to_string())).await?;
    Ok(())
}

/// Read frames until the reply on a meta channel shows up
async fn await_reply(reader: &mut Reader, meta: &str) -> Result<BayeuxMessage, FeedError> {
    while let Some(frame) = reader.next().await {
        match frame? {
            Message::Text(text) => {
                if let Some(reply) = parse_frame(&text)?.into_iter().find(|m| m.channel == meta) {
                    return Ok(reply);
                }
            }
            Message::Close(_) => return Err(FeedError::Closed),
            _ => {}
        }
    }
    Err(FeedError::Closed)
}

/// Forward channel data to the subscriber and keep the connection alive.
///
/// Runs until the connection ends or the subscriber is dropped. The reason
/// the connection ended is sent as the last event.
async fn pump(
    writer: Writer,
    reader: Reader,
    client_id: String,
    channel: String,
    updates: mpsc::Sender<FeedEvent>,
    next_id: u64,
) {
    let reason = match forward(writer, reader, &client_id, &channel, &updates, next_id).await {
        Some(reason) => reason,
        None => {
            tracing::debug!(channel = %channel, "Subscriber dropped");
            return;
        }
    };

    tracing::warn!(channel = %channel, error = %reason, "Feed connection ended");
    let _ = updates.send(Err(reason)).await;
}

/// Returns why the connection ended, or `None` once nobody is listening
async fn forward(
    mut writer: Writer,
    mut reader: Reader,
    client_id: &str,
    channel: &str,
    updates: &mpsc::Sender<FeedEvent>,
    mut next_id: u64,
) -> Option<FeedError> {
    while let Some(frame) = reader.next().await {
        let text = match frame {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => return Some(FeedError::Closed),
            Ok(_) => continue,
            Err(e) => return Some(e.into()),
        };

        let messages = match parse_frame(&text) {
            Ok(messages) => messages,
            Err(e) => {
                tracing::warn!(channel = %channel, error = %e, "Ignoring malformed Faye frame");
                continue;
            }
        };

        for message in messages {
            if message.channel == CONNECT {
                if message.successful == Some(false) {
                    return Some(FeedError::Rejected(
                        message
                            .error
                            .unwrap_or_else(|| "connect refused".to_string()),
                    ));
                }
                next_id += 1;
                if let Err(e) = send(&mut writer, connect_message(next_id, client_id)).await {
                    return Some(e);
                }
            } else if message.channel == channel {
                let Some(data) = message.data else {
                    continue;
                };
                match serde_json::from_value::<FeedUpdate>(data) {
                    Ok(update) => {
                        if updates.send(Ok(update)).await.is_err() {
                            return None;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(channel = %channel, error = %e, "Ignoring malformed feed update")
                    }
                }
            }
        }
    }

    Some(FeedError::Closed)
}
