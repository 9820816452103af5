use std::time::Duration;

use chrono::Utc;
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::time::MissedTickBehavior;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::envelope::{Envelope, decode_record};
use crate::error::SessionError;

pub type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Dial the configured endpoint.
pub async fn connect(cfg: &SessionConfig) -> Result<WsStream, SessionError> {
    info!(url = %cfg.url, "dialing hive endpoint");

    let (socket, response) = connect_async(cfg.url.as_str()).await?;
    debug!(status = %response.status(), "websocket handshake complete");

    Ok(socket)
}

/// Run both session duties over one socket until the first fault.
///
/// The socket is split into a stream half owned by the receive loop and a
/// sink half owned by the send loop; both run cooperatively on this task.
/// There is no reconnect policy: the first connection-level fault ends the
/// session and propagates to the caller.
pub async fn run<S>(socket: S, cfg: SessionConfig) -> Result<(), SessionError>
where
    S: Stream<Item = Result<Message, tungstenite::Error>>
        + Sink<Message, Error = tungstenite::Error>,
{
    let (sink, stream) = socket.split();

    tokio::try_join!(recv_loop(stream), send_loop(sink, cfg.interval))?;
    Ok(())
}

/// Consume inbound frames until the connection goes away.
///
/// Decode faults are reported and skipped; they never end the session.
async fn recv_loop<R>(mut stream: R) -> Result<(), SessionError>
where
    R: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    while let Some(frame) = stream.next().await {
        match frame? {
            Message::Text(text) => match decode_record(&text) {
                Ok(record) => {
                    info!(record = %serde_json::Value::Object(record), "received");
                }
                Err(err) => {
                    warn!(%err, payload = %text, "undecodable message, skipping");
                }
            },
            Message::Binary(payload) => {
                warn!(len = payload.len(), "ignoring binary frame");
            }
            Message::Close(frame) => {
                info!(?frame, "remote sent close");
                return Err(SessionError::ConnectionClosed);
            }
            // Pongs answer our transport-level pings; pings are answered by
            // tungstenite itself on the next read/write.
            Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
        }
    }

    Err(SessionError::ConnectionClosed)
}

/// Emit one clock envelope per interval, starting immediately.
async fn send_loop<W>(mut sink: W, interval: Duration) -> Result<(), SessionError>
where
    W: Sink<Message, Error = tungstenite::Error> + Unpin,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let envelope = Envelope::clock(Utc::now());
        let text = envelope.encode()?;

        debug!(data = %envelope.data, "sending clock");
        sink.send(Message::Text(text.into())).await?;
    }
}
