use std::net::SocketAddr;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

/// How the upstream behaves once a client completes the handshake.
pub enum Behaviour {
    /// Close the connection as soon as it is established.
    CloseAfterHandshake,
    /// Push the given text frames to the client, then hold the socket open
    /// while collecting everything the client sends.
    SendThenHold(Vec<String>),
}

/// Local WebSocket server standing in for the remote hive endpoint.
///
/// Accepts exactly one connection. Text frames received from the client are
/// forwarded to `inbound`.
pub struct WsUpstream {
    addr: SocketAddr,
    pub inbound: mpsc::UnboundedReceiver<Message>,
}

impl WsUpstream {
    pub async fn start(behaviour: Behaviour) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind upstream");
        let addr = listener.local_addr().expect("upstream has no local addr");

        let (tx, inbound) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("upstream accept failed");
            let mut socket = accept_async(stream)
                .await
                .expect("upstream websocket handshake failed");

            match behaviour {
                Behaviour::CloseAfterHandshake => {
                    let _ = socket.close(None).await;
                }
                Behaviour::SendThenHold(frames) => {
                    for frame in frames {
                        socket
                            .send(Message::Text(frame.into()))
                            .await
                            .expect("upstream send failed");
                    }

                    while let Some(Ok(frame)) = socket.next().await {
                        if frame.is_text() {
                            let _ = tx.send(frame);
                        }
                    }
                }
            }
        });

        Self { addr, inbound }
    }

    pub fn url(&self) -> String {
        format!("ws://{}/", self.addr)
    }
}
