// WebSocket chart channel.
//
// Every text frame is decoded as a `ChartRequest` and answered with one
// `ChartResponse`. Replies go through an mpsc channel to a writer task that
// owns the sink, so reading never waits on a slow client.

use crate::protocol::{ChartRequest, ChartResponse};
use crate::render::render_isolated;
use courtside_core::dataset::PlayerTable;
use futures_util::stream::Stream;
use futures_util::{SinkExt, StreamExt};
use std::fmt::Display;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use warp::ws::{Message, WebSocket};

/// Replies buffered per connection before the reader waits on the writer.
const REPLY_BUFFER: usize = 32;

/// Serve one upgraded connection until the client closes it.
pub async fn serve_socket(socket: WebSocket, table: Arc<PlayerTable>) {
    info!("dashboard client connected");
    let (mut sink, stream) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ChartResponse>(REPLY_BUFFER);

    let writer = tokio::spawn(async move {
        while let Some(response) = rx.recv().await {
            let text = match serde_json::to_string(&response) {
                Ok(text) => text,
                Err(e) => {
                    warn!("failed to encode chart response: {e}");
                    continue;
                }
            };
            if let Err(e) = sink.send(Message::text(text)).await {
                debug!("client went away while sending: {e}");
                break;
            }
        }
        let _ = sink.close().await;
    });

    if process_message_stream(stream, &tx, &table).await.is_err() {
        debug!("reply channel closed; dropping connection");
    }
    drop(tx);
    let _ = writer.await;
    info!("dashboard client disconnected");
}

/// Read frames from `stream`, sending one reply per text frame through `tx`.
/// Returns `Err(())` if the reply channel is closed.
///
/// Generic over the stream so tests can feed frames from memory.
pub async fn process_message_stream<St, E>(
    mut stream: St,
    tx: &mpsc::Sender<ChartResponse>,
    table: &Arc<PlayerTable>,
) -> Result<(), ()>
where
    St: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    while let Some(msg_result) = stream.next().await {
        match msg_result {
            Ok(msg) if msg.is_text() => {
                let text = msg.to_str().unwrap_or_default();
                let response = handle_text(text, table).await;
                if tx.send(response).await.is_err() {
                    return Err(());
                }
            }
            Ok(msg) if msg.is_close() => {
                info!("client sent close frame");
                break;
            }
            Ok(_) => {
                // Binary, ping and pong frames carry no requests.
            }
            Err(e) => {
                warn!("WebSocket error: {e}");
                break;
            }
        }
    }
    Ok(())
}

/// Decode and render one request; malformed JSON gets a placeholder reply.
pub async fn handle_text(text: &str, table: &Arc<PlayerTable>) -> ChartResponse {
    match serde_json::from_str::<ChartRequest>(text) {
        Ok(request) => render_isolated(Arc::clone(table), request).await,
        Err(e) => {
            warn!("malformed chart request: {e}");
            ChartResponse::invalid(e)
        }
    }
}
