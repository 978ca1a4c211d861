use crate::client::{Outbound, Sender};
use crate::frame::{Frame, FrameReader, MAX_FRAME_LEN};
use crate::server::SharedState;
use std::net::SocketAddr;
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::StreamExt;
use tracing::{error, info, warn};

pub async fn client_connection(stream: TcpStream, peer: SocketAddr, state: SharedState) {
    let (reader, mut writer) = stream.into_split();
    let mut frames = FrameReader::new(BufReader::new(reader), MAX_FRAME_LEN);
    let (client_sender, client_rcv) = mpsc::unbounded_channel();
    let mut client_rcv = UnboundedReceiverStream::new(client_rcv);

    let id = state.lock().await.connect(peer, Sender(client_sender));

    loop {
        tokio::select! {
            frame = frames.next_frame() => match frame {
                Ok(Some(Frame::Line(line))) => state.lock().await.handle_line(id, &line),
                Ok(Some(Frame::InvalidUtf8(bytes))) => {
                    warn!(
                        "Dropping frame from {} ({}), not valid UTF-8: {}",
                        id,
                        peer,
                        String::from_utf8_lossy(&bytes)
                    );
                }
                Ok(None) => break,
                Err(e) => {
                    error!("error receiving from {} ({}): {}", id, peer, e);
                    break;
                }
            },
            outbound = client_rcv.next() => match outbound {
                Some(Outbound::Frame(frame)) => {
                    if let Err(e) = writer.write_all(frame.as_bytes()).await {
                        error!("error sending to {} ({}): {}", id, peer, e);
                        break;
                    }
                }
                Some(Outbound::Close) | None => {
                    info!("closing connection of {} ({})", id, peer);
                    break;
                }
            },
        }
    }

    state.lock().await.disconnect(id);
    // The peer may already be gone
    let _ = writer.shutdown().await;
}
