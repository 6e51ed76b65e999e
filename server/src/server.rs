use crate::logging::HexDump;
use dnsd_message::{Lookup, MessageProcessor};
use futures::prelude::*;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::Mutex;
use tokio_util::codec::BytesCodec;
use tokio_util::udp::UdpFramed;
use tracing::{debug, error, info, trace, warn};

type Result<T> = anyhow::Result<T>;

pub(crate) struct Server<L> {
    socket: UdpSocket,
    processor: Arc<MessageProcessor<L>>,
}

impl<L> Server<L>
where
    L: Lookup + Send + Sync + 'static,
{
    pub async fn bind(local_addr: SocketAddr, processor: Arc<MessageProcessor<L>>) -> Result<Self> {
        let socket = UdpSocket::bind(local_addr).await?;
        Ok(Self { socket, processor })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Answers datagrams until the socket stream ends. Each datagram gets its
    /// own task; the processor is shared, the send half sits behind a lock.
    pub async fn run(self) -> Result<()> {
        let Server { socket, processor } = self;
        let local_addr = socket.local_addr()?;

        let (sink, mut stream) = UdpFramed::new(socket, BytesCodec::new()).split();
        let sink = Arc::new(Mutex::new(sink));

        loop {
            trace!("Waiting to recv...");
            let (bytes, addr) = match stream.next().await {
                Some(Ok((b, a))) => (b, a),
                Some(Err(e)) => {
                    error!("Error getting next value in stream: {}", e);
                    continue;
                }
                None => {
                    warn!("No value available from stream, closing");
                    return Ok(());
                }
            };

            let sink = sink.clone();
            let processor = processor.clone();

            tokio::spawn(async move {
                info!("----- Message received from {} on {} -----", addr, local_addr);
                debug!("Message (received): {}", HexDump(&bytes));

                let outcome = processor.process(&bytes);
                info!(
                    rcode = %outcome.rcode,
                    host = outcome.host.as_deref().unwrap_or("-"),
                    "Sending to: {}, length: {}",
                    addr,
                    outcome.response.len()
                );
                debug!("Message (sent): {}", HexDump(&outcome.response));

                if let Err(e) = sink.lock().await.send((outcome.response, addr)).await {
                    error!("Error sending buffer to client: {}", e);
                }
            });
        }
    }
}
