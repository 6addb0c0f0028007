//! Transport-level connection setup (spec §6 `protocol`): plain TCP
//! (v4/v6, address family selected or left to the resolver) and Unix
//! domain sockets. Grounded on the `MaybeTlsStream` enum-of-streams
//! pattern in `sqlx-core::mysql::stream`, minus the TLS variant (out of
//! scope per the Non-goals).

use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::{TcpSocket, TcpStream, UnixStream};

/// Address family requested via the `protocol` connect option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// Let the resolver pick v4 or v6.
    Tcp,
    Tcp4,
    Tcp6,
    Unix,
}

impl Transport {
    /// Connects using this transport, validating that resolved TCP
    /// addresses actually match a family-restricted request. `local_addr`
    /// (spec §6) binds the outgoing socket's source address before
    /// connecting; it has no effect on a Unix transport.
    pub async fn connect(
        self,
        remote_addr: &str,
        port: u16,
        local_addr: Option<&str>,
        unix_path: Option<&Path>,
    ) -> crate::error::Result<TransportStream> {
        match self {
            Transport::Unix => {
                let path = unix_path.ok_or_else(|| {
                    crate::error::Error::protocol(
                        "unix transport requested without a socket path",
                    )
                })?;
                let stream = UnixStream::connect(path).await?;
                Ok(TransportStream::Unix(stream))
            }
            Transport::Tcp | Transport::Tcp4 | Transport::Tcp6 => {
                let mut last_err = None;
                let mut stream = None;

                for addr in tokio::net::lookup_host((remote_addr, port)).await? {
                    if self != Transport::Tcp {
                        let matches = match (self, addr) {
                            (Transport::Tcp4, SocketAddr::V4(_)) => true,
                            (Transport::Tcp6, SocketAddr::V6(_)) => true,
                            _ => false,
                        };
                        if !matches {
                            continue;
                        }
                    }

                    let socket = match addr {
                        SocketAddr::V4(_) => TcpSocket::new_v4()?,
                        SocketAddr::V6(_) => TcpSocket::new_v6()?,
                    };
                    if let Some(local) = local_addr {
                        let bind_addr: SocketAddr = format!("{local}:0")
                            .parse()
                            .map_err(|_| crate::error::Error::protocol(format!("invalid local_addr {local:?}")))?;
                        socket.bind(bind_addr)?;
                    }

                    match socket.connect(addr).await {
                        Ok(s) => {
                            stream = Some(s);
                            break;
                        }
                        Err(e) => last_err = Some(e),
                    }
                }

                let stream = stream.ok_or_else(|| {
                    last_err.unwrap_or_else(|| {
                        io::Error::new(
                            io::ErrorKind::AddrNotAvailable,
                            format!("no address for {remote_addr}:{port} matched transport {self:?}"),
                        )
                    })
                })?;
                stream.set_nodelay(true)?;
                Ok(TransportStream::Tcp(stream))
            }
        }
    }
}

/// A connected transport stream. `AsyncRead`/`AsyncWrite` delegate to
/// whichever concrete socket type is active, so callers (the packet
/// framer, buffered I/O) never need to match on the variant.
pub enum TransportStream {
    Tcp(TcpStream),
    Unix(UnixStream),
}

impl AsyncRead for TransportStream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut() {
            TransportStream::Tcp(s) => Pin::new(s).poll_read(cx, buf),
            TransportStream::Unix(s) => Pin::new(s).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for TransportStream {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match self.get_mut() {
            TransportStream::Tcp(s) => Pin::new(s).poll_write(cx, buf),
            TransportStream::Unix(s) => Pin::new(s).poll_write(cx, buf),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            TransportStream::Tcp(s) => Pin::new(s).poll_flush(cx),
            TransportStream::Unix(s) => Pin::new(s).poll_flush(cx),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            TransportStream::Tcp(s) => Pin::new(s).poll_shutdown(cx),
            TransportStream::Unix(s) => Pin::new(s).poll_shutdown(cx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn connects_tcp_bound_to_local_addr() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server_addr = listener.local_addr().unwrap();

        let accept = tokio::spawn(async move { listener.accept().await.unwrap() });
        let stream = Transport::Tcp
            .connect("127.0.0.1", server_addr.port(), Some("127.0.0.1"), None)
            .await
            .unwrap();
        let (_accepted, client_addr_seen_by_server) = accept.await.unwrap();

        match stream {
            TransportStream::Tcp(s) => {
                assert_eq!(s.peer_addr().unwrap(), server_addr);
                assert_eq!(s.local_addr().unwrap(), client_addr_seen_by_server);
                assert_eq!(s.local_addr().unwrap().ip().to_string(), "127.0.0.1");
            }
            TransportStream::Unix(_) => panic!("expected a TCP stream"),
        }
    }
}
