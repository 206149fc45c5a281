//! Socket sink for remote logging
//!
//! Sends record payloads over a connected UNIX stream socket, TCP stream or
//! UDP datagram socket. Payloads are opaque bytes; no framing is added.

use crate::core::{LoggerError, Result, Sink};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpStream, UdpSocket};
use std::time::Duration;

#[cfg(unix)]
use std::os::unix::net::UnixStream;

/// Longest UNIX socket path accepted, in bytes (size of `sun_path`).
pub const MAX_UNIX_SOCKET_PATH: usize = 108;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const WRITE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Tcp,
    Udp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => f.write_str("tcp"),
            Protocol::Udp => f.write_str("udp"),
        }
    }
}

#[derive(Debug)]
enum Connection {
    #[cfg(unix)]
    Unix(UnixStream),
    Tcp(TcpStream),
    Udp(UdpSocket),
}

/// Connected socket owned by the logger configuration.
///
/// # Example
///
/// ```no_run
/// use rust_sink_logger::sinks::{Protocol, SocketSink};
///
/// let sink = SocketSink::connect("127.0.0.1", 1234, Protocol::Tcp)
///     .expect("Failed to connect to log server");
/// ```
#[derive(Debug)]
pub struct SocketSink {
    connection: Connection,
    address: String,
}

impl SocketSink {
    /// Connect to a UNIX domain stream socket.
    ///
    /// # Errors
    ///
    /// [`LoggerError::SocketPathTooLong`] if `path` is longer than
    /// [`MAX_UNIX_SOCKET_PATH`], [`LoggerError::SocketConnect`] if nothing
    /// accepts connections there.
    #[cfg(unix)]
    pub fn connect_unix(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let len = path.as_os_str().len();
        if len > MAX_UNIX_SOCKET_PATH {
            return Err(LoggerError::SocketPathTooLong {
                len,
                max: MAX_UNIX_SOCKET_PATH,
            });
        }

        let address = path.display().to_string();
        let stream =
            UnixStream::connect(path).map_err(|e| LoggerError::socket_connect(&address, e))?;
        stream
            .set_write_timeout(Some(WRITE_TIMEOUT))
            .map_err(|e| LoggerError::socket_connect(&address, e))?;

        Ok(Self {
            connection: Connection::Unix(stream),
            address,
        })
    }

    /// Connect to `addr:port`, where `addr` is an IPv4 or IPv6 literal.
    ///
    /// For UDP the socket is bound to an ephemeral local port and connected,
    /// so every payload becomes one datagram to the peer.
    pub fn connect(addr: &str, port: u16, protocol: Protocol) -> Result<Self> {
        let ip: IpAddr = addr
            .trim()
            .parse()
            .map_err(|_| LoggerError::invalid_address(addr))?;
        let peer = SocketAddr::new(ip, port);
        let address = format!("{}://{}", protocol, peer);

        let connection = match protocol {
            Protocol::Tcp => {
                let stream = TcpStream::connect_timeout(&peer, CONNECT_TIMEOUT)
                    .map_err(|e| LoggerError::socket_connect(&address, e))?;
                stream
                    .set_write_timeout(Some(WRITE_TIMEOUT))
                    .and_then(|()| stream.set_nodelay(true))
                    .map_err(|e| LoggerError::socket_connect(&address, e))?;
                Connection::Tcp(stream)
            }
            Protocol::Udp => {
                let local: IpAddr = match ip {
                    IpAddr::V4(_) => Ipv4Addr::UNSPECIFIED.into(),
                    IpAddr::V6(_) => Ipv6Addr::UNSPECIFIED.into(),
                };
                let socket = UdpSocket::bind(SocketAddr::new(local, 0))
                    .and_then(|socket| socket.connect(peer).map(|()| socket))
                    .map_err(|e| LoggerError::socket_connect(&address, e))?;
                socket
                    .set_write_timeout(Some(WRITE_TIMEOUT))
                    .map_err(|e| LoggerError::socket_connect(&address, e))?;
                Connection::Udp(socket)
            }
        };

        Ok(Self {
            connection,
            address,
        })
    }

    /// Human-readable peer description, e.g. `tcp://127.0.0.1:1234`.
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl Sink for SocketSink {
    fn write_payload(&self, payload: &[u8]) -> Result<()> {
        match &self.connection {
            #[cfg(unix)]
            Connection::Unix(stream) => (&*stream).write_all(payload)?,
            Connection::Tcp(stream) => (&*stream).write_all(payload)?,
            Connection::Udp(socket) => {
                let sent = socket.send(payload)?;
                if sent != payload.len() {
                    return Err(LoggerError::writer(format!(
                        "short datagram write: {} of {} bytes",
                        sent,
                        payload.len()
                    )));
                }
            }
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        match &self.connection {
            #[cfg(unix)]
            Connection::Unix(stream) => (&*stream).flush()?,
            Connection::Tcp(stream) => (&*stream).flush()?,
            Connection::Udp(_) => {}
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "socket"
    }
}
