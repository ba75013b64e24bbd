//! # Network (Raw TCP) Transport
//!
//! ESC/POS network printers listen on a bare TCP socket, usually port 9100
//! (the "JetDirect" port). There is no handshake and no response: the job is
//! the byte stream.
//!
//! ## Chunked Writes
//!
//! Large jobs (logos) are written in chunks so a slow printer can drain its
//! receive buffer between writes.

use std::io::Write;
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::{debug, info, warn};

use super::PrintSink;
use crate::error::{FichaError, Result};

/// Default raw printing port.
pub const DEFAULT_PORT: u16 = 9100;

/// Default connect/write timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Where the printer lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterTarget {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
}

impl PrinterTarget {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Parse `host` or `host:port` (IPv6 literals in brackets).
    ///
    /// ```
    /// use ficha::transport::PrinterTarget;
    ///
    /// let t = PrinterTarget::parse("192.168.1.50").unwrap();
    /// assert_eq!((t.host.as_str(), t.port), ("192.168.1.50", 9100));
    ///
    /// let t = PrinterTarget::parse("printer.lan:9101").unwrap();
    /// assert_eq!(t.port, 9101);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(FichaError::Config("printer address is empty".into()));
        }

        let (host, port) = if let Some(rest) = s.strip_prefix('[') {
            let (host, tail) = rest
                .split_once(']')
                .ok_or_else(|| FichaError::Config(format!("bad printer address '{}'", s)))?;
            (host, tail.strip_prefix(':'))
        } else {
            match s.rsplit_once(':') {
                Some((host, port)) if !host.contains(':') => (host, Some(port)),
                _ => (s, None),
            }
        };

        let port = match port {
            Some(p) => p
                .parse::<u16>()
                .map_err(|_| FichaError::Config(format!("bad printer port in '{}'", s)))?,
            None => DEFAULT_PORT,
        };

        if host.is_empty() {
            return Err(FichaError::Config(format!("printer address '{}' has no host", s)));
        }

        Ok(Self::new(host, port))
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn resolve(&self) -> Result<Vec<SocketAddr>> {
        let addrs: Vec<SocketAddr> = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| {
                FichaError::Printer(format!("Failed to resolve {}:{}: {}", self.host, self.port, e))
            })?
            .collect();
        if addrs.is_empty() {
            return Err(FichaError::Printer(format!(
                "{}:{} resolved to no addresses",
                self.host, self.port
            )));
        }
        Ok(addrs)
    }
}

impl std::fmt::Display for PrinterTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// # Network Printer Transport
///
/// An open TCP connection to an ESC/POS printer.
///
/// ## Example
///
/// ```no_run
/// use ficha::transport::{NetworkTransport, PrintSink, PrinterTarget};
/// use ficha::protocol::commands;
///
/// let mut transport = NetworkTransport::open(&PrinterTarget::parse("192.168.1.50")?)?;
/// transport.write_all(&commands::init())?;
/// transport.close()?;
///
/// # Ok::<(), ficha::error::FichaError>(())
/// ```
pub struct NetworkTransport {
    stream: Option<TcpStream>,
    peer: String,
    chunk_size: usize,
}

impl NetworkTransport {
    /// Connect to the printer, trying each resolved address in turn.
    pub fn open(target: &PrinterTarget) -> Result<Self> {
        let mut last_err = None;

        for addr in target.resolve()? {
            match TcpStream::connect_timeout(&addr, target.timeout) {
                Ok(stream) => {
                    stream.set_write_timeout(Some(target.timeout))?;
                    stream.set_nodelay(true)?;
                    info!(printer = %target, "connected to printer");
                    return Ok(Self {
                        stream: Some(stream),
                        peer: target.to_string(),
                        chunk_size: CHUNK_SIZE,
                    });
                }
                Err(e) => {
                    debug!(addr = %addr, error = %e, "printer connect attempt failed");
                    last_err = Some(e);
                }
            }
        }

        Err(FichaError::Printer(format!(
            "Failed to connect to {}: {}",
            target,
            last_err.map_or_else(|| "no address".to_string(), |e| e.to_string())
        )))
    }

    /// Set the chunk size for large writes. Default is 4096 bytes.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }
}

impl PrintSink for NetworkTransport {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| FichaError::Printer(format!("connection to {} is closed", self.peer)))?;

        for chunk in data.chunks(self.chunk_size) {
            stream
                .write_all(chunk)
                .map_err(|e| FichaError::Printer(format!("Write failed: {}", e)))?;
        }
        stream
            .flush()
            .map_err(|e| FichaError::Printer(format!("Flush failed: {}", e)))?;

        debug!(bytes = data.len(), printer = %self.peer, "sent print data");
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let Some(stream) = self.stream.take() else {
            return Ok(());
        };
        info!(printer = %self.peer, "closing printer connection");
        match stream.shutdown(Shutdown::Both) {
            Ok(()) => Ok(()),
            // Printer already hung up; the socket is gone either way
            Err(e) if e.kind() == std::io::ErrorKind::NotConnected => Ok(()),
            Err(e) => Err(FichaError::Printer(format!("Shutdown failed: {}", e))),
        }
    }
}

impl Drop for NetworkTransport {
    fn drop(&mut self) {
        if self.stream.is_some() {
            warn!(printer = %self.peer, "printer connection dropped without close");
            let _ = self.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn test_parse_target() {
        let t = PrinterTarget::parse("[::1]:9200").unwrap();
        assert_eq!((t.host.as_str(), t.port), ("::1", 9200));
        assert_eq!(t.to_string(), "[::1]:9200");

        let t = PrinterTarget::parse("::1").unwrap();
        assert_eq!((t.host.as_str(), t.port), ("::1", 9100));

        assert!(PrinterTarget::parse("printer:notaport").is_err());
        assert!(PrinterTarget::parse(":9100").is_err());
        assert!(PrinterTarget::parse("").is_err());
    }

    #[test]
    fn test_send_and_close() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = thread::spawn(move || {
            let (mut conn, _) = listener.accept().unwrap();
            let mut received = Vec::new();
            conn.read_to_end(&mut received).unwrap();
            received
        });

        let mut transport = NetworkTransport::open(&PrinterTarget::new("127.0.0.1", port)).unwrap();
        transport.set_chunk_size(3);
        transport.write_all(&[0x1B, 0x40, b'h', b'i', 0x0A]).unwrap();
        transport.close().unwrap();
        assert!(!transport.is_open());
        // Second close is a no-op
        transport.close().unwrap();

        assert_eq!(server.join().unwrap(), vec![0x1B, 0x40, b'h', b'i', 0x0A]);
    }

    #[test]
    fn test_write_after_close_fails() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let mut transport = NetworkTransport::open(&PrinterTarget::new("127.0.0.1", port)).unwrap();
        transport.close().unwrap();
        assert!(matches!(transport.write_all(b"x"), Err(FichaError::Printer(_))));
    }

    #[test]
    fn test_connect_refused() {
        // Bind then drop to get a port nobody listens on
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let target = PrinterTarget::new("127.0.0.1", port).timeout(Duration::from_millis(500));
        assert!(matches!(NetworkTransport::open(&target), Err(FichaError::Printer(_))));
    }
}
