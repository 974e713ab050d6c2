//! A single-use transport connection for one request/response hop.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use native_tls::{HandshakeError, TlsConnector, TlsStream};

use super::response::{Headers, StatusLine, decode_body, decode_latin1};
use super::{FetchError, FetchStage};
use crate::url::Url;

/// Plaintext or TLS-wrapped TCP stream.
enum Stream {
    Plain(TcpStream),
    Tls(Box<TlsStream<TcpStream>>),
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Plain(stream) => stream.read(buf),
            Self::Tls(stream) => stream.read(buf),
        }
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(stream) => stream.write(buf),
            Self::Tls(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(stream) => stream.flush(),
            Self::Tls(stream) => stream.flush(),
        }
    }
}

/// An open connection to one host.
///
/// The stream is shut down when the connection is dropped, so every exit
/// from a fetch (success, redirect, or error) releases the socket.
pub(super) struct Connection {
    reader: BufReader<Stream>,
}

impl Connection {
    /// Connect to `url`'s host and port, negotiating TLS for `https`.
    ///
    /// `timeout` bounds each connect attempt, the handshake, and every read
    /// and write. Name resolution runs before any of these through the
    /// system resolver and is not bounded by it, so a stalled lookup delays
    /// the [`FetchError::Timeout`] by however long the resolver takes.
    pub(super) fn open(url: &Url, timeout: Duration) -> Result<Self, FetchError> {
        let tcp = connect(url.host(), url.port(), timeout)?;
        tcp.set_read_timeout(Some(timeout))
            .map_err(FetchError::Transport)?;
        tcp.set_write_timeout(Some(timeout))
            .map_err(FetchError::Transport)?;

        let stream = if url.scheme().is_secure() {
            Stream::Tls(Box::new(handshake(url.host(), tcp)?))
        } else {
            Stream::Plain(tcp)
        };

        Ok(Self {
            reader: BufReader::new(stream),
        })
    }

    /// Write the whole request and flush it.
    pub(super) fn send(&mut self, request: &str) -> Result<(), FetchError> {
        let stream = self.reader.get_mut();
        stream
            .write_all(request.as_bytes())
            .and_then(|()| stream.flush())
            .map_err(io_error(FetchStage::Request))
    }

    /// Read the status line and headers, stopping after the blank line (or
    /// at EOF).
    pub(super) fn read_head(&mut self) -> Result<(StatusLine, Headers), FetchError> {
        let status_line = self.read_line()?.ok_or(FetchError::EmptyResponse)?;
        let status_line = StatusLine::parse(&status_line)?;

        let mut headers = Headers::new();
        while let Some(line) = self.read_line()? {
            if line.is_empty() {
                break;
            }
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| FetchError::MalformedHeaderLine(line.clone()))?;
            headers.insert(name, value);
        }

        Ok((status_line, headers))
    }

    /// Read everything up to EOF and decode it.
    pub(super) fn read_body(&mut self) -> Result<String, FetchError> {
        let mut raw = Vec::new();
        match self.reader.read_to_end(&mut raw) {
            Ok(_) => {}
            // Servers that drop the TLS session without close_notify. The
            // bytes read so far are already in `raw`.
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => {}
            Err(error) => return Err(io_error(FetchStage::Body)(error)),
        }
        Ok(decode_body(raw))
    }

    /// Close the connection now instead of at the end of scope.
    pub(super) fn close(self) {
        drop(self);
    }

    /// One CRLF- or LF-terminated line with the terminator stripped, or
    /// `None` at EOF. Header bytes are ISO-8859-1.
    fn read_line(&mut self) -> Result<Option<String>, FetchError> {
        let mut line = Vec::new();
        let read = self
            .reader
            .read_until(b'\n', &mut line)
            .map_err(io_error(FetchStage::Head))?;
        if read == 0 {
            return Ok(None);
        }
        let line = decode_latin1(&line);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        match self.reader.get_mut() {
            Stream::Plain(stream) => {
                let _ = stream.shutdown(Shutdown::Both);
            }
            Stream::Tls(stream) => {
                let _ = stream.shutdown();
            }
        }
    }
}

/// Resolve `host:port` and try each address in turn.
fn connect(host: &str, port: u16, timeout: Duration) -> Result<TcpStream, FetchError> {
    let address = format!("{host}:{port}");
    let candidates = (host, port)
        .to_socket_addrs()
        .map_err(|source| FetchError::ConnectFailure {
            address: address.clone(),
            source,
        })?;

    let mut last_error = io::Error::new(io::ErrorKind::NotFound, "no addresses resolved");
    for candidate in candidates {
        log::debug!("connecting to {address} via {candidate}");
        match TcpStream::connect_timeout(&candidate, timeout) {
            Ok(stream) => return Ok(stream),
            Err(error) => last_error = error,
        }
    }

    if is_timeout(&last_error) {
        Err(FetchError::Timeout {
            stage: FetchStage::Connect,
        })
    } else {
        Err(FetchError::ConnectFailure {
            address,
            source: last_error,
        })
    }
}

/// Wrap `tcp` in TLS using the platform trust store, verifying the
/// certificate against `host`.
fn handshake(host: &str, tcp: TcpStream) -> Result<TlsStream<TcpStream>, FetchError> {
    let connector = TlsConnector::new().map_err(|error| FetchError::TlsFailure {
        host: host.to_string(),
        message: error.to_string(),
    })?;

    connector.connect(host, tcp).map_err(|error| match error {
        HandshakeError::Failure(error) => FetchError::TlsFailure {
            host: host.to_string(),
            message: error.to_string(),
        },
        // Blocking sockets only report this when the read timeout expires
        // mid-handshake.
        HandshakeError::WouldBlock(_) => FetchError::Timeout {
            stage: FetchStage::TlsHandshake,
        },
    })
}

fn is_timeout(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}

/// Classify an I/O error raised during `stage`.
fn io_error(stage: FetchStage) -> impl Fn(io::Error) -> FetchError {
    move |error| {
        if is_timeout(&error) {
            FetchError::Timeout { stage }
        } else {
            FetchError::Transport(error)
        }
    }
}
