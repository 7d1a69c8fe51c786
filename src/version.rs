//! Web-server version probe.
//!
//! Issues an HTTP HEAD request against port 80 and extracts the `Server`
//! response header. A secondary probe, independent of the scanning path;
//! it only shares the resolver.

use crate::error::VersionError;
use crate::types::Timing;
use std::io;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// The port this probe targets.
pub const HTTP_PORT: u16 = 80;

/// Upper bound on response bytes read while hunting for the header block.
const MAX_HEAD_BYTES: usize = 8192;

/// Fetch the `Server` header value from the HTTP endpoint at `addr`.
pub async fn fetch(addr: SocketAddr, host: &str, timing: Timing) -> Result<String, VersionError> {
    let deadline = timing.connect_timeout();

    let mut stream = match timeout(deadline, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) if e.kind() == io::ErrorKind::ConnectionRefused => {
            return Err(VersionError::Refused)
        }
        Ok(Err(e)) => return Err(VersionError::Io(e)),
        Err(_) => return Err(VersionError::TimedOut),
    };

    let request = format!("HEAD / HTTP/1.1\r\nHost: {host}\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await?;

    let mut response = Vec::with_capacity(1024);
    let mut chunk = [0u8; 512];
    loop {
        let read = match timeout(deadline, stream.read(&mut chunk)).await {
            Ok(Ok(0)) => break,
            Ok(Ok(n)) => n,
            Ok(Err(e)) => return Err(VersionError::Io(e)),
            Err(_) if response.is_empty() => return Err(VersionError::TimedOut),
            Err(_) => break,
        };
        response.extend_from_slice(&chunk[..read]);
        if header_block_complete(&response) || response.len() >= MAX_HEAD_BYTES {
            break;
        }
    }

    debug!(%addr, bytes = response.len(), "version probe response");
    parse_server_header(&response)
}

fn header_block_complete(response: &[u8]) -> bool {
    response.windows(4).any(|window| window == b"\r\n\r\n")
}

/// Pull the `Server` value out of a raw HTTP response head.
fn parse_server_header(response: &[u8]) -> Result<String, VersionError> {
    let text = String::from_utf8_lossy(response);
    let mut lines = text.lines();

    let status = lines.next().ok_or(VersionError::Malformed)?;
    if !status.starts_with("HTTP/") {
        return Err(VersionError::Malformed);
    }

    for line in lines {
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("server") {
                return Ok(value.trim().to_string());
            }
        }
    }

    Err(VersionError::MissingServerHeader)
}
