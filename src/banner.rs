//! Banner acquisition.
//!
//! Best-effort read of whatever a service says first. Opens its own
//! connection under the banner deadline, sends a minimal HTTP request so
//! web servers have something to answer, and reads once into a fixed
//! buffer. No drain loop, no retry.

use crate::error::BannerError;
use crate::types::Timing;
use serde::Serialize;
use std::io;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// Read capacity for a single banner.
pub const MAX_BANNER_BYTES: usize = 1024;

/// Raw banner data from one probe call. Transient: produced and consumed
/// within the call, never stored in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    bytes: Vec<u8>,
    truncated: bool,
}

impl Banner {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// True when the read filled the whole buffer and more data may have
    /// been waiting.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Lossy text rendering for display.
    pub fn to_text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Fetch the banner from `addr`, identifying as `host` in the request.
pub async fn fetch(addr: SocketAddr, host: &str, timing: Timing) -> Result<Banner, BannerError> {
    let deadline = timing.banner_timeout();

    let mut stream = match timeout(deadline, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) if e.kind() == io::ErrorKind::ConnectionRefused => {
            return Err(BannerError::Refused)
        }
        Ok(Err(e)) => return Err(BannerError::Io(e)),
        Err(_) => return Err(BannerError::TimedOut),
    };

    let request = format!("GET / HTTP/1.1\r\nHost: {host}\r\n\r\n");
    stream.write_all(request.as_bytes()).await?;

    let mut buffer = vec![0u8; MAX_BANNER_BYTES];
    let read = match timeout(deadline, stream.read(&mut buffer)).await {
        Ok(Ok(n)) => n,
        Ok(Err(e)) => return Err(BannerError::Io(e)),
        Err(_) => return Err(BannerError::TimedOut),
    };

    // EOF before any data: the peer accepted and hung up without speaking.
    if read == 0 {
        return Err(BannerError::Refused);
    }

    debug!(%addr, bytes = read, "banner read");
    buffer.truncate(read);
    Ok(Banner {
        truncated: read == MAX_BANNER_BYTES,
        bytes: buffer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::net::TcpListener;

    async fn serve_once(payload: &'static [u8]) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 512];
            let _ = socket.read(&mut request).await;
            socket.write_all(payload).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn test_reads_service_banner() {
        let addr = serve_once(b"HTTP/1.1 200 OK\r\nServer: httpd\r\n\r\n").await;
        let banner = fetch(addr, "localhost", Timing::default()).await.unwrap();

        assert!(banner.to_text().starts_with("HTTP/1.1 200 OK"));
        assert!(!banner.truncated());
    }

    #[tokio::test]
    async fn test_full_buffer_marks_truncated() {
        static BIG: [u8; MAX_BANNER_BYTES + 64] = [b'x'; MAX_BANNER_BYTES + 64];
        let addr = serve_once(&BIG).await;
        let banner = fetch(addr, "localhost", Timing::default()).await.unwrap();

        assert_eq!(banner.bytes().len(), MAX_BANNER_BYTES);
        assert!(banner.truncated());
    }

    #[tokio::test]
    async fn test_silent_peer_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let timing = Timing::from_secs(0.2).unwrap();
        let err = fetch(addr, "localhost", timing).await.unwrap_err();
        assert!(matches!(err, BannerError::TimedOut));
    }

    #[tokio::test]
    async fn test_refused_connection() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = fetch(addr, "localhost", Timing::default()).await.unwrap_err();
        assert!(matches!(err, BannerError::Refused | BannerError::TimedOut));
    }
}
