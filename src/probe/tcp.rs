//! TCP connect transport.
//!
//! Performs a full connection-establishment handshake through the operating
//! system's socket API. An established connection is dropped immediately;
//! the probe never keeps it alive.

use super::transport::{ConnectFailure, Transport};
use async_trait::async_trait;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Production transport over `tokio::net::TcpStream`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpTransport;

#[async_trait]
impl Transport for TcpTransport {
    async fn connect(&self, addr: SocketAddr, deadline: Duration) -> Result<(), ConnectFailure> {
        match timeout(deadline, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                drop(stream);
                Ok(())
            }
            Ok(Err(e)) => Err(map_io_error(e)),
            Err(_) => Err(ConnectFailure::TimedOut),
        }
    }
}

fn map_io_error(e: io::Error) -> ConnectFailure {
    match e.kind() {
        io::ErrorKind::ConnectionRefused => ConnectFailure::Refused,
        io::ErrorKind::TimedOut => ConnectFailure::TimedOut,
        io::ErrorKind::HostUnreachable | io::ErrorKind::NetworkUnreachable => {
            ConnectFailure::Unreachable
        }
        _ => ConnectFailure::Other(e.to_string()),
    }
}
