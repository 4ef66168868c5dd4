//! # TCP Transport
//!
//! Thin byte-stream shim over a tokio `TcpStream`, exposing the
//! connect/send/receive/close contract the protocol layer is written
//! against.
//!
//! A `Connection` is owned exclusively by one handshake for its whole
//! lifetime. `close` is idempotent and never fails observably; dropping an
//! unclosed connection releases the socket as well, so the resource is
//! freed on every exit path.

use crate::error::{BoltError, Result};
use bytes::Bytes;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadBuf};
use tokio::net::TcpStream;
use tracing::{debug, instrument};

fn closed() -> io::Error {
    io::Error::new(io::ErrorKind::NotConnected, "connection closed")
}

/// A live duplex byte stream to a Bolt server.
#[derive(Debug)]
pub struct Connection {
    stream: Option<TcpStream>,
}

impl Connection {
    /// Opens a TCP connection to `host:port`, bounded by `timeout`.
    ///
    /// # Errors
    /// Returns `BoltError::Timeout` if the attempt exceeds `timeout`, or a
    /// transport error if the connection is refused.
    #[instrument(skip(timeout))]
    pub async fn connect(host: &str, port: u16, timeout: Duration) -> Result<Self> {
        let stream = tokio::time::timeout(timeout, TcpStream::connect((host, port)))
            .await
            .map_err(|_| BoltError::Timeout)??;
        debug!(%host, port, "connection established");
        Ok(Self {
            stream: Some(stream),
        })
    }

    /// Wraps an already-connected stream.
    pub fn from_stream(stream: TcpStream) -> Self {
        Self {
            stream: Some(stream),
        }
    }

    /// Whether `close` has already been called.
    pub fn is_closed(&self) -> bool {
        self.stream.is_none()
    }

    /// Writes all of `payload` to the stream.
    ///
    /// # Errors
    /// Returns `BoltError::ConnectionClosed` on a closed connection, or the
    /// underlying transport error.
    pub async fn send(&mut self, payload: &[u8]) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(BoltError::ConnectionClosed)?;
        stream.write_all(payload).await?;
        Ok(())
    }

    /// Reads up to `max_len` bytes, returning whatever the server sent.
    ///
    /// # Errors
    /// Returns `BoltError::ConnectionClosed` on a closed connection or if
    /// the peer has shut down the stream.
    pub async fn receive(&mut self, max_len: usize) -> Result<Bytes> {
        let stream = self.stream.as_mut().ok_or(BoltError::ConnectionClosed)?;
        let mut buf = vec![0u8; max_len];
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            return Err(BoltError::ConnectionClosed);
        }
        buf.truncate(n);
        Ok(Bytes::from(buf))
    }

    /// Closes the connection. Safe to call more than once; a second call is
    /// a no-op, and shutdown failures are swallowed so cleanup never masks
    /// an earlier error.
    pub async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.shutdown().await.ok();
            debug!("connection closed");
        }
    }
}

// AsyncRead/AsyncWrite delegation lets the negotiator and `Framed` codecs
// drive a Connection directly. A closed connection fails with NotConnected.
impl AsyncRead for Connection {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.stream.as_mut() {
            Some(stream) => Pin::new(stream).poll_read(cx, buf),
            None => Poll::Ready(Err(closed())),
        }
    }
}

impl AsyncWrite for Connection {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match self.stream.as_mut() {
            Some(stream) => Pin::new(stream).poll_write(cx, buf),
            None => Poll::Ready(Err(closed())),
        }
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.stream.as_mut() {
            Some(stream) => Pin::new(stream).poll_flush(cx),
            None => Poll::Ready(Err(closed())),
        }
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.stream.as_mut() {
            Some(stream) => Pin::new(stream).poll_shutdown(cx),
            None => Poll::Ready(Ok(())),
        }
    }
}
