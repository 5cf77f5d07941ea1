//! HTTP server implementation

use crate::handlers::handle_request;
use bytes::Bytes;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Response;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info};

/// The verification service: stateless per request, so the accept loop
/// shares nothing between connections.
pub struct AuthServer;

impl AuthServer {
    pub fn new() -> Self {
        AuthServer
    }

    pub async fn serve(self, addr: SocketAddr) -> std::io::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        info!("dauth server listening on {}", addr);

        loop {
            let (stream, remote_addr) = listener.accept().await?;
            debug!("New connection from {}", remote_addr);

            tokio::spawn(async move {
                if let Err(err) = Self::handle_connection(stream).await {
                    error!("Connection error from {}: {}", remote_addr, err);
                }
            });
        }
    }

    async fn handle_connection(stream: TcpStream) -> hyper::Result<()> {
        let io = TokioIo::new(stream);
        let service = service_fn(|req| async move { handle_request(req).await });

        http1::Builder::new().serve_connection(io, service).await
    }
}

impl Default for AuthServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple HTTP response builder
pub fn simple_response(
    status: hyper::StatusCode,
    body: impl Into<String>,
) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .header("server", "dauth/0.1.0")
        .body(Full::new(Bytes::from(body.into())))
        .unwrap()
}
