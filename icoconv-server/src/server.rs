// ABOUTME: Blocking HTTP listener that feeds requests to the router from a fixed worker pool
// ABOUTME: Adapts tiny_http requests and responses, and turns handler panics into 500s

use crate::app::{App, HttpResponse, IncomingRequest};
use crate::constants::messages;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::{Method, StatusCode};
use std::io::{self, Cursor};
use std::net::SocketAddr;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use thiserror::Error;
use tiny_http::{Header, Request, Response, Server};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to listen on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to start worker thread: {0}")]
    Spawn(#[from] io::Error),
}

pub struct IconServer {
    server: Arc<Server>,
    app: Arc<App>,
}

impl IconServer {
    pub fn bind(app: App) -> Result<Self, ServerError> {
        let address = app.settings().address();
        let server = Server::http(address.as_str())
            .map_err(|source| ServerError::Bind { address, source })?;

        Ok(Self {
            server: Arc::new(server),
            app: Arc::new(app),
        })
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Start the worker pool and return immediately.
    pub fn spawn(self) -> Result<ServerHandle, ServerError> {
        let workers = self.app.settings().workers.max(1);
        let shutdown = Arc::new(AtomicBool::new(false));

        let handles = (0..workers)
            .map(|id| {
                let server = Arc::clone(&self.server);
                let app = Arc::clone(&self.app);
                let shutdown = Arc::clone(&shutdown);
                thread::Builder::new()
                    .name(format!("icoconv-worker-{}", id))
                    .spawn(move || worker_loop(&server, &app, &shutdown))
            })
            .collect::<io::Result<Vec<_>>>()?;

        match self.local_addr() {
            Some(addr) => log::info!("Listening on http://{} with {} workers", addr, workers),
            None => log::info!("Listening with {} workers", workers),
        }

        Ok(ServerHandle {
            server: self.server,
            shutdown,
            workers: handles,
        })
    }

    /// Serve until the process exits.
    pub fn run(self) -> Result<(), ServerError> {
        self.spawn()?.join();
        Ok(())
    }
}

pub struct ServerHandle {
    server: Arc<Server>,
    shutdown: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Stop accepting requests and wait for in-flight ones to finish.
    pub fn shutdown(self) {
        self.shutdown.store(true, Ordering::SeqCst);
        for _ in &self.workers {
            self.server.unblock();
        }
        self.join();
    }

    pub fn join(self) {
        for worker in self.workers {
            if worker.join().is_err() {
                log::error!("Worker thread exited with a panic");
            }
        }
    }
}

fn worker_loop(server: &Server, app: &App, shutdown: &AtomicBool) {
    loop {
        match server.recv() {
            Ok(request) => serve(app, request),
            Err(_) if shutdown.load(Ordering::SeqCst) => break,
            Err(e) => log::warn!("Failed to accept request: {}", e),
        }
    }
    log::debug!("Worker stopped");
}

fn serve(app: &App, mut request: Request) {
    let Ok(method) = Method::from_bytes(request.method().as_str().as_bytes()) else {
        let _ = request.respond(Response::empty(400));
        return;
    };
    let url = request.url().to_string();
    let headers = header_map(&request);
    let remote_addr = request.remote_addr().copied();

    let response = {
        let incoming = IncomingRequest {
            method,
            url,
            headers,
            remote_addr,
            body: Box::new(request.as_reader()),
        };
        panic::catch_unwind(AssertUnwindSafe(|| app.handle(incoming))).unwrap_or_else(|payload| {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            log::error!("Request handler panicked: {}", detail);
            HttpResponse::text(StatusCode::INTERNAL_SERVER_ERROR, messages::INTERNAL)
        })
    };

    if let Err(e) = request.respond(to_tiny(response)) {
        log::warn!("Failed to send response: {}", e);
    }
}

fn header_map(request: &Request) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for header in request.headers() {
        let name = HeaderName::from_bytes(header.field.as_str().as_str().as_bytes());
        let value = HeaderValue::from_bytes(header.value.as_str().as_bytes());
        if let (Ok(name), Ok(value)) = (name, value) {
            headers.append(name, value);
        }
    }
    headers
}

fn to_tiny(response: HttpResponse) -> Response<Cursor<Vec<u8>>> {
    let mut out = Response::from_data(response.body).with_status_code(response.status.as_u16());
    for (name, value) in response.headers.iter() {
        match Header::from_bytes(name.as_str().as_bytes(), value.as_bytes()) {
            Ok(header) => out.add_header(header),
            Err(_) => log::warn!("Skipping unencodable response header {}", name),
        }
    }
    out
}
