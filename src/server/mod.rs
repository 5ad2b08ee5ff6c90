//! Blocking HTTP front end: a fixed pool of workers pulling requests from one listener.

pub(crate) mod payload;
pub(crate) mod routes;

use crate::foundation::error::{WheelError, WheelResult};
pub use routes::handle;
use routes::AppState;

/// Listener settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `0.0.0.0:8080`.
    pub addr: String,
    /// Number of request workers; at least one is always started.
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
            workers: num_cpus::get(),
        }
    }
}

/// Bind and serve until the listener fails. Each worker renders on its own canvas.
pub fn serve(config: &ServerConfig, state: AppState) -> WheelResult<()> {
    let server = tiny_http::Server::http(config.addr.as_str())
        .map_err(|e| WheelError::Other(anyhow::anyhow!("bind '{}': {e}", config.addr)))?;
    let workers = config.workers.max(1);
    tracing::info!(addr = %config.addr, workers, "listening");

    std::thread::scope(|s| {
        for id in 0..workers {
            let server = &server;
            let state = &state;
            s.spawn(move || worker_loop(id, server, state));
        }
    });
    Ok(())
}

fn worker_loop(id: usize, server: &tiny_http::Server, state: &AppState) {
    let mut rng = rand::rng();
    loop {
        let request = match server.recv() {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(worker = id, error = %e, "listener failed, worker stopping");
                return;
            }
        };

        let method = request.method().to_string();
        let url = request.url().to_string();
        let reply = routes::handle(state, &method, &url, &chrono::Local::now(), &mut rng);
        tracing::info!(worker = id, %method, %url, status = reply.status, "request");

        let mut response = tiny_http::Response::from_data(reply.body).with_status_code(reply.status);
        if let Ok(header) =
            tiny_http::Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes())
        {
            response = response.with_header(header);
        }
        if let Err(e) = request.respond(response) {
            tracing::warn!(worker = id, error = %e, "failed to send response");
        }
    }
}
