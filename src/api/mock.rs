//! In-process mock backend for client tests

use axum::Router;
use std::sync::Mutex;

use super::client::UnauthorizedHandler;
use crate::session::Route;

/// Serve `router` on an ephemeral local port; returns the `/api` base URL
pub(crate) async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}/api", addr)
}

/// Records every redirect the client asks for
#[derive(Debug, Default)]
pub(crate) struct RecordingHandler {
    redirects: Mutex<Vec<Route>>,
}

impl RecordingHandler {
    pub(crate) fn redirects(&self) -> Vec<Route> {
        self.redirects.lock().unwrap().clone()
    }
}

impl UnauthorizedHandler for RecordingHandler {
    fn on_unauthorized(&self, entry: Route) {
        self.redirects.lock().unwrap().push(entry);
    }
}
