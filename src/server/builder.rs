//! ServerBuilder for fluent API to build HTTP servers

use super::router::collection_router;
use crate::core::record::Record;
use crate::core::source::RecordSource;
use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for serving several collections from one router
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_collection::<Document, _>(InMemoryRecordStore::with_records(mock_documents(50)))
///     .with_collection::<User, _>(InMemoryRecordStore::with_records(mock_users(25)))
///     .build();
/// ```
pub struct ServerBuilder {
    collections: Vec<&'static str>,
    routers: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            collections: Vec::new(),
            routers: Vec::new(),
        }
    }

    /// Serve a collection of `R` records from `source`
    pub fn with_collection<R, S>(mut self, source: S) -> Self
    where
        R: Record,
        S: RecordSource<R> + 'static,
    {
        self.collections.push(R::resource_name());
        self.routers.push(collection_router::<R, S>(source));
        self
    }

    /// Names of the registered collections, in registration order
    pub fn collections(&self) -> &[&'static str] {
        &self.collections
    }

    /// Merge every registered router and add request tracing
    pub fn build(self) -> Router {
        self.routers
            .into_iter()
            .fold(Router::new(), |app, routes| app.merge(routes))
            .layer(TraceLayer::new_for_http())
    }

    /// Serve the application with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self, addr: &str) -> Result<()> {
        let collections = self.collections.join(", ");
        let app = self.build();
        let listener = TcpListener::bind(addr).await?;

        tracing::info!(%collections, "Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
