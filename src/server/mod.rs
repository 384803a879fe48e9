//! HTTP server
//!
//! | Route | Method | Response |
//! |-------|--------|----------|
//! | `/` | GET | liveness text |
//! | `/health` | GET | `{status, service}` |
//! | `/upload` | POST | `{ipfsHash}` |
//! | `/docs/:walletAddress` | GET | `{docs: [{name, ipfsHash, uploadedAt}]}` |
//! | `/docs/:walletAddress/:ipfsHash` | DELETE | `{success: true}` |

mod routes;

pub use routes::{create_router, create_router_with_limit, ApiError, AppState};

use std::sync::Arc;
use tracing::{debug, info};

use crate::config::VaultConfig;
use crate::error::StartupError;
use crate::runtime::Shutdown;
use crate::vault::Vault;

/// Bind the configured port and serve until `shutdown` fires.
pub async fn serve(config: &VaultConfig, vault: Arc<Vault>, shutdown: Shutdown) -> Result<(), StartupError> {
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;

    info!("DigiDock server listening on http://{}", addr);
    debug!("  GET    /                        - Liveness");
    debug!("  GET    /health                  - Health check");
    debug!("  POST   /upload                  - Pin and record a document");
    debug!("  GET    /docs/:wallet            - List documents");
    debug!("  DELETE /docs/:wallet/:ipfsHash  - Unpin and remove a document");

    let router = create_router_with_limit(vault, config.body_limit);
    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.wait().await })
        .await
        .map_err(StartupError::Serve)?;

    info!("server stopped");
    Ok(())
}
