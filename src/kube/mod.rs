//! Kubernetes client module
//!
//! Handles connection to the Kubernetes API server and provides a
//! configured client plus the API coordinates for every exported kind.
//!
//! HTTP/HTTPS proxies are honoured through the standard `HTTP_PROXY`,
//! `HTTPS_PROXY` and `NO_PROXY` environment variables (kube `http-proxy`).

mod api;

pub use api::api_resource;

use anyhow::{Context, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};

/// Initialize and return a Kubernetes client
///
/// Uses the default kubeconfig loading strategy:
/// 1. In-cluster config (if running in a pod)
/// 2. KUBECONFIG environment variable
/// 3. ~/.kube/config
pub async fn create_client() -> Result<Client> {
    let config = Config::infer()
        .await
        .context("Failed to infer Kubernetes configuration")?;
    tracing::debug!("Using cluster endpoint {}", config.cluster_url);

    let client = Client::try_from(config)?;
    Ok(client)
}

/// Initialize a client for a named kubeconfig context
pub async fn create_client_for_context(context: &str) -> Result<Client> {
    let options = KubeConfigOptions {
        context: Some(context.to_string()),
        ..Default::default()
    };
    let config = Config::from_kubeconfig(&options)
        .await
        .with_context(|| format!("Failed to load kubeconfig context '{}'", context))?;
    tracing::debug!(
        "Using cluster endpoint {} for context {}",
        config.cluster_url,
        context
    );

    let client = Client::try_from(config)?;
    Ok(client)
}

/// Create a client, honouring an explicit context when given
pub async fn connect(context: Option<&str>) -> Result<Client> {
    match context {
        Some(ctx) => create_client_for_context(ctx).await,
        None => create_client().await,
    }
}

/// Get the current Kubernetes context name
///
/// Falls back to "in-cluster" when no kubeconfig can be read.
pub fn get_context() -> String {
    Kubeconfig::read()
        .ok()
        .and_then(|kubeconfig| kubeconfig.current_context)
        .unwrap_or_else(|| "in-cluster".to_string())
}
