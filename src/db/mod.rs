use mongodb::{Client, Database, bson::doc};
use once_cell::sync::OnceCell;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::config::FailurePolicy;

/// The env var holding the full connection URI, read at connect time.
pub const MONGO_URI_VAR: &str = "MONGO_URI";

static CLIENT: OnceCell<Client> = OnceCell::new();

#[derive(Debug, Error)]
pub enum DbError {
    #[error("{0}")]
    Driver(#[from] mongodb::error::Error),
}

/// Open a MongoDB connection and verify it.
pub async fn connect(uri: &str) -> Result<Client, DbError> {
    let client = Client::with_uri_str(uri).await?;

    // The driver connects lazily, so ping to force server selection.
    // An unreachable or misconfigured deployment fails here instead of
    // on its first real query.
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await?;

    Ok(client)
}

/// Kick off the connection attempt without waiting on it.
///
/// The caller gets control back immediately; the outcome shows up later as
/// a single log line. On success the client lands in the process-global
/// cell behind [`client`]. On failure the configured policy decides whether
/// the process keeps running (the default) or exits.
pub fn spawn_connect(policy: FailurePolicy) -> JoinHandle<()> {
    tokio::spawn(async move {
        // An unset MONGO_URI is not checked for here: the empty string goes
        // through the same failure path as any other bad URI.
        let uri = std::env::var(MONGO_URI_VAR).unwrap_or_default();

        match connect(&uri).await {
            Ok(client) => {
                let _ = CLIENT.set(client);
                tracing::info!("DATABASE connected");
            }
            Err(err) => {
                tracing::error!("error : {}", err);
                if policy == FailurePolicy::Exit {
                    std::process::exit(1);
                }
            }
        }
    })
}

/// Shared client handle, `None` until a connect has succeeded.
pub fn client() -> Option<&'static Client> {
    CLIENT.get()
}

/// Get a database handle off the shared client.
pub fn database(name: &str) -> Option<Database> {
    client().map(|c| c.database(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_rejects_malformed_uri() {
        let err = connect("not a mongodb uri").await.unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[tokio::test]
    async fn test_connect_empty_uri_fails_like_any_other() {
        // The shape an unset MONGO_URI takes.
        assert!(connect("").await.is_err());
    }

    #[tokio::test]
    async fn test_connect_unreachable_host() {
        let uri = "mongodb://127.0.0.1:9/?serverSelectionTimeoutMS=300&connectTimeoutMS=200&directConnection=true";
        let err = connect(uri).await.unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[tokio::test]
    async fn test_spawn_connect_returns_before_outcome() {
        let handle = spawn_connect(FailurePolicy::Continue);
        // Nothing is published synchronously with the call.
        assert!(client().is_none());

        handle.await.unwrap();

        // No mongod in the test environment, so the attempt fails and the
        // cell stays empty under the default policy.
        assert!(client().is_none());
        assert!(database("app").is_none());
    }
}
