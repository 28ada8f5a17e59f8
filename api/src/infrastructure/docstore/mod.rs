use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use mongodb::Client;
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, ReadPreference, SelectionCriteria};

use crate::application::ports::document_store::{DocumentConnector, DocumentStore};
use crate::application::use_cases::connections::DOCUMENT_STORE_TIMEOUT;

pub const APP_NAME: &str = "commerce-api";

/// Parses the URI and caps the driver's own connect and server-selection
/// waits at `timeout` unless the URI already sets them.
pub async fn client_options(uri: &str, timeout: Duration) -> anyhow::Result<ClientOptions> {
    let mut options = ClientOptions::parse(uri)
        .await
        .context("mongo_uri_invalid")?;
    options.app_name.get_or_insert_with(|| APP_NAME.to_string());
    options.connect_timeout.get_or_insert(timeout);
    options.server_selection_timeout.get_or_insert(timeout);
    Ok(options)
}

pub struct MongoDocumentStore {
    pub client: Client,
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    async fn ping_primary(&self) -> anyhow::Result<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .selection_criteria(SelectionCriteria::ReadPreference(ReadPreference::Primary))
            .await
            .context("mongo_ping")?;
        Ok(())
    }

    async fn disconnect(&self) -> anyhow::Result<()> {
        self.client.clone().shutdown().await;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MongoConnector {
    pub timeout: Duration,
}

impl Default for MongoConnector {
    fn default() -> Self {
        Self {
            timeout: DOCUMENT_STORE_TIMEOUT,
        }
    }
}

#[async_trait]
impl DocumentConnector for MongoConnector {
    async fn connect(&self, uri: &str) -> anyhow::Result<Arc<dyn DocumentStore>> {
        let options = client_options(uri, self.timeout).await?;
        let client = Client::with_options(options).context("mongo_client")?;
        Ok(Arc::new(MongoDocumentStore { client }))
    }
}
