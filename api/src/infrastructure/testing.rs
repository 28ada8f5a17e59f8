//! In-memory store ports for exercising startup and shutdown without live databases.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::document_store::{DocumentConnector, DocumentStore};
use crate::application::ports::relational_store::{
    PoolSettings, RelationalConnector, RelationalStore,
};

#[derive(Debug, Default)]
pub struct FakeRelationalStore {
    pub fail_ping: bool,
    pub fail_close: bool,
    pub closes: AtomicUsize,
    pub closed: AtomicBool,
}

impl FakeRelationalStore {
    pub fn close_calls(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RelationalStore for FakeRelationalStore {
    async fn ping(&self) -> anyhow::Result<()> {
        if self.fail_ping || self.closed.load(Ordering::SeqCst) {
            anyhow::bail!("relational store unreachable");
        }
        Ok(())
    }

    async fn close(&self) -> anyhow::Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            anyhow::bail!("close refused");
        }
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Default)]
pub struct FakeRelationalConnector {
    pub fail: bool,
    pub store: Arc<FakeRelationalStore>,
    pub calls: AtomicUsize,
    pub last: Mutex<Option<(String, PoolSettings)>>,
}

impl FakeRelationalConnector {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_url(&self) -> Option<String> {
        self.last.lock().unwrap().as_ref().map(|(url, _)| url.clone())
    }

    pub fn last_pool(&self) -> Option<PoolSettings> {
        self.last.lock().unwrap().as_ref().map(|(_, pool)| *pool)
    }
}

#[async_trait]
impl RelationalConnector for FakeRelationalConnector {
    async fn open(
        &self,
        url: &str,
        pool: &PoolSettings,
    ) -> anyhow::Result<Arc<dyn RelationalStore>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((url.to_string(), *pool));
        if self.fail {
            anyhow::bail!("connection refused");
        }
        Ok(self.store.clone())
    }
}

#[derive(Debug, Default)]
pub struct FakeDocumentStore {
    pub fail_ping: bool,
    pub fail_disconnect: bool,
    pub ping_delay: Option<Duration>,
    pub pings: AtomicUsize,
    pub disconnects: AtomicUsize,
    pub disconnected: AtomicBool,
}

impl FakeDocumentStore {
    pub fn ping_calls(&self) -> usize {
        self.pings.load(Ordering::SeqCst)
    }

    pub fn disconnect_calls(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for FakeDocumentStore {
    async fn ping_primary(&self) -> anyhow::Result<()> {
        self.pings.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.ping_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_ping || self.is_disconnected() {
            anyhow::bail!("no primary available");
        }
        Ok(())
    }

    async fn disconnect(&self) -> anyhow::Result<()> {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        if self.fail_disconnect {
            anyhow::bail!("disconnect failed");
        }
        self.disconnected.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub enum DocumentBehaviour {
    #[default]
    Connect,
    FailConnect,
    SlowConnect(Duration),
    HangConnect,
}

#[derive(Debug, Default)]
pub struct FakeDocumentConnector {
    pub behaviour: DocumentBehaviour,
    pub store: Arc<FakeDocumentStore>,
    pub calls: AtomicUsize,
}

impl FakeDocumentConnector {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentConnector for FakeDocumentConnector {
    async fn connect(&self, _uri: &str) -> anyhow::Result<Arc<dyn DocumentStore>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behaviour {
            DocumentBehaviour::Connect => {}
            DocumentBehaviour::FailConnect => anyhow::bail!("server selection failed"),
            DocumentBehaviour::SlowConnect(delay) => tokio::time::sleep(delay).await,
            DocumentBehaviour::HangConnect => std::future::pending::<()>().await,
        }
        Ok(self.store.clone())
    }
}
