use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use shared::{error::NavError, protocol::ContentBlock};

/// Supplies renderable content for a route's content identifier. Calls may
/// suspend; a failure is reported as [`NavError::ContentUnavailable`].
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn get_content(&self, content_id: &str) -> Result<ContentBlock, NavError>;
}

/// Serves content from an in-memory map, optionally after a simulated delay.
#[derive(Debug, Clone, Default)]
pub struct StaticContentProvider {
    blocks: HashMap<String, ContentBlock>,
    latency: Duration,
}

impl StaticContentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_block(mut self, content_id: impl Into<String>, markup: impl Into<String>) -> Self {
        self.insert(content_id, markup);
        self
    }

    pub fn insert(&mut self, content_id: impl Into<String>, markup: impl Into<String>) {
        let content_id = content_id.into();
        self.blocks
            .insert(content_id.clone(), ContentBlock::new(content_id, markup));
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[async_trait]
impl ContentProvider for StaticContentProvider {
    async fn get_content(&self, content_id: &str) -> Result<ContentBlock, NavError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.blocks
            .get(content_id)
            .cloned()
            .ok_or_else(|| NavError::content_unavailable(content_id, "no content registered"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_registered_blocks() {
        let provider = StaticContentProvider::new().with_block("home", "<section>hi</section>");
        let block = provider.get_content("home").await.expect("home block");
        assert_eq!(block, ContentBlock::new("home", "<section>hi</section>"));
    }

    #[tokio::test]
    async fn missing_block_is_unavailable() {
        let provider = StaticContentProvider::new();
        let err = provider.get_content("blog").await.expect_err("missing");
        assert!(matches!(err, NavError::ContentUnavailable { ref content_id, .. } if content_id == "blog"));
    }

    #[tokio::test(start_paused = true)]
    async fn latency_suspends_before_returning() {
        let provider = StaticContentProvider::new()
            .with_block("home", "x")
            .with_latency(Duration::from_millis(300));
        let started = tokio::time::Instant::now();
        provider.get_content("home").await.expect("home block");
        assert!(started.elapsed() >= Duration::from_millis(300));
    }
}
