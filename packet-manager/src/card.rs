//! Identity card generation helper.
//!
//! Wraps an external PDF rendering collaborator. Rendering failures are
//! deliberately non-fatal: the generator logs the error and returns an
//! empty output so downstream stages can detect and reprocess, instead of
//! failing the whole pipeline.

use async_trait::async_trait;
use packet_core::PacketResult;
use std::sync::Arc;

/// The kind of identity card being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    /// Full UIN card.
    Uin,
    /// Card showing a masked UIN.
    MaskedUin,
}

/// External rendering collaborator. Knows how to turn card template bytes
/// into a final PDF; transport and engine are its own concern.
#[async_trait]
pub trait CardRenderer: Send + Sync {
    async fn render(&self, input: &[u8]) -> PacketResult<Vec<u8>>;
}

/// Card generator with a degraded-but-non-fatal error policy.
pub struct CardGenerator {
    renderer: Arc<dyn CardRenderer>,
}

impl CardGenerator {
    pub fn new(renderer: Arc<dyn CardRenderer>) -> Self {
        Self { renderer }
    }

    /// Render a card. An I/O failure during generation yields an empty
    /// buffer plus an error log rather than propagating.
    pub async fn generate(&self, input: &[u8], kind: CardKind) -> Vec<u8> {
        match self.renderer.render(input).await {
            Ok(output) => output,
            Err(error) => {
                tracing::error!(kind = ?kind, error = %error, "card rendering failed");
                Vec::new()
            }
        }
    }
}
