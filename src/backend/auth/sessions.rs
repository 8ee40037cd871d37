/**
 * Session Tokens
 *
 * Opaque bearer tokens: 32 random bytes, hex encoded, mapped to a user ID and
 * an expiry instant. The mapping lives behind the `TokenStore` trait so the
 * backing store can be swapped; `MemoryTokenStore` keeps it for the lifetime
 * of the process.
 *
 * Expiry is lazy. There is no sweeper; an expired token is deleted the next
 * time someone tries to use it.
 */

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use tokio::sync::RwLock;

/// Number of random bytes in a token (hex encoding doubles the length)
pub const TOKEN_BYTES: usize = 32;

/// What a token resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}

impl TokenRecord {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Key/value capability backing the token registry
///
/// `delete` of a missing key must succeed silently.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn get(&self, token: &str) -> Option<TokenRecord>;
    async fn set(&self, token: String, record: TokenRecord);
    async fn delete(&self, token: &str);
}

/// Process-lifetime token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<HashMap<String, TokenRecord>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tokens currently held, expired ones included
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self, token: &str) -> Option<TokenRecord> {
        self.tokens.read().await.get(token).cloned()
    }

    async fn set(&self, token: String, record: TokenRecord) {
        self.tokens.write().await.insert(token, record);
    }

    async fn delete(&self, token: &str) {
        self.tokens.write().await.remove(token);
    }
}

/// Why a token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    Missing,
    Unknown,
    Expired,
}

/// Issues and validates bearer tokens
#[derive(Clone)]
pub struct TokenRegistry {
    store: Arc<dyn TokenStore>,
    ttl: Duration,
}

impl TokenRegistry {
    pub fn new(store: Arc<dyn TokenStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Registry backed by a fresh `MemoryTokenStore`
    pub fn in_memory(ttl: Duration) -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()), ttl)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Generate a new token for `user_id` and store it with the configured TTL
    pub async fn issue(&self, user_id: &str) -> String {
        let token = generate_token();
        let record = TokenRecord {
            user_id: user_id.to_string(),
            expires_at: Utc::now()
                .checked_add_signed(self.ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        self.store.set(token.clone(), record).await;
        tracing::debug!(user_id, "Issued session token");
        token
    }

    /// Resolve a token to its user ID
    ///
    /// Expired tokens are deleted on detection, so a second attempt reports
    /// `Unknown` rather than `Expired`.
    pub async fn validate(&self, token: &str) -> Result<String, TokenRejection> {
        if token.is_empty() {
            return Err(TokenRejection::Missing);
        }

        let record = self.store.get(token).await.ok_or(TokenRejection::Unknown)?;

        if record.is_expired(Utc::now()) {
            self.store.delete(token).await;
            tracing::debug!(user_id = %record.user_id, "Removed expired session token");
            return Err(TokenRejection::Expired);
        }

        Ok(record.user_id)
    }

    /// Delete a token; unknown tokens are ignored
    pub async fn revoke(&self, token: &str) {
        self.store.delete(token).await;
    }
}

/// 32 random bytes, hex encoded
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
