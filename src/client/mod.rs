//! # Client Library
//!
//! Everything a chat UI needs to talk to the backend:
//!
//! - `api.rs`: `ApiClient` over the REST family
//! - `state.rs`: `ClientState`, the in-memory cache the UI renders from
//! - `optimistic.rs`: delivery state machine for outgoing messages
//! - `persist.rs`: the persisted session slice
//! - `error.rs`: `ClientError`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use yapyap::client::{ApiClient, ClientState, SessionFile};
//! use yapyap::shared::AppConfig;
//!
//! # async fn example() -> Result<(), yapyap::client::ClientError> {
//! let config = AppConfig::default();
//! let session = SessionFile::from_config(&config);
//! let mut state = session.load()?.map(ClientState::restore).unwrap_or_default();
//!
//! let api = ApiClient::new(config).with_token("...");
//! let messages = api.get_chat_messages("chat-id", Some(20), None).await?;
//! state.set_messages("chat-id", messages);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod optimistic;
pub mod persist;
pub mod state;

pub use api::ApiClient;
pub use error::ClientError;
pub use optimistic::{ClientMessage, DeliveryStatus};
pub use persist::SessionFile;
pub use state::{ClientState, PersistedSession};
