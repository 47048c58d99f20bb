//! Wordle A2A agent.
//!
//! Hosts independent Wordle games keyed by conversation context, reachable
//! through a JSON-RPC-over-HTTP protocol. The crate splits into a pure
//! scorer, a dictionary seam, a lock-guarded session store, the protocol
//! handler, and a thin Axum server around them.

pub mod dictionary;
pub mod error;
pub mod handler;
pub mod scorer;
pub mod server;
pub mod session;
pub mod types;

pub use dictionary::Dictionary;
pub use dictionary::WordList;
pub use error::A2AError;
pub use error::JsonRpcError;
pub use handler::WordleHandler;
pub use server::AgentCard;
pub use server::WordleServer;
pub use session::MAX_ATTEMPTS;
pub use session::SessionStore;
pub use session::WORD_LENGTH;
pub use types::JsonRpcResponse;
pub use types::TaskResult;
pub use types::TaskState;
