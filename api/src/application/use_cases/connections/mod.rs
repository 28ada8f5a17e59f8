pub mod close_connections;
pub mod open_connections;

pub use close_connections::{CloseConnections, CloseOutcome, CloseReport};
pub use open_connections::{
    ConnectionBundle, DOCUMENT_STORE_TIMEOUT, OpenConnections, OpenConnectionsError,
};
