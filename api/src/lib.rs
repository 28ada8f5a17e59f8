// Module layout
// - bootstrap: configuration, handler context and listener startup
// - application: store ports and the connection open/close use cases
// - infrastructure: PostgreSQL and MongoDB adapters
// - presentation: HTTP handlers and routing

pub mod application;
pub mod bootstrap;
pub mod infrastructure;
pub mod presentation;
