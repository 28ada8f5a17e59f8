pub mod document_store;
pub mod relational_store;
