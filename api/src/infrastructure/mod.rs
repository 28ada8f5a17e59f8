pub mod db;
pub mod docstore;

#[cfg(test)]
pub(crate) mod testing;
