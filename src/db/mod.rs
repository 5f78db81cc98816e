pub mod connection;
#[cfg(test)]
pub(crate) mod interleaving_store;
pub mod memory_store;
pub mod mongo_store;
pub mod store;
