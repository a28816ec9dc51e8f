pub mod error;
pub mod event;
pub mod projector;
pub mod query;
pub mod reconcile;

#[cfg(test)]
pub(crate) mod testing;
