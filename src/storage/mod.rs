pub(crate) mod cache;
pub(crate) mod signing;
pub(crate) mod store;
