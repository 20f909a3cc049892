pub mod catalog;
pub(crate) mod common;
pub mod hybrid;
pub mod merge;
pub mod network;
