pub mod config;
pub mod cookbook;
pub mod error;
pub mod protocol;
pub mod recipe;
pub mod search;
pub mod server;
pub mod storage;
pub mod transport;
