pub mod aws;
pub mod config;
pub mod datastore;
pub mod handler;
pub mod notify;
pub mod record;
pub mod runtime;
pub mod storage;
