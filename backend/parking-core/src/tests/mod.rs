mod config;
mod key_store;
mod parser;
mod storage;
