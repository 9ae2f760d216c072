pub mod api;
pub mod config;
pub mod draft;
pub mod export;
pub mod ipc;
pub mod model;
pub mod notify;
pub mod pages;
pub mod shell;
pub mod table;
