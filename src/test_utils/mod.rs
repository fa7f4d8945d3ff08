pub mod catalog;
pub mod fake_fs;
pub mod log;
pub mod server;
pub mod temp;
