pub mod backup;
pub mod certify;
pub mod config;
pub mod db;
pub mod driver;
pub mod export;
pub mod form;
pub mod init;
pub mod log;
pub mod logs;
pub mod sync;
