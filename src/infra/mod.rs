pub mod analyzer;
pub mod db;
pub mod logging;
pub mod storage;
