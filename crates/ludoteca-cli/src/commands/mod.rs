pub mod init;
pub mod list;
pub mod play;
pub mod report;
pub mod select;
pub mod validate;
