mod command_result;
pub mod init;
pub mod inject;

pub use command_result::*;
