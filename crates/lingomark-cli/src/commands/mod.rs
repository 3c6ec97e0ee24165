pub mod correct;
pub mod init;
pub mod timer;
pub mod validate;
