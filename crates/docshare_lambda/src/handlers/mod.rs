pub mod login;
pub mod upload;
