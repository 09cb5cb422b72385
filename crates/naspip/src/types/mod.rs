pub mod network;
pub mod payload;
pub mod token;
