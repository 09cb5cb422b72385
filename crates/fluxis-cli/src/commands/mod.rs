pub mod asset;
pub mod charge;
pub mod networks;
pub mod read;
