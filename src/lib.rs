pub mod cli;
pub mod codec;
pub mod config;
pub mod database;
pub mod error;

pub use codec::{decode, decode_bytes, encode, needs_quoting, StringArray};
pub use error::ArrayError;
