// Binance Pay client and its signing/error plumbing
pub mod binance;
pub mod error;
pub mod signer;
