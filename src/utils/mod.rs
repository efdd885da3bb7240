pub mod api_key_man;
pub mod logging;
pub mod transaction;
