pub mod filesystem;
pub mod http;
pub mod moka;
pub mod postgres;
pub mod user_info;
