mod client;
mod domain;
mod user_info_url;

pub(crate) use user_info_url::*;

pub use client::*;
pub use domain::*;
