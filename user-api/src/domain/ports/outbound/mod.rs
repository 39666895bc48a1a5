mod avatar;
mod blob_store;
mod cache_store;
mod image_source;
mod mailer;
#[cfg(test)]
mod mock;
mod user_info;
mod users;

pub use avatar::*;
pub use blob_store::*;
pub use cache_store::*;
pub use image_source::*;
pub use mailer::*;
#[cfg(test)]
pub use mock::*;
pub use user_info::*;
pub use users::*;
