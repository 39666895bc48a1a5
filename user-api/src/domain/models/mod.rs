mod avatar;
mod ids;
mod mail;
mod user;

pub use avatar::*;
pub use ids::*;
pub use mail::*;
pub use user::*;
