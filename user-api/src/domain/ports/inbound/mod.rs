mod avatar;
mod users;

pub use avatar::*;
pub use users::*;
