mod avatar;
mod users;

pub use users::PostgresUserRepository;
