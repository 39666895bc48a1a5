mod avatar;
mod blob_fetcher;
mod single_flight;
mod users;

pub use avatar::AvatarServiceImpl;
pub use blob_fetcher::BlobFetcher;
pub use single_flight::SingleFlight;
pub use users::UserServiceImpl;
