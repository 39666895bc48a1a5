mod image_source;
mod mailer;

pub use image_source::HttpImageSource;
pub use mailer::HttpMailer;
