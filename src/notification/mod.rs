pub mod logging;
pub mod sns;

pub use logging::LoggingPublisher;
pub use sns::SnsPublisher;
