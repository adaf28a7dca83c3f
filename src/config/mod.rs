//! Configuration: settings, validation and the session builder.

mod builder;
mod error;
mod settings;

pub use builder::SessionBuilder;
pub use error::{ConfigError, Violation};
pub use settings::Settings;
