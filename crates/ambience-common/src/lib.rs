pub mod errors;
pub mod events;
pub mod types;

pub use errors::{AmbienceError, ConfigError, PlatformError, StoreError};
pub use events::{ChangeNotifier, PreferenceEvent, SubscriptionId};
pub use types::{BackgroundKind, BackgroundOption, RainConfig, ThemeMode};

pub type Result<T> = std::result::Result<T, AmbienceError>;
