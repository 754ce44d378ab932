//! Resolution engine for confres
//!
//! - [`resolver`]: choose the winning option of a configuration
//! - [`ReferenceResolver`]: substitute `$ref:` entries from global configurations
//! - [`SelectorCache`]: memoize results per configuration
//! - [`ConfigurationConsumer`]: the resolution API over a repository

pub mod cache;
pub mod consumer;
pub mod error;
pub mod reference;
pub mod resolver;
pub mod retry;
pub mod source;

pub use cache::{CacheSettings, CacheStats, SelectorCache};
pub use consumer::{ConfigurationConsumer, ConfigurationConsumerBuilder};
pub use error::{Error, Result};
pub use reference::ReferenceResolver;
pub use resolver::{resolve, select_option};
pub use retry::RetryConfig;
pub use source::ParameterSource;
