//! Context Container
//! 惰性、自引用的属性解析容器
//!
//! 给定属性名到解析函数的固定映射，[`Context`] 在首次读取时计算属性、
//! 之后返回缓存值，并检测解析函数之间的循环依赖。每个解析函数拿到的都是
//! 同一个句柄，可以通过它读取任何其他属性。
//!
//! ```
//! use context_container::{Context, ContextError, Registry};
//! use std::sync::Arc;
//!
//! let ctx = Context::new(
//!     Registry::new()
//!         .provide("greeting", |ctx: &Context| {
//!             let name = ctx.get::<String>("name")?;
//!             Ok(Arc::new(format!("Hello, {name}")))
//!         })
//!         .provide("name", |_| Ok(Arc::new("world".to_string()))),
//! );
//!
//! assert_eq!(*ctx.get::<String>("greeting")?, "Hello, world");
//! assert!(ctx.get_value("missing").unwrap_err().is_missing_provider());
//! # Ok::<(), ContextError>(())
//! ```

pub mod cache;
pub mod config;
pub mod context;
pub mod contract;
pub mod cycle;
pub mod error;
pub mod logging;
pub mod pending;
pub mod registry;
pub mod stats;

pub use config::ContainerConfig;
pub use context::{Context, WeakContext};
pub use cycle::PropertyState;
pub use error::{ConfigError, ContextError, ErrorKind, LoggingError};
pub use logging::{init_logging, LoggingConfig};
pub use pending::{pending, ready, Pending};
pub use registry::{Registry, Resolver, Value};
pub use stats::ContextStats;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
