//! 上下文句柄与解析协议
//!
//! [`Context`] 是传给每个解析函数、也返回给外部调用方的同一个句柄。
//! 读取属性的流程：
//!
//! 1. 注册表中没有该属性 → [`ContextError::MissingProvider`]，不触碰缓存和解析栈
//! 2. 属性已在解析栈中 → [`ContextError::CircularDependency`]，携带完整请求路径
//! 3. 缓存命中 → 直接返回缓存值
//! 4. 否则标记解析中，调用解析函数，无论成败都先移除标记，成功时写入缓存
//!
//! 句柄只保证重入安全，不协调真正并行的多线程解析。

use crate::cache::ResolutionCache;
use crate::config::ContainerConfig;
use crate::cycle::{InFlightSet, PropertyState};
use crate::error::ContextError;
use crate::pending::Pending;
use crate::registry::{Registry, Value};
use crate::stats::{ContextStats, Counter, InnerStats};
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{debug, debug_span, trace, warn};

struct ContextInner {
    registry: Registry,
    cache: ResolutionCache,
    in_flight: InFlightSet,
    stats: InnerStats,
    config: ContainerConfig,
}

/// 自引用的上下文句柄
///
/// 克隆得到的是同一个句柄（[`Context::ptr_eq`] 为真），共享缓存和解析栈。
#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

impl Context {
    pub fn new(registry: Registry) -> Self {
        Self::with_config(registry, ContainerConfig::default())
    }

    pub fn with_config(registry: Registry, config: ContainerConfig) -> Self {
        debug!(
            container = %config.label,
            providers = registry.len(),
            "Context container created"
        );
        Self {
            inner: Arc::new(ContextInner {
                registry,
                cache: ResolutionCache::new(),
                in_flight: InFlightSet::new(),
                stats: InnerStats::default(),
                config,
            }),
        }
    }

    /// 读取属性的类型擦除值
    ///
    /// 返回解析函数产生的原始 `Arc`，不解包也不转换；对同一属性的后续读取
    /// 返回同一个分配。
    pub fn get_value(&self, name: &str) -> Result<Value, ContextError> {
        self.record(Counter::Request);

        let Some(resolver) = self.inner.registry.lookup(name) else {
            self.record(Counter::MissingProvider);
            warn!(container = %self.inner.config.label, property = name, "Missing provider");
            return Err(ContextError::MissingProvider {
                property: name.to_string(),
            });
        };

        if let Err(err) = self.inner.in_flight.check(name) {
            self.record_cycle(&err);
            return Err(err);
        }

        if let Some(value) = self.inner.cache.get(name) {
            self.record(Counter::CacheHit);
            trace!(container = %self.inner.config.label, property = name, "Cache hit");
            return Ok(value);
        }

        let span = debug_span!("resolve", container = %self.inner.config.label, property = name);
        let _entered = span.enter();

        let guard = match self.inner.in_flight.enter(name) {
            Ok(guard) => guard,
            Err(err) => {
                self.record_cycle(&err);
                return Err(err);
            }
        };

        self.record(Counter::Invocation);
        debug!(depth = self.inner.in_flight.depth(), "Invoking resolver");
        let result = resolver(self);
        // 标记必须在错误继续向上传播之前清除
        drop(guard);

        match result {
            Ok(value) => {
                let value = self.inner.cache.insert_once(name, value);
                debug!("Property resolved");
                Ok(value)
            }
            Err(err) => {
                self.record(Counter::ResolverFailure);
                debug!(error = %err, "Resolver failed");
                Err(err)
            }
        }
    }

    /// 按类型读取属性
    ///
    /// 值的类型与 `T` 不一致时返回 [`ContextError::TypeMismatch`]，已缓存的值保持不变。
    pub fn get<T>(&self, name: &str) -> Result<Arc<T>, ContextError>
    where
        T: Send + Sync + 'static,
    {
        self.get_value(name)?
            .downcast::<T>()
            .map_err(|_| ContextError::TypeMismatch {
                property: name.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// 读取一个待定值，返回可直接 `.await` 的句柄
    pub fn get_pending<T>(&self, name: &str) -> Result<Pending<T>, ContextError>
    where
        T: Clone + Send + Sync + 'static,
    {
        let pending = self.get::<Pending<T>>(name)?;
        Ok(pending.as_ref().clone())
    }

    /// 是否注册了该属性
    pub fn provides(&self, name: &str) -> bool {
        self.inner.registry.contains(name)
    }

    /// 是否已解析并缓存（不触发解析）
    pub fn is_resolved(&self, name: &str) -> bool {
        self.inner.cache.contains(name)
    }

    /// 属性的当前状态；未注册的属性返回 `None`
    pub fn state(&self, name: &str) -> Option<PropertyState> {
        if !self.provides(name) {
            None
        } else if self.inner.cache.contains(name) {
            Some(PropertyState::Resolved)
        } else if self.inner.in_flight.contains(name) {
            Some(PropertyState::InFlight)
        } else {
            Some(PropertyState::NotStarted)
        }
    }

    /// 当前正在解析的属性路径
    pub fn in_flight(&self) -> Vec<String> {
        self.inner.in_flight.snapshot()
    }

    /// 已缓存的属性名
    pub fn resolved(&self) -> Vec<String> {
        self.inner.cache.resolved_names()
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.inner.config
    }

    /// 两个句柄是否指向同一个容器
    pub fn ptr_eq(&self, other: &Context) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// 弱引用句柄
    ///
    /// 缓存值中保存强引用句柄会形成 `Arc` 环，容器永远不会释放。
    pub fn downgrade(&self) -> WeakContext {
        WeakContext {
            inner: Arc::downgrade(&self.inner),
        }
    }

    pub fn stats(&self) -> ContextStats {
        self.inner.stats.snapshot()
    }

    pub fn reset_stats(&self) {
        self.inner.stats.reset();
    }

    fn record(&self, counter: Counter) {
        if self.inner.config.collect_stats {
            self.inner.stats.record(counter);
        }
    }

    fn record_cycle(&self, err: &ContextError) {
        self.record(Counter::CircularDependency);
        warn!(
            container = %self.inner.config.label,
            chain = ?err.chain(),
            "{}",
            err
        );
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("label", &self.inner.config.label)
            .field("providers", &self.inner.registry.names())
            .field("resolved", &self.resolved())
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

/// [`Context`] 的弱引用
#[derive(Clone)]
pub struct WeakContext {
    inner: Weak<ContextInner>,
}

impl WeakContext {
    pub fn upgrade(&self) -> Option<Context> {
        self.inner.upgrade().map(|inner| Context { inner })
    }
}

impl fmt::Debug for WeakContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakContext")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}
