//! 容器统计信息

use std::sync::atomic::{AtomicU64, Ordering};

/// 内部容器统计信息（原子计数器）
#[derive(Debug, Default)]
pub(crate) struct InnerStats {
    total_requests: AtomicU64,
    cache_hits: AtomicU64,
    resolver_invocations: AtomicU64,
    resolver_failures: AtomicU64,
    missing_provider_errors: AtomicU64,
    circular_dependency_errors: AtomicU64,
}

/// 计数器类别
#[derive(Debug, Clone, Copy)]
pub(crate) enum Counter {
    Request,
    CacheHit,
    Invocation,
    ResolverFailure,
    MissingProvider,
    CircularDependency,
}

impl InnerStats {
    pub(crate) fn record(&self, counter: Counter) {
        let slot = match counter {
            Counter::Request => &self.total_requests,
            Counter::CacheHit => &self.cache_hits,
            Counter::Invocation => &self.resolver_invocations,
            Counter::ResolverFailure => &self.resolver_failures,
            Counter::MissingProvider => &self.missing_provider_errors,
            Counter::CircularDependency => &self.circular_dependency_errors,
        };
        slot.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> ContextStats {
        ContextStats {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            resolver_invocations: self.resolver_invocations.load(Ordering::Relaxed),
            resolver_failures: self.resolver_failures.load(Ordering::Relaxed),
            missing_provider_errors: self.missing_provider_errors.load(Ordering::Relaxed),
            circular_dependency_errors: self.circular_dependency_errors.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn reset(&self) {
        for slot in [
            &self.total_requests,
            &self.cache_hits,
            &self.resolver_invocations,
            &self.resolver_failures,
            &self.missing_provider_errors,
            &self.circular_dependency_errors,
        ] {
            slot.store(0, Ordering::Relaxed);
        }
    }
}

/// 容器统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextStats {
    /// 总读取次数（含失败）
    pub total_requests: u64,
    /// 缓存命中次数
    pub cache_hits: u64,
    /// 解析函数调用次数
    pub resolver_invocations: u64,
    /// 解析函数返回错误的次数
    pub resolver_failures: u64,
    /// 缺少提供者错误次数
    pub missing_provider_errors: u64,
    /// 循环依赖错误次数
    pub circular_dependency_errors: u64,
}

impl ContextStats {
    /// 缓存命中率（小数形式）
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.cache_hits + self.resolver_invocations;
        if lookups == 0 {
            0.0
        } else {
            self.cache_hits as f64 / lookups as f64
        }
    }

    /// 获取性能指标摘要
    pub fn summary(&self) -> String {
        format!(
            "Context: {} requests, {:.1}% cache hit rate, {} resolver invocations ({} failed), {} missing providers, {} cycles",
            self.total_requests,
            self.hit_rate() * 100.0,
            self.resolver_invocations,
            self.resolver_failures,
            self.missing_provider_errors,
            self.circular_dependency_errors
        )
    }
}
