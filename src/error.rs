//! 上下文容器错误定义
//!
//! 解析协议只产生三类错误：缺少提供者、循环依赖、解析函数自身的失败。
//! 类型化读取额外可能产生类型不匹配。

use std::path::PathBuf;
use thiserror::Error;

/// 错误类别判别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 请求的属性没有注册解析函数
    MissingProvider,
    /// 请求的属性已在当前解析路径上
    CircularDependency,
    /// 缓存的值与请求的类型不一致
    TypeMismatch,
    /// 解析函数返回的错误
    Resolver,
}

/// 上下文解析错误
#[derive(Debug, Error)]
pub enum ContextError {
    /// 服务未注册
    #[error("Missing provider for property: {property}")]
    MissingProvider { property: String },

    /// 循环依赖 - `chain` 为完整请求路径，末尾是重复出现的属性
    #[error("Circular dependency detected while resolving property \"{property}\"")]
    CircularDependency { property: String, chain: Vec<String> },

    /// 类型转换失败
    #[error("Property \"{property}\" does not hold a value of type {expected}")]
    TypeMismatch {
        property: String,
        expected: &'static str,
    },

    /// 解析函数失败，原样透传
    #[error(transparent)]
    Resolver(#[from] anyhow::Error),
}

impl ContextError {
    /// 将任意错误包装为解析函数错误
    pub fn resolver<E>(error: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        ContextError::Resolver(error.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ContextError::MissingProvider { .. } => ErrorKind::MissingProvider,
            ContextError::CircularDependency { .. } => ErrorKind::CircularDependency,
            ContextError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            ContextError::Resolver(_) => ErrorKind::Resolver,
        }
    }

    /// 触发错误的属性名（解析函数错误没有该信息）
    pub fn property(&self) -> Option<&str> {
        match self {
            ContextError::MissingProvider { property }
            | ContextError::CircularDependency { property, .. }
            | ContextError::TypeMismatch { property, .. } => Some(property),
            ContextError::Resolver(_) => None,
        }
    }

    /// 循环依赖的完整请求路径，例如 `[a, b, c, a]`
    pub fn chain(&self) -> Option<&[String]> {
        match self {
            ContextError::CircularDependency { chain, .. } => Some(chain),
            _ => None,
        }
    }

    /// 检测到循环时仍在解析中的祖先属性（不含重复出现的那一项）
    pub fn ancestors(&self) -> Option<&[String]> {
        self.chain()
            .map(|chain| &chain[..chain.len().saturating_sub(1)])
    }

    /// 从重复属性第一次出现的位置开始截取的环
    ///
    /// 路径 `x -> a -> b -> a` 的环是 `a -> b -> a`。
    pub fn cycle(&self) -> Option<&[String]> {
        match self {
            ContextError::CircularDependency { property, chain } => {
                let start = chain.iter().position(|p| p == property).unwrap_or(0);
                Some(&chain[start..])
            }
            _ => None,
        }
    }

    /// 人类可读的依赖链，例如 `Dependency chain: main -> settings -> main`
    pub fn dependency_chain(&self) -> Option<String> {
        self.chain()
            .map(|chain| format!("Dependency chain: {}", chain.join(" -> ")))
    }

    pub fn is_missing_provider(&self) -> bool {
        self.kind() == ErrorKind::MissingProvider
    }

    pub fn is_circular_dependency(&self) -> bool {
        self.kind() == ErrorKind::CircularDependency
    }
}

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid container configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// 日志初始化错误
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },
    #[error("A global tracing subscriber is already installed")]
    AlreadyInitialized,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle_error(property: &str, chain: &[&str]) -> ContextError {
        ContextError::CircularDependency {
            property: property.to_string(),
            chain: chain.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_missing_provider_message() {
        let err = ContextError::MissingProvider {
            property: "main".to_string(),
        };
        assert_eq!(err.to_string(), "Missing provider for property: main");
        assert_eq!(err.kind(), ErrorKind::MissingProvider);
        assert_eq!(err.property(), Some("main"));
        assert!(err.chain().is_none());
    }

    #[test]
    fn test_circular_dependency_diagnostics() {
        let err = cycle_error("main", &["main", "controller", "service", "main"]);
        assert_eq!(
            err.to_string(),
            "Circular dependency detected while resolving property \"main\""
        );
        assert_eq!(
            err.dependency_chain().as_deref(),
            Some("Dependency chain: main -> controller -> service -> main")
        );
        assert_eq!(err.ancestors().unwrap(), ["main", "controller", "service"]);
        assert_eq!(err.cycle().unwrap(), ["main", "controller", "service", "main"]);
    }

    #[test]
    fn test_cycle_skips_unrelated_ancestors() {
        let err = cycle_error("a", &["root", "a", "b", "a"]);
        assert_eq!(err.cycle().unwrap(), ["a", "b", "a"]);
        assert_eq!(err.chain().unwrap().len(), 4);
    }

    #[test]
    fn test_resolver_error_is_transparent() {
        let err = ContextError::resolver(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "settings.toml not found",
        ));
        assert_eq!(err.kind(), ErrorKind::Resolver);
        assert_eq!(err.to_string(), "settings.toml not found");
        assert!(err.property().is_none());
    }
}
