//! 提供者注册表
//!
//! 属性名到解析函数的映射。注册表在交给 [`Context`](crate::Context) 之后
//! 不再改变，键集合即全部可解析的属性。

use crate::context::Context;
use crate::error::ContextError;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// 类型擦除后的属性值
pub type Value = Arc<dyn Any + Send + Sync>;

/// 类型擦除后的解析函数
pub type Resolver = Box<dyn Fn(&Context) -> Result<Value, ContextError> + Send + Sync>;

/// 属性注册信息
struct Provider {
    resolver: Resolver,
    type_name: &'static str,
}

/// 提供者注册表
#[derive(Default)]
pub struct Registry {
    providers: HashMap<String, Provider>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册属性解析函数
    ///
    /// 解析函数返回 `Arc<T>`。返回从 `ctx.get::<T>(..)` 拿到的 `Arc`
    /// 即把另一个属性的值原样转发，不会产生新的包装。
    pub fn provide<T, F>(mut self, name: impl Into<String>, resolver: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&Context) -> Result<Arc<T>, ContextError> + Send + Sync + 'static,
    {
        let resolver: Resolver = Box::new(move |ctx: &Context| resolver(ctx).map(|value| value as Value));
        self.providers.insert(
            name.into(),
            Provider {
                resolver,
                type_name: std::any::type_name::<T>(),
            },
        );
        self
    }

    pub fn lookup(&self, name: &str) -> Option<&Resolver> {
        self.providers.get(name).map(|p| &p.resolver)
    }

    /// 注册时声明的值类型名称（仅用于诊断）
    pub fn type_name(&self, name: &str) -> Option<&'static str> {
        self.providers.get(name).map(|p| p.type_name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// 已注册的属性名，按字典序
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.names().into_iter().map(|name| (name, self.providers[name].type_name)))
            .finish()
    }
}
