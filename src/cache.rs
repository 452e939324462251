//! 解析结果缓存
//!
//! 每个属性只写入一次，之后既不覆盖也不删除。

use crate::registry::Value;
use dashmap::DashMap;

#[derive(Default)]
pub struct ResolutionCache {
    values: DashMap<String, Value>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取缓存值，不持有分片锁
    pub fn get(&self, name: &str) -> Option<Value> {
        self.values.get(name).map(|entry| entry.value().clone())
    }

    /// 写入一次；已存在时保留旧值并返回它
    pub fn insert_once(&self, name: &str, value: Value) -> Value {
        self.values
            .entry(name.to_string())
            .or_insert(value)
            .value()
            .clone()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 已解析的属性名，按字典序
    pub fn resolved_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.values.iter().map(|entry| entry.key().clone()).collect();
        names.sort_unstable();
        names
    }
}
