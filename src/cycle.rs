//! 循环依赖检测
//!
//! 记录当前调用路径上正在解析的属性（按请求顺序）。进入解析时压栈，
//! 离开时由 [`InFlightGuard`] 在任何退出路径上出栈，包括错误和 panic。

use crate::error::ContextError;
use parking_lot::Mutex;

/// 单个属性的解析状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyState {
    /// 尚未开始，或上次解析失败
    NotStarted,
    /// 正在当前路径上解析
    InFlight,
    /// 已解析并缓存，终态
    Resolved,
}

/// 正在解析的属性栈
#[derive(Debug, Default)]
pub struct InFlightSet {
    stack: Mutex<Vec<String>>,
}

impl InFlightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 标记属性进入解析
    ///
    /// 属性已在栈中时返回循环依赖错误，链路为当前完整路径加上重复的属性；
    /// 栈保持不变，祖先的标记仍归各自的外层调用所有。
    pub fn enter(&self, name: &str) -> Result<InFlightGuard<'_>, ContextError> {
        let mut stack = self.stack.lock();
        Self::ensure_absent(&stack, name)?;
        stack.push(name.to_string());
        Ok(InFlightGuard {
            set: self,
            name: name.to_string(),
        })
    }

    /// 只检查不标记
    pub fn check(&self, name: &str) -> Result<(), ContextError> {
        Self::ensure_absent(&self.stack.lock(), name)
    }

    fn ensure_absent(stack: &[String], name: &str) -> Result<(), ContextError> {
        if stack.iter().any(|p| p == name) {
            let mut chain = stack.to_vec();
            chain.push(name.to_string());
            return Err(ContextError::CircularDependency {
                property: name.to_string(),
                chain,
            });
        }
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.stack.lock().iter().any(|p| p == name)
    }

    /// 当前请求路径的快照
    pub fn snapshot(&self) -> Vec<String> {
        self.stack.lock().clone()
    }

    pub fn depth(&self) -> usize {
        self.stack.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.lock().is_empty()
    }

    fn leave(&self, name: &str) {
        let mut stack = self.stack.lock();
        if let Some(pos) = stack.iter().rposition(|p| p == name) {
            stack.remove(pos);
        }
    }
}

/// 解析标记，drop 时移除
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    set: &'a InFlightSet,
    name: String,
}

impl InFlightGuard<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set.leave(&self.name);
    }
}
