//! 异步待定值
//!
//! 解析函数可以返回一个尚未完成的计算。容器从不轮询它，只把它当作普通值
//! 缓存并交给调用方，由调用方自行 `.await`。

use futures::future::{BoxFuture, FutureExt, Shared};
use std::future::Future;

/// 可克隆、可多次等待的待定值
pub type Pending<T> = Shared<BoxFuture<'static, T>>;

/// 包装一个 future 为待定值
pub fn pending<T, F>(future: F) -> Pending<T>
where
    T: Clone + Send + Sync + 'static,
    F: Future<Output = T> + Send + 'static,
{
    future.boxed().shared()
}

/// 立即完成的待定值
pub fn ready<T>(value: T) -> Pending<T>
where
    T: Clone + Send + Sync + 'static,
{
    pending(futures::future::ready(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pending_can_be_awaited_twice() {
        let value = pending(async { "Main".to_string() });
        let copy = value.clone();

        assert_eq!(value.await, "Main");
        assert_eq!(copy.await, "Main");
    }

    #[tokio::test]
    async fn test_ready_value() {
        assert_eq!(ready(42_u32).await, 42);
    }

    #[tokio::test]
    async fn test_pending_is_lazy() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let started = Arc::new(AtomicBool::new(false));
        let flag = started.clone();
        let value = pending(async move {
            flag.store(true, Ordering::SeqCst);
            1_u8
        });

        assert!(!started.load(Ordering::SeqCst));
        assert_eq!(value.await, 1);
        assert!(started.load(Ordering::SeqCst));
    }
}
