//! 类型化访问器
//!
//! `context_contract!` 声明一个 trait，每个属性对应一个方法，并为
//! [`Context`](crate::Context) 实现它。方法名即属性名，全部委托给
//! [`Context::get`](crate::Context::get)。
//!
//! ```
//! use context_container::{context_contract, Context, Registry};
//! use std::sync::Arc;
//!
//! #[derive(Debug)]
//! pub struct Status {
//!     pub status: String,
//! }
//!
//! context_contract! {
//!     pub trait ApiContract {
//!         main: Status,
//!     }
//! }
//!
//! let ctx = Context::new(Registry::new().provide("main", |_| {
//!     Ok(Arc::new(Status { status: "OK".to_string() }))
//! }));
//! assert_eq!(ctx.main().unwrap().status, "OK");
//! ```

/// 声明属性契约 trait 并为 `Context` 实现
#[macro_export]
macro_rules! context_contract {
    (
        $(#[$meta:meta])*
        $vis:vis trait $name:ident {
            $(
                $(#[$prop_meta:meta])*
                $prop:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis trait $name {
            $(
                $(#[$prop_meta])*
                fn $prop(&self) -> ::core::result::Result<::std::sync::Arc<$ty>, $crate::ContextError>;
            )*
        }

        impl $name for $crate::Context {
            $(
                fn $prop(&self) -> ::core::result::Result<::std::sync::Arc<$ty>, $crate::ContextError> {
                    self.get::<$ty>(::core::stringify!($prop))
                }
            )*
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Context, ContextError, Registry};
    use std::sync::Arc;

    #[derive(Debug, PartialEq)]
    struct Settings {
        verbose: bool,
    }

    context_contract! {
        /// 测试契约
        trait AppContract {
            settings: Settings,
            greeting: String,
        }
    }

    #[test]
    fn test_typed_accessors_delegate_to_get() {
        let ctx = Context::new(
            Registry::new()
                .provide("settings", |_| Ok(Arc::new(Settings { verbose: true })))
                .provide("greeting", |ctx: &Context| {
                    let verbose = ctx.settings()?.verbose;
                    Ok(Arc::new(if verbose { "hello there" } else { "hi" }.to_string()))
                }),
        );

        assert_eq!(*ctx.greeting().unwrap(), "hello there");
        assert!(Arc::ptr_eq(
            &ctx.settings().unwrap(),
            &ctx.get::<Settings>("settings").unwrap()
        ));
    }

    #[test]
    fn test_accessor_for_undeclared_provider() {
        let ctx = Context::new(Registry::new());
        let err = ctx.settings().unwrap_err();
        assert!(matches!(err, ContextError::MissingProvider { ref property } if property == "settings"));
    }
}
