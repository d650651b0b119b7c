//! Data models for the rustwipe tool.
//!
//! - [`WipeRequest`]: the immutable, fully-resolved options for one wipe attempt
//! - [`WipeCadence`] / [`parse_target_weekday`]: scheduling inputs with
//!   pre-flight validation
//! - [`NotifySettings`] / [`WipeEvent`]: the optional Redis alert contract
//!
//! The request is constructed once at invocation start; everything downstream
//! takes it by reference and never mutates it. The dry-run flag lives on the
//! request and is threaded explicitly into every function that can mutate,
//! never read from ambient state.

pub mod event;
pub mod request;

pub use event::WipeEvent;
pub use request::{parse_target_weekday, CosmeticTags, NotifySettings, WipeCadence, WipeRequest};
