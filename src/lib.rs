//! # smallfn: value-semantic callables
//!
//! [`Adapter`] is a type-erased function object. It can hold a closure or
//! function, a method bound to an object, or a composition of other adapters,
//! and it behaves like a plain value: cloning an adapter clones the callable
//! inside it, and calling it costs one dynamic dispatch.
//!
//! ## Quick Start
//!
//! The parameters of an adapter are written as a tuple type:
//!
//! ```rust
//! use smallfn::Adapter;
//!
//! let mut add: Adapter<(i32, i32), i32> = Adapter::new(|x: i32, y: i32| x + y);
//! assert_eq!(add.call((2, 3)), 5);
//!
//! let mut nullary: Adapter<(), &str> = Adapter::new(|| "hello");
//! assert_eq!(nullary.call(()), "hello");
//! ```
//!
//! ## Value Semantics
//!
//! A clone owns its own copy of the callable, including any state captured
//! by it:
//!
//! ```rust
//! use smallfn::Adapter;
//!
//! let mut calls = 0;
//! let mut counter: Adapter<(), i32> = Adapter::new(move || {
//!     calls += 1;
//!     calls
//! });
//! counter.call(());
//!
//! let mut copy = counter.clone();
//! assert_eq!(copy.call(()), 2);
//! assert_eq!(copy.call(()), 3);
//! assert_eq!(counter.call(()), 2);
//! ```
//!
//! An adapter can also be empty. Calling an empty adapter is an error:
//! [`Adapter::call`] panics and [`Adapter::try_call`] returns
//! [`Error::EmptyAdapterCall`].
//!
//! ```rust
//! use smallfn::{Adapter, Error};
//!
//! let mut adapter: Adapter<(u8,), u8> = Adapter::default();
//! assert!(adapter.is_empty());
//! assert_eq!(adapter.try_call((1,)), Err(Error::EmptyAdapterCall));
//! ```
//!
//! ## Methods
//!
//! A method is bound to an object through an ownership handle such as `Rc`
//! or `Arc`; copies of the adapter share the object:
//!
//! ```rust
//! use std::rc::Rc;
//! use smallfn::Adapter;
//!
//! struct Scale(f64);
//!
//! impl Scale {
//!     fn apply(&self, x: f64) -> f64 {
//!         self.0 * x
//!     }
//! }
//!
//! let mut triple: Adapter<(f64,), f64> = Adapter::from_method(Rc::new(Scale(3.0)), Scale::apply);
//! assert_eq!(triple.call((1.5,)), 4.5);
//! ```
//!
//! ## Composition
//!
//! [`bind_first`] fixes the first argument and [`chain()`] runs two adapters
//! on the same arguments. Both produce ordinary adapters:
//!
//! ```rust
//! use smallfn::{bind_first, chain, Adapter};
//!
//! let mul: Adapter<(i32, i32), i32> = Adapter::new(|x: i32, y: i32| x * y);
//! let mut double = bind_first(mul, 2);
//! assert_eq!(double.call((21,)), 42);
//!
//! let noop: Adapter<(i32,), ()> = Adapter::new(|_: i32| ());
//! let mut both = chain(noop, double);
//! assert_eq!(both.call((5,)), 10);
//! ```
//!
//! ## Storage
//!
//! Handlers are kept in a [`HandlerBox`]: inline in the adapter when they fit
//! the `Space` type parameter (four machine words by default), on the heap
//! otherwise. A larger space avoids allocations for larger closures:
//!
//! ```rust
//! use smallfn::Adapter;
//! use smallfn::space::{S2, S16};
//!
//! let table = [1u64; 8];
//! let small: Adapter<(usize,), u64, S2> = Adapter::new(move |i: usize| table[i]);
//! let large: Adapter<(usize,), u64, S16> = Adapter::new(move |i: usize| table[i]);
//! assert!(!small.is_inline());
//! assert!(large.is_inline());
//! ```
//!
//! ## Feature Flags
//!
//! - **`std`** (enabled by default): links to the standard library. Without
//!   it the crate is `#![no_std]` and only needs `alloc`.
//! - **`nightly`**: uses the unstable pointer metadata APIs instead of the
//!   layout assumptions checked by the build script.

#![cfg_attr(feature = "nightly", feature(strict_provenance, set_ptr_value))]
#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![allow(stable_features)]
#![deny(missing_docs)]
#![deny(clippy::as_conversions)]

extern crate alloc;

mod adapter;
mod binder;
mod chain;
mod error;
mod handler;
mod params;
pub mod space;
mod sptr;
mod storage;

pub use crate::adapter::{Adapter, AdapterImpl, ImplBox};
pub use crate::binder::{bind_first, Binder};
pub use crate::chain::{chain, try_chain, Chain, TryChain};
pub use crate::error::Error;
pub use crate::handler::{Apply, CallableHandler, MemberHandler, Method};
pub use crate::params::{ParamAt, ParamList, SplitFirst};
pub use crate::storage::HandlerBox;
