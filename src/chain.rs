use crate::params::ParamList;
use crate::{Adapter, AdapterImpl, ImplBox};

/// Handler calling two adapters in sequence with the same arguments.
///
/// Built by [`chain()`]. The result of the first adapter is dropped before
/// the second one starts; the chain returns the second's result.
pub struct Chain<Args, R1, R2, Space> {
    first: Adapter<Args, R1, Space>,
    second: Adapter<Args, R2, Space>,
}

impl<Args, R1, R2, Space> Clone for Chain<Args, R1, R2, Space>
where
    Args: 'static,
    R1: 'static,
    R2: 'static,
    Space: 'static,
{
    fn clone(&self) -> Self {
        Chain {
            first: self.first.clone(),
            second: self.second.clone(),
        }
    }
}

impl<Args, R1, R2, Space> AdapterImpl<Args, R2, Space> for Chain<Args, R1, R2, Space>
where
    Args: ParamList + Clone + 'static,
    R1: 'static,
    R2: 'static,
    Space: 'static,
{
    fn call(&mut self, args: Args) -> R2 {
        drop(self.first.call(args.clone()));
        self.second.call(args)
    }

    fn clone_self(&self) -> ImplBox<Args, R2, Space> {
        ImplBox::from_impl(self.clone())
    }
}

/// Handler calling two fallible adapters in sequence, stopping at the first error.
///
/// Built by [`try_chain`].
pub struct TryChain<Args, T1, T2, E, Space> {
    first: Adapter<Args, Result<T1, E>, Space>,
    second: Adapter<Args, Result<T2, E>, Space>,
}

impl<Args, T1, T2, E, Space> Clone for TryChain<Args, T1, T2, E, Space>
where
    Args: 'static,
    T1: 'static,
    T2: 'static,
    E: 'static,
    Space: 'static,
{
    fn clone(&self) -> Self {
        TryChain {
            first: self.first.clone(),
            second: self.second.clone(),
        }
    }
}

impl<Args, T1, T2, E, Space> AdapterImpl<Args, Result<T2, E>, Space>
    for TryChain<Args, T1, T2, E, Space>
where
    Args: ParamList + Clone + 'static,
    T1: 'static,
    T2: 'static,
    E: 'static,
    Space: 'static,
{
    fn call(&mut self, args: Args) -> Result<T2, E> {
        self.first.call(args.clone())?;
        self.second.call(args)
    }

    fn clone_self(&self) -> ImplBox<Args, Result<T2, E>, Space> {
        ImplBox::from_impl(self.clone())
    }
}

/// Calls `first`, then `second`, with the same arguments.
///
/// The first call runs to completion before the second starts and its result
/// is discarded. A panic in `first` propagates and `second` is not called.
/// If either adapter is empty the chain is empty too.
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use smallfn::{chain, Adapter};
///
/// let log = Rc::new(RefCell::new(Vec::new()));
/// let sink = log.clone();
/// let record: Adapter<(i32,), i32> = Adapter::new(move |x: i32| {
///     sink.borrow_mut().push(x);
///     x
/// });
/// let double: Adapter<(i32,), i32> = Adapter::new(|x: i32| 2 * x);
///
/// let mut both = chain(record, double);
/// assert_eq!(both.call((4,)), 8);
/// assert_eq!(*log.borrow(), [4]);
/// ```
pub fn chain<Args, R1, R2, Space>(
    first: Adapter<Args, R1, Space>,
    second: Adapter<Args, R2, Space>,
) -> Adapter<Args, R2, Space>
where
    Args: ParamList + Clone + 'static,
    R1: 'static,
    R2: 'static,
    Space: 'static,
{
    if first.is_empty() || second.is_empty() {
        tracing::trace!(arity = Args::ARITY, "chaining an empty adapter");
        return Adapter::empty();
    }
    Adapter::from_impl(Chain { first, second })
}

/// Calls `first`, then `second` if `first` succeeded, with the same arguments.
///
/// An `Err` from `first` is returned as is and `second` is not called;
/// otherwise the chain returns `second`'s result. If either adapter is empty
/// the chain is empty too.
///
/// ```
/// use smallfn::{try_chain, Adapter};
///
/// let check: Adapter<(i32,), Result<(), String>> = Adapter::new(|x: i32| {
///     if x >= 0 { Ok(()) } else { Err(format!("{x} is negative")) }
/// });
/// let root: Adapter<(i32,), Result<f64, String>> =
///     Adapter::new(|x: i32| Ok(f64::from(x).sqrt()));
///
/// let mut checked_root = try_chain(check, root);
/// assert_eq!(checked_root.call((9,)), Ok(3.0));
/// assert_eq!(checked_root.call((-1,)), Err("-1 is negative".to_string()));
/// ```
pub fn try_chain<Args, T1, T2, E, Space>(
    first: Adapter<Args, Result<T1, E>, Space>,
    second: Adapter<Args, Result<T2, E>, Space>,
) -> Adapter<Args, Result<T2, E>, Space>
where
    Args: ParamList + Clone + 'static,
    T1: 'static,
    T2: 'static,
    E: 'static,
    Space: 'static,
{
    if first.is_empty() || second.is_empty() {
        tracing::trace!(arity = Args::ARITY, "chaining an empty adapter");
        return Adapter::empty();
    }
    Adapter::from_impl(TryChain { first, second })
}
