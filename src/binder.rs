use crate::params::SplitFirst;
use crate::{Adapter, AdapterImpl, ImplBox};

/// Handler fixing the first argument of an inner adapter.
///
/// Built by [`bind_first`]. Each call clones the bound value and prepends it
/// to the remaining arguments.
pub struct Binder<Args: SplitFirst, R, Space> {
    inner: Adapter<Args, R, Space>,
    bound: Args::First,
}

impl<Args, R, Space> Clone for Binder<Args, R, Space>
where
    Args: SplitFirst + 'static,
    Args::First: Clone,
    R: 'static,
    Space: 'static,
{
    fn clone(&self) -> Self {
        Binder {
            inner: self.inner.clone(),
            bound: self.bound.clone(),
        }
    }
}

impl<Args, R, Space> AdapterImpl<Args::Rest, R, Space> for Binder<Args, R, Space>
where
    Args: SplitFirst + 'static,
    Args::First: Clone + 'static,
    R: 'static,
    Space: 'static,
{
    fn call(&mut self, rest: Args::Rest) -> R {
        self.inner.call(Args::prepend(self.bound.clone(), rest))
    }

    fn clone_self(&self) -> ImplBox<Args::Rest, R, Space> {
        ImplBox::from_impl(self.clone())
    }
}

/// Fixes the first argument of `adapter` to `bound`.
///
/// The result takes the remaining parameters and calls `adapter` with `bound`
/// in front of them. The bound value must have exactly the type of the first
/// parameter. Binding an empty adapter gives an empty adapter.
///
/// ```
/// use smallfn::{bind_first, Adapter};
///
/// let add: Adapter<(i32, i32), i32> = Adapter::new(|x: i32, y: i32| x + y);
/// let mut add_five = bind_first(add, 5);
/// assert_eq!(add_five.call((3,)), 8);
///
/// let mut eight = bind_first(add_five, 3);
/// assert_eq!(eight.call(()), 8);
/// ```
///
/// A nullary adapter has no first parameter to bind:
///
/// ```compile_fail
/// use smallfn::{bind_first, Adapter};
///
/// let nothing: Adapter<(), i32> = Adapter::new(|| 1);
/// let _ = bind_first(nothing, 1);
/// ```
pub fn bind_first<Args, R, Space>(
    adapter: Adapter<Args, R, Space>,
    bound: Args::First,
) -> Adapter<Args::Rest, R, Space>
where
    Args: SplitFirst + 'static,
    Args::First: Clone + 'static,
    R: 'static,
    Space: 'static,
{
    if adapter.is_empty() {
        tracing::trace!(arity = Args::ARITY, "binding an empty adapter");
        return Adapter::empty();
    }
    Adapter::from_impl(Binder {
        inner: adapter,
        bound,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn binds_leading_argument() {
        let concat: Adapter<(String, &'static str, char), String> =
            Adapter::new(|mut s: String, t: &'static str, c: char| {
                s.push_str(t);
                s.push(c);
                s
            });
        let mut bound = bind_first(concat, String::from("ab"));
        assert_eq!(bound.arity(), 2);
        assert_eq!(bound.call(("cd", 'e')), "abcde");
        assert_eq!(bound.call(("", 'f')), "abf");
    }

    #[test]
    fn empty_stays_empty() {
        let empty: Adapter<(u8, u8), u8> = Adapter::empty();
        let bound = bind_first(empty, 1);
        assert!(bound.is_empty());
    }

    #[test]
    fn clone_copies_bound_value() {
        let shared = Rc::new(5);
        let add: Adapter<(Rc<i32>, i32), i32> = Adapter::new(|a: Rc<i32>, b: i32| *a + b);
        let mut bound = bind_first(add, shared.clone());
        let mut copy = bound.clone();
        assert_eq!(Rc::strong_count(&shared), 3);
        assert_eq!(bound.call((1,)), 6);
        assert_eq!(copy.call((2,)), 7);
        drop(bound);
        drop(copy);
        assert_eq!(Rc::strong_count(&shared), 1);
    }
}
