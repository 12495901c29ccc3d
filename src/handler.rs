//! Handlers adapting concrete callables to [`AdapterImpl`].

use core::ops::Deref;

use crate::{AdapterImpl, ImplBox};

/// A callable invoked with its arguments packed in a tuple.
///
/// Implemented for every `FnMut` closure and function with up to eight
/// parameters, where `Args` is the tuple of those parameters.
pub trait Apply<Args, R> {
    /// Unpacks `args` and calls `self` with them.
    fn apply(&mut self, args: Args) -> R;
}

/// A method-like callable invoked on a target object.
///
/// Implemented for every `Fn(&T, ..) -> R` with up to eight parameters after
/// the receiver, which covers method items such as `Counter::get`. Methods
/// taking `&mut self` are not covered; mutate through interior mutability.
pub trait Method<T: ?Sized, Args, R> {
    /// Calls the method on `target` with the unpacked `args`.
    fn invoke(&self, target: &T, args: Args) -> R;
}

macro_rules! impl_callable {
    ($($P:ident),*) => {
        impl<Fun, Ret, $($P),*> Apply<($($P,)*), Ret> for Fun
        where
            Fun: FnMut($($P),*) -> Ret,
        {
            #[inline]
            fn apply(&mut self, args: ($($P,)*)) -> Ret {
                #[allow(non_snake_case)]
                let ($($P,)*) = args;
                (self)($($P),*)
            }
        }

        impl<Fun, Target, Ret, $($P),*> Method<Target, ($($P,)*), Ret> for Fun
        where
            Target: ?Sized,
            Fun: Fn(&Target, $($P),*) -> Ret,
        {
            #[inline]
            fn invoke(&self, target: &Target, args: ($($P,)*)) -> Ret {
                #[allow(non_snake_case)]
                let ($($P,)*) = args;
                (self)(target, $($P),*)
            }
        }
    };
}

impl_callable!();
impl_callable!(A);
impl_callable!(A, B);
impl_callable!(A, B, C);
impl_callable!(A, B, C, D);
impl_callable!(A, B, C, D, E);
impl_callable!(A, B, C, D, E, F);
impl_callable!(A, B, C, D, E, F, G);
impl_callable!(A, B, C, D, E, F, G, H);

/// Handler wrapping a closure, function or other [`Apply`] value.
#[derive(Clone)]
pub struct CallableHandler<F> {
    fun: F,
}

impl<F> CallableHandler<F> {
    /// Wraps `fun`.
    pub fn new(fun: F) -> Self {
        CallableHandler { fun }
    }
}

impl<F, Args, R, Space> AdapterImpl<Args, R, Space> for CallableHandler<F>
where
    F: Apply<Args, R> + Clone + 'static,
    Args: 'static,
    R: 'static,
    Space: 'static,
{
    #[inline]
    fn call(&mut self, args: Args) -> R {
        self.fun.apply(args)
    }

    fn clone_self(&self) -> ImplBox<Args, R, Space> {
        ImplBox::from_impl(self.clone())
    }
}

/// Handler calling a method on the object behind an ownership handle.
///
/// Cloning the handler clones the handle, not the object: all copies call
/// into the same target.
#[derive(Clone)]
pub struct MemberHandler<P, M> {
    owner: P,
    method: M,
}

impl<P, M> MemberHandler<P, M> {
    /// Pairs the `owner` handle with `method`.
    pub fn new(owner: P, method: M) -> Self {
        MemberHandler { owner, method }
    }
}

impl<P, M, Args, R, Space> AdapterImpl<Args, R, Space> for MemberHandler<P, M>
where
    P: Deref + Clone + 'static,
    M: Method<P::Target, Args, R> + Clone + 'static,
    Args: 'static,
    R: 'static,
    Space: 'static,
{
    #[inline]
    fn call(&mut self, args: Args) -> R {
        self.method.invoke(&*self.owner, args)
    }

    fn clone_self(&self) -> ImplBox<Args, R, Space> {
        ImplBox::from_impl(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::S4;
    use std::rc::Rc;

    fn double(x: i32) -> i32 {
        x * 2
    }

    struct Pair(i32, i32);

    impl Pair {
        fn sum(&self) -> i32 {
            self.0 + self.1
        }

        fn scaled(&self, k: i32) -> i32 {
            (self.0 + self.1) * k
        }
    }

    #[test]
    fn apply_unpacks_tuples() {
        let mut nullary = || 1;
        let mut ternary = |a: u8, b: u8, c: u8| [a, b, c];
        assert_eq!(Apply::<(), i32>::apply(&mut nullary, ()), 1);
        assert_eq!(Apply::<(u8, u8, u8), [u8; 3]>::apply(&mut ternary, (1, 2, 3)), [1, 2, 3]);
        assert_eq!(Apply::<(i32,), i32>::apply(&mut double, (4,)), 8);
    }

    #[test]
    fn method_receives_target() {
        let pair = Pair(2, 3);
        assert_eq!(Method::<Pair, (), i32>::invoke(&Pair::sum, &pair, ()), 5);
        assert_eq!(Method::<Pair, (i32,), i32>::invoke(&Pair::scaled, &pair, (10,)), 50);
    }

    #[test]
    fn callable_handler_forwards() {
        let mut handler = CallableHandler::new(|a: i32, b: i32| a - b);
        assert_eq!(AdapterImpl::<(i32, i32), i32, S4>::call(&mut handler, (9, 4)), 5);
    }

    #[test]
    fn callable_handler_clone_is_independent() {
        let mut calls = 0u32;
        let mut handler = CallableHandler::new(move || {
            calls += 1;
            calls
        });
        let mut copy = AdapterImpl::<(), u32, S4>::clone_self(&handler);
        assert_eq!(AdapterImpl::<(), u32, S4>::call(&mut handler, ()), 1);
        assert_eq!(copy.call(()), 1);
        assert_eq!(copy.call(()), 2);
        assert_eq!(AdapterImpl::<(), u32, S4>::call(&mut handler, ()), 2);
    }

    #[test]
    fn member_handler_shares_target() {
        let target = Rc::new(Pair(1, 1));
        let mut handler = MemberHandler::new(target.clone(), Pair::scaled);
        let mut copy = AdapterImpl::<(i32,), i32, S4>::clone_self(&handler);
        assert_eq!(AdapterImpl::<(i32,), i32, S4>::call(&mut handler, (3,)), 6);
        assert_eq!(copy.call((4,)), 8);
        assert_eq!(Rc::strong_count(&target), 3);
    }
}
