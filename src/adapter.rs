use core::any::{type_name, TypeId};
use core::fmt;
use core::mem;
use core::ops::Deref;

use crate::binder;
use crate::chain;
use crate::handler::{Apply, CallableHandler, MemberHandler, Method};
use crate::params::{ParamList, SplitFirst};
use crate::space::S4;
use crate::{Error, HandlerBox};

/// Storage of one erased handler, as owned by an [`Adapter`].
pub type ImplBox<Args, R, Space> = HandlerBox<dyn AdapterImpl<Args, R, Space>, Space>;

/// The polymorphic interface behind every [`Adapter`].
///
/// `Args` is the parameter list as a tuple, `R` the return type and `Space`
/// the inline capacity of the storage clones are placed in. Plain callables,
/// methods, binders and chains all implement this trait, and so can user
/// types:
///
/// ```
/// use smallfn::{Adapter, AdapterImpl, ImplBox};
/// use smallfn::space::S4;
///
/// #[derive(Clone)]
/// struct Countdown(u32);
///
/// impl AdapterImpl<(), Option<u32>, S4> for Countdown {
///     fn call(&mut self, _: ()) -> Option<u32> {
///         self.0 = self.0.checked_sub(1)?;
///         Some(self.0)
///     }
///
///     fn clone_self(&self) -> ImplBox<(), Option<u32>, S4> {
///         ImplBox::from_impl(self.clone())
///     }
/// }
///
/// let mut countdown: Adapter<(), Option<u32>> = Adapter::from_impl(Countdown(2));
/// assert_eq!(countdown.call(()), Some(1));
/// assert_eq!(countdown.call(()), Some(0));
/// assert_eq!(countdown.call(()), None);
/// ```
pub trait AdapterImpl<Args, R, Space>: 'static {
    /// Invokes the handler with the given arguments.
    fn call(&mut self, args: Args) -> R;

    /// Returns an independent copy of this handler.
    ///
    /// The copy must have the same concrete type as `self`; [`Adapter::clone`]
    /// panics otherwise.
    fn clone_self(&self) -> ImplBox<Args, R, Space>;

    /// The concrete type of the handler.
    fn impl_type(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// The concrete type name of the handler, for diagnostics.
    fn impl_name(&self) -> &'static str {
        type_name::<Self>()
    }
}

impl<Args, R, Space> HandlerBox<dyn AdapterImpl<Args, R, Space>, Space>
where
    Args: 'static,
    R: 'static,
    Space: 'static,
{
    /// Erases `handler` into adapter storage.
    pub fn from_impl<H>(handler: H) -> Self
    where
        H: AdapterImpl<Args, R, Space>,
    {
        let ptr: *const dyn AdapterImpl<Args, R, Space> = &handler;
        unsafe { Self::new_unchecked(handler, ptr) }
    }
}

fn clone_checked<Args, R, Space>(
    imp: &(dyn AdapterImpl<Args, R, Space> + 'static),
) -> ImplBox<Args, R, Space>
where
    Args: 'static,
    R: 'static,
    Space: 'static,
{
    let copy = imp.clone_self();
    if copy.impl_type() != imp.impl_type() {
        let err = Error::CloneTypeMismatch {
            expected: imp.impl_name(),
            found: copy.impl_name(),
        };
        tracing::error!(expected = imp.impl_name(), found = copy.impl_name(), "broken clone_self");
        panic!("{err}");
    }
    copy
}

/// A type-erased callable with value semantics.
///
/// An `Adapter<Args, R>` holds any callable taking the parameters of the tuple
/// `Args` and returning `R`: a closure or function, a method bound to an
/// object, a [`Binder`](crate::Binder) or a [`Chain`](crate::Chain). Cloning an adapter
/// clones the callable it holds, so two adapters never share state through
/// the wrapper. Handlers that fit in `Space` are stored inline.
///
/// # Example
///
/// ```
/// use smallfn::Adapter;
///
/// let mut add: Adapter<(i32, i32), i32> = Adapter::new(|a: i32, b: i32| a + b);
/// assert_eq!(add.call((2, 3)), 5);
///
/// let mut add_five = add.clone().bind_first(5);
/// assert_eq!(add_five.call((3,)), 8);
/// assert_eq!(add_five.arity(), 1);
/// ```
pub struct Adapter<Args, R, Space = S4> {
    imp: Option<ImplBox<Args, R, Space>>,
}

impl<Args, R, Space> Adapter<Args, R, Space>
where
    Args: ParamList + 'static,
    R: 'static,
    Space: 'static,
{
    /// Number of parameters the adapter takes.
    pub const ARITY: usize = Args::ARITY;

    /// Creates an adapter that holds no callable.
    pub fn empty() -> Self {
        Adapter { imp: None }
    }

    /// Wraps a closure, function or other `FnMut` value.
    ///
    /// Closure parameters need type annotations, as the parameter list is
    /// matched through the tuple type `Args`.
    pub fn new<F>(fun: F) -> Self
    where
        F: Apply<Args, R> + Clone + 'static,
    {
        Self::from_impl(CallableHandler::new(fun))
    }

    /// Binds `method` to the object behind the `owner` handle.
    ///
    /// The handle is cloned together with the adapter, so every copy calls
    /// the method on the same object.
    ///
    /// ```
    /// use std::rc::Rc;
    /// use smallfn::Adapter;
    ///
    /// struct Greeter(&'static str);
    ///
    /// impl Greeter {
    ///     fn greet(&self, name: &'static str) -> String {
    ///         format!("{}, {}!", self.0, name)
    ///     }
    /// }
    ///
    /// let mut greet: Adapter<(&'static str,), String> =
    ///     Adapter::from_method(Rc::new(Greeter("Hello")), Greeter::greet);
    /// assert_eq!(greet.call(("world",)), "Hello, world!");
    /// ```
    ///
    /// Methods receive `&self`, since the target is shared between copies. A
    /// method that mutates its object keeps the state in a `Cell` or `RefCell`:
    ///
    /// ```
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    /// use smallfn::Adapter;
    ///
    /// struct Journal(RefCell<Vec<String>>);
    ///
    /// impl Journal {
    ///     fn record(&self, entry: &'static str) -> usize {
    ///         let mut entries = self.0.borrow_mut();
    ///         entries.push(entry.to_owned());
    ///         entries.len()
    ///     }
    /// }
    ///
    /// let journal = Rc::new(Journal(RefCell::new(Vec::new())));
    /// let mut record: Adapter<(&'static str,), usize> =
    ///     Adapter::from_method(journal.clone(), Journal::record);
    /// assert_eq!(record.call(("boot",)), 1);
    /// assert_eq!(record.clone().call(("ready",)), 2);
    /// assert_eq!(*journal.0.borrow(), ["boot", "ready"]);
    /// ```
    pub fn from_method<P, M>(owner: P, method: M) -> Self
    where
        P: Deref + Clone + 'static,
        M: Method<P::Target, Args, R> + Clone + 'static,
    {
        Self::from_impl(MemberHandler::new(owner, method))
    }

    /// Takes ownership of an already built handler.
    pub fn from_impl<H>(handler: H) -> Self
    where
        H: AdapterImpl<Args, R, Space>,
    {
        Adapter {
            imp: Some(ImplBox::from_impl(handler)),
        }
    }

    /// Calls the held callable.
    ///
    /// # Panics
    ///
    /// Panics with [`Error::EmptyAdapterCall`] if the adapter is empty. Use
    /// [`Adapter::try_call`] or check [`Adapter::is_bound`] first to avoid it.
    pub fn call(&mut self, args: Args) -> R {
        match self.try_call(args) {
            Ok(output) => output,
            Err(err) => panic!("{err}"),
        }
    }

    /// Calls the held callable, or reports [`Error::EmptyAdapterCall`].
    pub fn try_call(&mut self, args: Args) -> Result<R, Error> {
        match self.imp.as_deref_mut() {
            Some(imp) => Ok(imp.call(args)),
            None => {
                tracing::debug!(arity = Args::ARITY, "call on an empty adapter");
                Err(Error::EmptyAdapterCall)
            }
        }
    }

    /// Number of parameters the adapter takes.
    pub fn arity(&self) -> usize {
        Args::ARITY
    }

    /// Returns true if the adapter holds a callable.
    pub fn is_bound(&self) -> bool {
        self.imp.is_some()
    }

    /// Returns true if the adapter holds no callable.
    pub fn is_empty(&self) -> bool {
        self.imp.is_none()
    }

    /// Returns true if the held callable lives in the inline space.
    ///
    /// An empty adapter has nothing stored and reports false.
    pub fn is_inline(&self) -> bool {
        self.imp.as_ref().is_some_and(|imp| !imp.is_heap())
    }

    /// Type name of the held handler.
    pub fn impl_name(&self) -> Option<&'static str> {
        self.imp.as_deref().map(|imp| imp.impl_name())
    }

    /// Moves the callable out, leaving this adapter empty.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Puts `other` in place of this adapter and returns the previous value.
    pub fn replace(&mut self, other: Self) -> Self {
        mem::replace(self, other)
    }

    /// Fixes the first argument, see [`bind_first`](crate::bind_first).
    pub fn bind_first(self, bound: Args::First) -> Adapter<Args::Rest, R, Space>
    where
        Args: SplitFirst,
        Args::First: Clone + 'static,
    {
        binder::bind_first(self, bound)
    }

    /// Runs `self` then `next` on the same arguments, see [`chain`](crate::chain()).
    pub fn chain<R2>(self, next: Adapter<Args, R2, Space>) -> Adapter<Args, R2, Space>
    where
        Args: Clone,
        R2: 'static,
    {
        chain::chain(self, next)
    }
}

impl<Args, T, E, Space> Adapter<Args, Result<T, E>, Space>
where
    Args: ParamList + 'static,
    T: 'static,
    E: 'static,
    Space: 'static,
{
    /// Runs `self` then `next`, stopping at the first error, see
    /// [`try_chain`](crate::try_chain).
    pub fn try_chain<T2>(
        self,
        next: Adapter<Args, Result<T2, E>, Space>,
    ) -> Adapter<Args, Result<T2, E>, Space>
    where
        Args: Clone,
        T2: 'static,
    {
        chain::try_chain(self, next)
    }
}

impl<Args, R, Space> Default for Adapter<Args, R, Space> {
    fn default() -> Self {
        Adapter { imp: None }
    }
}

impl<Args, R, Space> Clone for Adapter<Args, R, Space>
where
    Args: 'static,
    R: 'static,
    Space: 'static,
{
    fn clone(&self) -> Self {
        Adapter {
            imp: self.imp.as_deref().map(clone_checked),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        mem::swap(self, &mut copy);
    }
}

impl<Args, R, Space> From<ImplBox<Args, R, Space>> for Adapter<Args, R, Space> {
    fn from(imp: ImplBox<Args, R, Space>) -> Self {
        Adapter { imp: Some(imp) }
    }
}

impl<Args, R, Space> fmt::Debug for Adapter<Args, R, Space>
where
    Args: ParamList + 'static,
    R: 'static,
    Space: 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("arity", &Args::ARITY)
            .field("handler", &self.impl_name())
            .field("inline", &self.is_inline())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::{S1, S8};

    #[test]
    fn empty_is_not_bound() {
        let adapter: Adapter<(i32,), i32> = Adapter::default();
        assert!(adapter.is_empty());
        assert!(!adapter.is_bound());
        assert!(!adapter.is_inline());
        assert_eq!(adapter.impl_name(), None);
    }

    #[test]
    fn try_call_on_empty() {
        let mut adapter: Adapter<(), u8> = Adapter::empty();
        assert_eq!(adapter.try_call(()), Err(Error::EmptyAdapterCall));
    }

    #[test]
    #[should_panic(expected = "called an empty adapter")]
    fn call_on_empty_panics() {
        let mut adapter: Adapter<(u8, u8), u8> = Adapter::empty();
        adapter.call((1, 2));
    }

    #[test]
    fn arity_follows_params() {
        let nullary: Adapter<(), ()> = Adapter::new(|| ());
        let ternary: Adapter<(u8, u8, u8), u8> = Adapter::new(|a: u8, b: u8, c: u8| a + b + c);
        assert_eq!(nullary.arity(), 0);
        assert_eq!(ternary.arity(), 3);
        assert_eq!(Adapter::<(u8, u8, u8), u8>::ARITY, 3);
    }

    #[test]
    fn small_closures_stay_inline() {
        let offset = 7u64;
        let small: Adapter<(u64,), u64, S1> = Adapter::new(move |x: u64| x + offset);
        assert!(small.is_inline());

        let table = [1u64; 16];
        let large: Adapter<(usize,), u64, S8> = Adapter::new(move |i: usize| table[i]);
        assert!(!large.is_inline());
    }

    #[test]
    fn clone_from_replaces_handler() {
        let mut target: Adapter<(), &'static str> = Adapter::new(|| "old");
        let source: Adapter<(), &'static str> = Adapter::new(|| "new");
        target.clone_from(&source);
        assert_eq!(target.call(()), "new");

        let same = target.clone();
        target.clone_from(&same);
        assert_eq!(target.call(()), "new");
    }

    #[test]
    fn replace_returns_previous() {
        let mut adapter: Adapter<(), u8> = Adapter::new(|| 1);
        let mut previous = adapter.replace(Adapter::new(|| 2));
        assert_eq!(previous.call(()), 1);
        assert_eq!(adapter.call(()), 2);
    }

    #[test]
    fn debug_names_handler() {
        let adapter: Adapter<(u8,), u8> = Adapter::new(|x: u8| x);
        let rendered = format!("{adapter:?}");
        assert!(rendered.contains("arity: 1"));
        assert!(rendered.contains("CallableHandler"));
    }

    #[derive(Clone)]
    struct Liar;

    #[derive(Clone)]
    struct Other;

    impl AdapterImpl<(), (), S4> for Other {
        fn call(&mut self, _: ()) {}

        fn clone_self(&self) -> ImplBox<(), (), S4> {
            ImplBox::from_impl(self.clone())
        }
    }

    impl AdapterImpl<(), (), S4> for Liar {
        fn call(&mut self, _: ()) {}

        fn clone_self(&self) -> ImplBox<(), (), S4> {
            ImplBox::from_impl(Other)
        }
    }

    #[test]
    #[should_panic(expected = "returned a")]
    fn clone_type_mismatch_panics() {
        let adapter: Adapter<(), ()> = Adapter::from_impl(Liar);
        let _ = adapter.clone();
    }
}
