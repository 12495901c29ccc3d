//! Parameter lists as tuples.
//!
//! An adapter's parameters are described by a tuple type: `()` for a nullary
//! callable, `(A,)` for a unary one, `(A, B)` for a binary one and so on, up to
//! eight parameters. The traits here expose the parts of that list the adapter
//! machinery needs: its length, the type at an index, and the split into a
//! first parameter and the rest.

/// A tuple describing an ordered parameter list.
pub trait ParamList {
    /// Number of parameters.
    const ARITY: usize;

    /// True for the empty parameter list `()`.
    const IS_EMPTY: bool = Self::ARITY == 0;
}

/// Indexed lookup into a parameter list.
///
/// ```
/// use smallfn::ParamAt;
///
/// let second: <(u8, String, bool) as ParamAt<1>>::Param = String::from("x");
/// assert_eq!(second, "x");
/// ```
pub trait ParamAt<const I: usize>: ParamList {
    /// The parameter type at position `I`.
    type Param;
}

/// A non-empty parameter list, seen as its first parameter plus the rest.
///
/// The empty list `()` does not implement this trait, which is what rejects
/// binding an argument of a nullary adapter at compile time.
pub trait SplitFirst: ParamList {
    /// The first parameter.
    type First;
    /// The remaining parameters, in order.
    type Rest: ParamList;

    /// Rebuilds the full argument tuple from its first element and the rest.
    fn prepend(first: Self::First, rest: Self::Rest) -> Self;
}

macro_rules! count {
    () => { 0usize };
    ($head:ident $($tail:ident)*) => { 1usize + count!($($tail)*) };
}

macro_rules! impl_param_list {
    ($($T:ident),*) => {
        impl<$($T),*> ParamList for ($($T,)*) {
            const ARITY: usize = count!($($T)*);
        }
    };
}

macro_rules! impl_split_first {
    ($First:ident $(, $Rest:ident)*) => {
        impl<$First, $($Rest),*> SplitFirst for ($First, $($Rest,)*) {
            type First = $First;
            type Rest = ($($Rest,)*);

            #[inline]
            fn prepend(first: Self::First, rest: Self::Rest) -> Self {
                #[allow(non_snake_case)]
                let ($($Rest,)*) = rest;
                (first, $($Rest,)*)
            }
        }
    };
}

macro_rules! impl_param_at {
    ($tuple:tt; $($idx:literal => $P:ident),*) => {
        $( impl_param_at!(@one $tuple $idx $P); )*
    };
    (@one ($($T:ident),*) $idx:literal $P:ident) => {
        impl<$($T),*> ParamAt<$idx> for ($($T,)*) {
            type Param = $P;
        }
    };
}

impl_param_list!();
impl_param_list!(A);
impl_param_list!(A, B);
impl_param_list!(A, B, C);
impl_param_list!(A, B, C, D);
impl_param_list!(A, B, C, D, E);
impl_param_list!(A, B, C, D, E, F);
impl_param_list!(A, B, C, D, E, F, G);
impl_param_list!(A, B, C, D, E, F, G, H);

impl_split_first!(A);
impl_split_first!(A, B);
impl_split_first!(A, B, C);
impl_split_first!(A, B, C, D);
impl_split_first!(A, B, C, D, E);
impl_split_first!(A, B, C, D, E, F);
impl_split_first!(A, B, C, D, E, F, G);
impl_split_first!(A, B, C, D, E, F, G, H);

impl_param_at!((A); 0 => A);
impl_param_at!((A, B); 0 => A, 1 => B);
impl_param_at!((A, B, C); 0 => A, 1 => B, 2 => C);
impl_param_at!((A, B, C, D); 0 => A, 1 => B, 2 => C, 3 => D);
impl_param_at!((A, B, C, D, E); 0 => A, 1 => B, 2 => C, 3 => D, 4 => E);
impl_param_at!((A, B, C, D, E, F); 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F);
impl_param_at!((A, B, C, D, E, F, G); 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G);
impl_param_at!((A, B, C, D, E, F, G, H); 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H);
