use thiserror::Error;

/// Failures reported by the adapter machinery itself.
///
/// Failures of the wrapped callables are never turned into an `Error`: panics
/// unwind through every adapter layer and `Result` return values are passed
/// back untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An adapter that owns no handler was called.
    #[error("called an empty adapter")]
    EmptyAdapterCall,

    /// A handler's `clone_self` returned a handler of another type.
    #[error("`clone_self` of `{expected}` returned a `{found}`")]
    CloneTypeMismatch {
        /// Type name of the handler being cloned.
        expected: &'static str,
        /// Type name of the handler that came back.
        found: &'static str,
    },
}
