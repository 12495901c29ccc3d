//! Inline capacity markers.
//!
//! A space type only contributes its size and alignment: a handler is stored
//! inline when it is no larger and no more aligned than the space, and on the
//! heap otherwise. Any sized type works, e.g. `[u8; 24]` or `[u64; 3]`.

/// Space of one machine word.
pub struct S1 {
    _inner: [usize; 1],
}

/// Space of two machine words.
pub struct S2 {
    _inner: [usize; 2],
}

/// Space of four machine words. The default space of an [`Adapter`](crate::Adapter).
pub struct S4 {
    _inner: [usize; 4],
}

/// Space of eight machine words.
pub struct S8 {
    _inner: [usize; 8],
}

/// Space of sixteen machine words.
pub struct S16 {
    _inner: [usize; 16],
}

/// Space of thirty-two machine words.
pub struct S32 {
    _inner: [usize; 32],
}

/// Space of sixty-four machine words.
pub struct S64 {
    _inner: [usize; 64],
}
