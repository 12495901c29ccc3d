use ::alloc::alloc::{self, Layout};
use core::fmt;
use core::marker::PhantomData;
use core::mem::{self, ManuallyDrop, MaybeUninit};
use core::ops;
use core::ptr;

use crate::sptr;

/// Owning storage for one handler, inline when it fits and on the heap otherwise.
///
/// A value is stored inside the `Space` buffer when its size and alignment are
/// both no larger than the space's; anything else is moved to a fresh heap
/// allocation. Zero-sized values never allocate. The storage never moves a
/// heap value again once it has been placed.
///
/// `T` is usually a trait object such as `dyn AdapterImpl<Args, R, Space>`, in
/// which case the box is built with [`ImplBox::from_impl`](crate::ImplBox::from_impl)
/// or [`HandlerBox::new_unchecked`]. Slices work through `new_unchecked` too.
/// The box is `Send` or `Sync` whenever `T` is.
///
/// # Example
///
/// ```
/// use smallfn::HandlerBox;
/// use smallfn::space::S2;
///
/// let small: HandlerBox<[usize; 2], S2> = HandlerBox::new([1, 2]);
/// let large: HandlerBox<[usize; 3], S2> = HandlerBox::new([1, 2, 3]);
///
/// assert!(!small.is_heap());
/// assert!(large.is_heap());
/// assert_eq!(large[2], 3);
/// ```
pub struct HandlerBox<T: ?Sized, Space> {
    space: MaybeUninit<Space>,
    // Null address when the value is inline; metadata is always valid.
    ptr: *const T,
    _phantom: PhantomData<T>,
}

impl<T: ?Sized, Space> HandlerBox<T, Space> {
    /// Stores `val` inline or on the heap depending on its layout.
    pub fn new(val: T) -> HandlerBox<T, Space>
    where
        T: Sized,
    {
        let ptr: *const T = &val;
        unsafe { Self::new_unchecked(val, ptr) }
    }

    /// Stores `val` behind the possibly unsized pointer type of `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must have been obtained by coercing a pointer to `val` (for
    /// example `&val as *const dyn Trait`), so that its metadata describes `U`.
    pub unsafe fn new_unchecked<U>(val: U, ptr: *const T) -> HandlerBox<T, Space>
    where
        U: Sized,
    {
        let val = ManuallyDrop::new(val);
        Self::new_copy(&*val, ptr)
    }

    /// Returns true if the value lives in a heap allocation.
    pub fn is_heap(&self) -> bool {
        !self.ptr.is_null()
    }

    unsafe fn new_copy<U>(val: &U, ptr: *const T) -> HandlerBox<T, Space>
    where
        U: ?Sized,
    {
        let layout = Layout::for_value::<U>(val);
        let mut space = MaybeUninit::<Space>::uninit();

        let fits = layout.size() <= mem::size_of::<Space>()
            && layout.align() <= mem::align_of::<Space>();

        let (addr, dst): (*mut u8, *mut u8) = if fits {
            (ptr::null_mut(), space.as_mut_ptr().cast::<u8>())
        } else if layout.size() == 0 {
            let dangling = sptr::dangling(layout.align());
            (dangling, dangling)
        } else {
            let heap = alloc::alloc(layout);
            if heap.is_null() {
                alloc::handle_alloc_error(layout);
            }
            (heap, heap)
        };

        ptr::copy_nonoverlapping(ptr::from_ref(val).cast::<u8>(), dst, layout.size());

        HandlerBox {
            space,
            ptr: sptr::retarget(ptr, addr),
            _phantom: PhantomData,
        }
    }

    fn as_ptr(&self) -> *const T {
        if self.is_heap() {
            self.ptr
        } else {
            sptr::retarget(self.ptr, self.space.as_ptr().cast::<u8>())
        }
    }

    fn as_mut_ptr(&mut self) -> *mut T {
        if self.is_heap() {
            self.ptr.cast_mut()
        } else {
            sptr::retarget_mut(self.ptr, self.space.as_mut_ptr().cast::<u8>())
        }
    }
}

impl<T: ?Sized, Space> ops::Deref for HandlerBox<T, Space> {
    type Target = T;

    fn deref(&self) -> &T {
        unsafe { &*self.as_ptr() }
    }
}

impl<T: ?Sized, Space> ops::DerefMut for HandlerBox<T, Space> {
    fn deref_mut(&mut self) -> &mut T {
        unsafe { &mut *self.as_mut_ptr() }
    }
}

impl<T: ?Sized, Space> ops::Drop for HandlerBox<T, Space> {
    fn drop(&mut self) {
        unsafe {
            let layout = Layout::for_value::<T>(&**self);
            ptr::drop_in_place::<T>(self.as_mut_ptr());
            if self.is_heap() && layout.size() != 0 {
                alloc::dealloc(self.ptr.cast::<u8>().cast_mut(), layout);
            }
        }
    }
}

impl<T: ?Sized, Space> fmt::Pointer for HandlerBox<T, Space> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Pointer::fmt(&self.as_ptr(), f)
    }
}

unsafe impl<T: ?Sized + Send, Space> Send for HandlerBox<T, Space> {}
unsafe impl<T: ?Sized + Sync, Space> Sync for HandlerBox<T, Space> {}
