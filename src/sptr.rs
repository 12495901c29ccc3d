//! Address surgery on possibly-fat pointers.
//!
//! A [`HandlerBox`](crate::HandlerBox) keeps the vtable of its handler in a
//! `*const dyn AdapterImpl` whose address part changes when the box moves, so
//! it needs to swap the address of a pointer while keeping its metadata.

#[cfg(feature = "nightly")]
mod implementation {
    pub fn dangling(align: usize) -> *mut u8 {
        core::ptr::without_provenance_mut(align)
    }

    pub fn retarget<T: ?Sized>(ptr: *const T, addr: *const u8) -> *const T {
        addr.with_metadata_of(ptr)
    }

    pub fn retarget_mut<T: ?Sized>(ptr: *const T, addr: *mut u8) -> *mut T {
        addr.with_metadata_of(ptr)
    }
}

// The data address is the first word of a fat pointer, checked by build.rs.
#[cfg(not(feature = "nightly"))]
#[allow(clippy::as_conversions)]
mod implementation {
    use core::ptr::addr_of_mut;

    pub fn dangling(align: usize) -> *mut u8 {
        align as _
    }

    pub fn retarget<T: ?Sized>(ptr: *const T, addr: *const u8) -> *const T {
        retarget_mut(ptr, addr.cast_mut()).cast_const()
    }

    pub fn retarget_mut<T: ?Sized>(mut ptr: *const T, addr: *mut u8) -> *mut T {
        let addr_word = addr_of_mut!(ptr).cast::<usize>();
        unsafe { addr_word.write(addr as usize) }
        ptr.cast_mut()
    }
}

pub(crate) use implementation::*;
