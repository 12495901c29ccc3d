use std::ptr;

trait Probe {
    fn call(&mut self, x: u32) -> u32;
}

struct Offset(u32);

impl Probe for Offset {
    fn call(&mut self, x: u32) -> u32 {
        x + self.0
    }
}

fn layout_broken(what: &str) -> ! {
    panic!(
        concat!(
            "Assumptions on fat pointer layout are broken: smallfn expects the data ",
            "address to be the first word of {:?}. Enable the `nightly` feature ",
            "or report this on github"
        ),
        what
    );
}

/// Handler storage rewrites the address word of `*const dyn AdapterImpl` when
/// an inline handler moves. Check that the address really is the first word
/// and that rewriting it keeps the vtable usable.
fn check_trait_object_layout() {
    #[repr(C)]
    #[allow(dead_code)]
    struct DynRepr {
        data: *const u8,
        vtable: *const u8,
    }

    let mut first = Offset(1);
    let mut second = Offset(100);

    let first_ptr: *mut dyn Probe = &mut first;
    let repr: DynRepr = unsafe { ptr::read(ptr::addr_of!(first_ptr).cast::<DynRepr>()) };
    if repr.data != ptr::addr_of!(first).cast::<u8>() {
        layout_broken("trait objects");
    }

    let mut moved = first_ptr;
    unsafe {
        ptr::addr_of_mut!(moved)
            .cast::<*mut u8>()
            .write(ptr::addr_of_mut!(second).cast::<u8>());
        if (*moved).call(1) != 101 {
            layout_broken("trait objects");
        }
    }
}

/// `HandlerBox::new_unchecked` also accepts slice pointers, whose address is
/// rewritten the same way. Check that the address comes before the length.
fn check_slice_layout() {
    #[repr(C)]
    struct SliceRepr {
        data: *const u8,
        len: usize,
    }

    let array = [1u8, 2, 3];
    let slice: *const [u8] = &array;
    let repr: SliceRepr = unsafe { ptr::read(ptr::addr_of!(slice).cast::<SliceRepr>()) };
    if repr.data != array.as_ptr() || repr.len != array.len() {
        layout_broken("slices");
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    // Checks the host, not the target; cross builds should use `nightly`.
    if std::env::var_os("CARGO_FEATURE_NIGHTLY").is_none() {
        check_trait_object_layout();
        check_slice_layout();
    }
}
