use std::cell::Cell;
use std::rc::Rc;

use smallfn::space::{S1, S64};
use smallfn::{Adapter, Error, ParamList};

fn counter() -> Adapter<(), u32> {
    let mut calls = 0;
    Adapter::new(move || {
        calls += 1;
        calls
    })
}

#[test]
fn copies_are_independent() {
    let mut original = counter();
    let mut copy = original.clone();

    let mut last_copy = 0;
    for _ in 0..3 {
        last_copy = copy.call(());
    }
    let mut last_original = 0;
    for _ in 0..2 {
        last_original = original.call(());
    }

    assert_eq!(last_copy, 3);
    assert_eq!(last_original, 2);
}

#[test]
fn copy_takes_current_state() {
    let mut original = counter();
    original.call(());
    original.call(());

    let mut copy = original.clone();
    assert_eq!(copy.call(()), 3);
    assert_eq!(original.call(()), 3);
}

#[test]
fn truth_test() {
    let empty: Adapter<(i32,), i32> = Adapter::default();
    assert!(!empty.is_bound());

    let mut source: Adapter<(i32,), i32> = Adapter::new(|x: i32| x + 1);
    assert!(source.is_bound());

    let mut destination = source.take();
    assert!(!source.is_bound());
    assert!(destination.is_bound());
    assert_eq!(destination.call((1,)), 2);
    assert_eq!(source.try_call((1,)), Err(Error::EmptyAdapterCall));
}

#[test]
fn empty_call_is_reported() {
    let mut empty: Adapter<(String,), usize> = Adapter::empty();
    assert_eq!(
        empty.try_call((String::from("abc"),)),
        Err(Error::EmptyAdapterCall)
    );
    assert_eq!(Error::EmptyAdapterCall.to_string(), "called an empty adapter");
}

#[test]
#[should_panic(expected = "called an empty adapter")]
fn empty_call_panics() {
    let mut empty: Adapter<(), u32> = Adapter::empty();
    let _ = empty.call(());
}

#[test]
fn guarded_call() {
    let mut adapters: Vec<Adapter<(u8,), u8>> =
        vec![Adapter::new(|x: u8| x * 2), Adapter::empty(), Adapter::new(|x: u8| x + 1)];

    let results: Vec<u8> = adapters
        .iter_mut()
        .filter(|adapter| adapter.is_bound())
        .map(|adapter| adapter.call((10,)))
        .collect();
    assert_eq!(results, [20, 11]);
}

#[test]
fn plain_functions() {
    fn parse(text: &'static str, radix: u32) -> Option<i64> {
        i64::from_str_radix(text, radix).ok()
    }

    let mut adapter: Adapter<(&'static str, u32), Option<i64>> = Adapter::new(parse);
    assert_eq!(adapter.call(("ff", 16)), Some(255));
    assert_eq!(adapter.call(("zz", 10)), None);
}

#[test]
fn arities_up_to_eight() {
    let mut sum: Adapter<(u8, u8, u8, u8, u8, u8, u8, u8), u32> = Adapter::new(
        |a: u8, b: u8, c: u8, d: u8, e: u8, f: u8, g: u8, h: u8| {
            [a, b, c, d, e, f, g, h].iter().map(|&x| u32::from(x)).sum()
        },
    );
    assert_eq!(sum.arity(), 8);
    assert_eq!(sum.call((1, 2, 3, 4, 5, 6, 7, 8)), 36);
}

#[test]
fn assignment_drops_previous_handler_once() {
    struct Tracked(Rc<Cell<u32>>);

    impl Clone for Tracked {
        fn clone(&self) -> Self {
            Tracked(self.0.clone())
        }
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    let drops = Rc::new(Cell::new(0));
    let tracked = Tracked(drops.clone());
    let mut adapter: Adapter<(), u32> = Adapter::new(move || tracked.0.get());
    assert_eq!(adapter.call(()), 0);

    adapter = Adapter::new(|| 7);
    assert_eq!(drops.get(), 1);
    assert_eq!(adapter.call(()), 7);

    drop(adapter);
    assert_eq!(drops.get(), 1);
}

#[test]
fn heap_and_inline_handlers_behave_alike() {
    let big = [3u64; 32];

    let mut tiny: Adapter<(usize,), u64, S1> = Adapter::new(move |i: usize| big[i]);
    let mut roomy: Adapter<(usize,), u64, S64> = Adapter::new(move |i: usize| big[i]);
    assert!(!tiny.is_inline());
    assert!(roomy.is_inline());

    let mut tiny_copy = tiny.clone();
    let mut roomy_copy = roomy.clone();
    assert!(!tiny_copy.is_inline());
    assert!(roomy_copy.is_inline());

    for adapter in [&mut tiny_copy, &mut tiny] {
        assert_eq!(adapter.call((31,)), 3);
    }
    for adapter in [&mut roomy_copy, &mut roomy] {
        assert_eq!(adapter.call((0,)), 3);
    }
}

#[test]
fn generic_code_clones_and_calls() {
    fn call_on_copy<Args, R>(adapter: &Adapter<Args, R>, args: Args) -> Result<R, Error>
    where
        Args: ParamList + 'static,
        R: 'static,
    {
        let mut copy = adapter.clone();
        assert_eq!(copy.is_bound(), adapter.is_bound());
        copy.try_call(args)
    }

    let neg: Adapter<(i64,), i64> = Adapter::new(|x: i64| -x);
    assert_eq!(call_on_copy(&neg, (4,)), Ok(-4));
    assert_eq!(call_on_copy(&Adapter::<(), ()>::empty(), ()), Err(Error::EmptyAdapterCall));
    assert!(format!("{neg:?}").contains("arity: 1"));
}
