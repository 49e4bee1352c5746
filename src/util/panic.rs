// AssertUnwindSafe: the types under test here contain interior mutability (Cell, UnsafeCell)
// that catch_unwind would otherwise reject, and each assertion discards the poked value anyway.
#[allow(unused_macros)]
macro_rules! assert_panics {
    ($run:block) => {
        assert_panics!($run, "assertion failed to panic")
    };
    ($run:block, $msg:literal) => {
        assert!(
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $run)).is_err(),
            $msg
        );
        println!("^ panic caught");
    };
    ($run:block, contains $needle:literal) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $run)) {
            Ok(_) => panic!("assertion failed to panic"),
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .copied()
                    .map(str::to_owned)
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_default();
                assert!(
                    message.contains($needle),
                    "panic message {message:?} should contain {:?}",
                    $needle
                );
                println!("^ panic caught");
            }
        }
    };
}

#[allow(unused_imports)]
pub(crate) use assert_panics;
