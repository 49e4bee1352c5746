use std::cell::Cell;
use std::fmt::{self, Debug, Formatter};
use std::ops::Deref;

use crate::once::cell::OnceCell;

/// A value constructed on first access, at most once, from a stored closure.
///
/// Dereferencing (or calling [`Lazy::force`]) triggers construction on the first call from any
/// thread; concurrent callers block until it completes and every caller gets a reference to the
/// single constructed instance. After that, access is a single atomic check.
///
/// # Failure
/// The stored closure is [`FnOnce`] and is consumed by the first construction attempt. If that
/// attempt panics, the underlying cell rolls back and stays empty, but the closure is spent:
/// any later access panics with an explicit message instead of constructing. Code that needs
/// failed construction to be retried should use
/// [`OnceCell::get_or_try_init`](crate::once::cell::OnceCell::get_or_try_init), which takes a
/// fresh closure per call.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
///
/// use sync_lib::once::lazy::Lazy;
///
/// static SQUARES: Lazy<HashMap<u32, u32>> = Lazy::new(|| {
///     (0..10).map(|n| (n, n * n)).collect()
/// });
///
/// std::thread::scope(|scope| {
///     for _ in 0..4 {
///         scope.spawn(|| assert_eq!(SQUARES.get(&7), Some(&49)));
///     }
/// });
/// ```
pub struct Lazy<T, F = fn() -> T> {
    cell: OnceCell<T>,
    init: Cell<Option<F>>,
}

// SAFETY: The Cell is only touched inside the cell's one-shot initializing section, which admits
// a single thread, so sharing Lazy is as safe as sharing the OnceCell it wraps; the closure is
// moved to whichever thread runs it, hence F: Send.
unsafe impl<T, F: Send> Sync for Lazy<T, F> where OnceCell<T>: Sync {}

impl<T, F: FnOnce() -> T> Lazy<T, F> {
    /// Creates a new provider with the given constructor. Nothing runs until first access.
    ///
    /// # Examples
    /// ```
    /// use sync_lib::once::lazy::Lazy;
    ///
    /// let lazy = Lazy::new(|| unreachable!("never accessed, never built"));
    /// assert_eq!(Lazy::<u8, _>::get(&lazy), None);
    /// ```
    pub const fn new(init: F) -> Lazy<T, F> {
        Lazy {
            cell: OnceCell::new(),
            init: Cell::new(Some(init)),
        }
    }

    /// Returns the instance, constructing it first if no access has done so yet.
    ///
    /// This is an associated function rather than a method so that it doesn't shadow anything on
    /// `T` through [`Deref`]; `&*this` is equivalent.
    ///
    /// # Panics
    /// Panics if a previous construction attempt panicked (the stored constructor has already
    /// been consumed), or if the constructor itself panics.
    ///
    /// # Examples
    /// ```
    /// use sync_lib::once::lazy::Lazy;
    ///
    /// let counter = std::cell::Cell::new(0);
    /// let lazy = Lazy::new(|| {
    ///     counter.set(counter.get() + 1);
    ///     "instance"
    /// });
    ///
    /// assert_eq!(*Lazy::force(&lazy), "instance");
    /// assert_eq!(*Lazy::force(&lazy), "instance");
    /// assert_eq!(counter.get(), 1);
    /// ```
    pub fn force(this: &Lazy<T, F>) -> &T {
        this.cell.get_or_init(|| match this.init.take() {
            Some(init) => init(),
            None => panic!("constructor consumed by an earlier panicked construction"),
        })
    }

    /// Returns the instance if one has already been constructed, without constructing.
    pub fn get(this: &Lazy<T, F>) -> Option<&T> {
        this.cell.get()
    }
}

impl<T, F: FnOnce() -> T> Deref for Lazy<T, F> {
    type Target = T;

    fn deref(&self) -> &T {
        Lazy::force(self)
    }
}

impl<T: Default> Default for Lazy<T> {
    fn default() -> Lazy<T> {
        Lazy::new(T::default)
    }
}

impl<T: Debug, F> Debug for Lazy<T, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.cell.get() {
            Some(value) => f.debug_tuple("Lazy").field(value).finish(),
            None => write!(f, "Lazy(<unconstructed>)"),
        }
    }
}
