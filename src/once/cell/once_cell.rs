use std::cell::UnsafeCell;
use std::convert::Infallible;
use std::fmt::{self, Debug, Formatter};
use std::mem::MaybeUninit;

use super::error::AlreadySetError;
use crate::once::gate::Once;

/// A thread-safe cell that can be written exactly once.
///
/// The cell starts empty. The first thread to construct a value through it wins; all threads,
/// forever after, observe that same value by shared reference. Construction is observably
/// atomic: a reader either sees no value at all or the complete value, never a partial one, and
/// no two readers ever see different values.
///
/// All synchronization is delegated to [`Once`]; the cell itself only manages the slot the value
/// lives in. Slot invariant: the slot is initialized exactly when the gate is ready. Failed or
/// panicked constructors never write the slot, so rolling the gate back is enough to restore the
/// invariant.
///
/// # Examples
/// ```
/// use std::thread;
///
/// use sync_lib::once::cell::OnceCell;
///
/// static NAME: OnceCell<String> = OnceCell::new();
///
/// let first = thread::spawn(|| NAME.get_or_init(|| "main".to_owned()).as_str());
/// let second = NAME.get_or_init(|| "other".to_owned()).as_str();
///
/// // Whichever thread won, both observe the same instance.
/// assert_eq!(first.join().unwrap(), second);
/// ```
pub struct OnceCell<T> {
    gate: Once,
    slot: UnsafeCell<MaybeUninit<T>>,
}

// SAFETY: Sharing a OnceCell only hands out &T (requiring T: Sync) but also allows another
// thread to construct the T that a later owner will drop, which moves a T across threads
// (requiring T: Send).
unsafe impl<T: Send + Sync> Sync for OnceCell<T> {}

// SAFETY: Sending the cell sends the value inside it, nothing more.
unsafe impl<T: Send> Send for OnceCell<T> {}

impl<T> OnceCell<T> {
    /// Creates a new, empty cell. No memory is touched until a value is constructed.
    ///
    /// # Examples
    /// ```
    /// use sync_lib::once::cell::OnceCell;
    /// let cell: OnceCell<u8> = OnceCell::new();
    /// assert_eq!(cell.get(), None);
    /// ```
    pub const fn new() -> OnceCell<T> {
        OnceCell {
            gate: Once::new(),
            slot: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }

    /// # Safety
    /// The gate must be ready.
    unsafe fn value_unchecked(&self) -> &T {
        // SAFETY: Per the slot invariant, a ready gate means an initialized slot, and shared
        // references to the value are the only access handed out after that point.
        unsafe { (*self.slot.get()).assume_init_ref() }
    }

    /// Returns a reference to the value, or [`None`] if nothing has been constructed yet.
    ///
    /// This never blocks: a cell that is mid-construction on another thread reads as empty.
    pub fn get(&self) -> Option<&T> {
        if self.gate.is_ready() {
            // SAFETY: The gate is ready, so the slot is initialized and its write
            // happened-before the Acquire load in is_ready.
            Some(unsafe { self.value_unchecked() })
        } else {
            None
        }
    }

    /// Returns a mutable reference to the value, or [`None`] if the cell is empty.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        if self.gate.is_ready() {
            // SAFETY: The gate is ready so the slot is initialized, and &mut self means no other
            // reference exists.
            Some(unsafe { (*self.slot.get()).assume_init_mut() })
        } else {
            None
        }
    }

    /// Returns the value, constructing it with `f` if the cell is empty. All concurrent callers
    /// block until exactly one construction completes, then receive the same reference.
    ///
    /// If `f` panics, the panic propagates to its caller and the cell stays empty; blocked
    /// callers are released and race to construct with their own closures.
    ///
    /// Calling `get_or_init` from within `f` on the same cell deadlocks.
    ///
    /// # Examples
    /// ```
    /// use sync_lib::once::cell::OnceCell;
    ///
    /// let cell = OnceCell::new();
    /// assert_eq!(*cell.get_or_init(|| 92), 92);
    /// assert_eq!(*cell.get_or_init(|| unreachable!("already full")), 92);
    /// ```
    pub fn get_or_init<F>(&self, f: F) -> &T
    where
        F: FnOnce() -> T,
    {
        match self.get_or_try_init(|| Ok::<T, Infallible>(f())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Returns the value, constructing it with the fallible `f` if the cell is empty.
    ///
    /// An `Err` from `f` is returned to its caller alone and leaves the cell empty and
    /// retryable; released waiters race to construct with their own closures, so a blocked
    /// caller never receives an error that somebody else's closure produced.
    ///
    /// # Examples
    /// ```
    /// use sync_lib::once::cell::OnceCell;
    ///
    /// let cell: OnceCell<u8> = OnceCell::new();
    /// assert!(cell.get_or_try_init(|| "nope".parse::<u8>()).is_err());
    /// assert_eq!(cell.get(), None);
    ///
    /// assert_eq!(cell.get_or_try_init(|| "92".parse::<u8>()), Ok(&92));
    /// ```
    pub fn get_or_try_init<F, E>(&self, f: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.gate.try_call_once(|| {
            let value = f()?;
            // SAFETY: Inside the gate's initializing section this thread has exclusive access to
            // the slot, and the slot invariant says it is currently uninitialized, so nothing is
            // overwritten or leaked.
            unsafe {
                (*self.slot.get()).write(value);
            }
            Ok(())
        })?;
        // SAFETY: The gate is now ready, so the slot is initialized.
        Ok(unsafe { self.value_unchecked() })
    }

    /// Stores `value` if the cell is empty. If a value is already present (or being constructed
    /// by another thread, in which case this call blocks until it finishes), the rejected value
    /// is handed back in the error.
    ///
    /// # Examples
    /// ```
    /// use sync_lib::once::cell::OnceCell;
    ///
    /// let cell = OnceCell::new();
    /// assert!(cell.set(1).is_ok());
    ///
    /// let rejected = cell.set(2).unwrap_err().rejected;
    /// assert_eq!(rejected, 2);
    /// assert_eq!(cell.get(), Some(&1));
    /// ```
    pub fn set(&self, value: T) -> Result<(), AlreadySetError<T>> {
        let mut value = Some(value);
        self.get_or_init(|| match value.take() {
            Some(value) => value,
            None => unreachable!(),
        });
        match value {
            None => Ok(()),
            Some(rejected) => Err(AlreadySetError { rejected }),
        }
    }

    /// Removes the value from the cell, leaving it empty and ready to construct again.
    pub fn take(&mut self) -> Option<T> {
        if self.gate.is_ready() {
            self.gate = Once::new();
            // SAFETY: The old gate was ready so the slot was initialized; the fresh gate above
            // marks it uninitialized again, so the value is read out exactly once.
            Some(unsafe { self.slot.get_mut().assume_init_read() })
        } else {
            None
        }
    }

    /// Consumes the cell, returning the value if one was constructed.
    ///
    /// # Examples
    /// ```
    /// use sync_lib::once::cell::OnceCell;
    ///
    /// let cell = OnceCell::new();
    /// cell.set("instance").ok();
    /// assert_eq!(cell.into_inner(), Some("instance"));
    /// ```
    pub fn into_inner(mut self) -> Option<T> {
        self.take()
    }
}

impl<T> Drop for OnceCell<T> {
    fn drop(&mut self) {
        if self.gate.is_ready() {
            // SAFETY: The gate is ready so the slot is initialized; the cell is being dropped so
            // the value can never be read again.
            unsafe { self.slot.get_mut().assume_init_drop() }
        }
    }
}

impl<T> Default for OnceCell<T> {
    fn default() -> OnceCell<T> {
        OnceCell::new()
    }
}

impl<T> From<T> for OnceCell<T> {
    fn from(value: T) -> OnceCell<T> {
        let cell = OnceCell::new();
        match cell.set(value) {
            Ok(()) => cell,
            Err(_) => unreachable!(),
        }
    }
}

impl<T: Clone> Clone for OnceCell<T> {
    fn clone(&self) -> OnceCell<T> {
        match self.get() {
            Some(value) => OnceCell::from(value.clone()),
            None => OnceCell::new(),
        }
    }
}

impl<T: PartialEq> PartialEq for OnceCell<T> {
    fn eq(&self, other: &OnceCell<T>) -> bool {
        self.get() == other.get()
    }
}

impl<T: Eq> Eq for OnceCell<T> {}

impl<T: Debug> Debug for OnceCell<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("OnceCell").field(value).finish(),
            None => write!(f, "OnceCell({:?})", self.gate.state()),
        }
    }
}
