/// Declares a process-wide singleton: a `static` [`Lazy`](crate::once::lazy::Lazy) constructed
/// on first access.
///
/// The instance is never exposed as a raw mutable global; the only way at it is the shared
/// reference the provider hands out. Statics are not dropped, so the instance lives until
/// process teardown.
///
/// # Examples
/// ```
/// use sync_lib::singleton;
///
/// struct Registry {
///     entries: Vec<String>,
/// }
///
/// singleton!(REGISTRY: Registry = Registry { entries: Vec::new() });
///
/// assert!(REGISTRY.entries.is_empty());
/// ```
#[macro_export]
macro_rules! singleton {
    ($(#[$attr:meta])* $vis:vis $name:ident: $ty:ty = $init:expr) => {
        $(#[$attr])*
        $vis static $name: $crate::once::lazy::Lazy<$ty> = $crate::once::lazy::Lazy::new(|| $init);
    };
}
