use derive_more::{Display, Error};

/// Returned by [`OnceCell::set`](super::OnceCell::set) when the cell already holds a value. The
/// value that couldn't be stored is handed back in `rejected`.
#[derive(Debug, Display, Error)]
#[display("Cell has already been initialized!")]
pub struct AlreadySetError<T> {
    #[error(not(source))]
    pub rejected: T,
}
