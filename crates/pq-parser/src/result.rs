//! Three-state outcome of a read that may leave useful work behind on failure.

/// `Ok` with the finished value, `Partial` with whatever was built before the
/// error, or `Err` when nothing usable exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartialResult<T, P, E> {
    Ok(T),
    Partial { partial: P, error: E },
    Err(E),
}

impl<T, P, E> PartialResult<T, P, E> {
    pub fn is_ok(&self) -> bool {
        matches!(self, PartialResult::Ok(_))
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, PartialResult::Partial { .. })
    }

    pub fn is_err(&self) -> bool {
        matches!(self, PartialResult::Err(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            PartialResult::Ok(value) => Some(value),
            _ => None,
        }
    }

    pub fn partial(self) -> Option<P> {
        match self {
            PartialResult::Partial { partial, .. } => Some(partial),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            PartialResult::Ok(_) => None,
            PartialResult::Partial { error, .. } | PartialResult::Err(error) => Some(error),
        }
    }

    /// Collapses to a plain `Result`, dropping any partial value.
    pub fn into_result(self) -> Result<T, E> {
        match self {
            PartialResult::Ok(value) => Ok(value),
            PartialResult::Partial { error, .. } | PartialResult::Err(error) => Err(error),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PartialResult<U, P, E> {
        match self {
            PartialResult::Ok(value) => PartialResult::Ok(f(value)),
            PartialResult::Partial { partial, error } => PartialResult::Partial { partial, error },
            PartialResult::Err(error) => PartialResult::Err(error),
        }
    }
}
