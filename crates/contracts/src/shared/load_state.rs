use std::fmt::Display;

/// What a data-driven widget shows. Exactly one state at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    #[default]
    Loading,
    Failed(String),
    Empty,
    Loaded(T),
}

impl<T> LoadState<T> {
    /// `Empty` when the loaded collection has no rows.
    pub fn from_rows<E: Display>(result: Result<T, E>) -> Self
    where
        T: IsEmpty,
    {
        match result {
            Ok(rows) if rows.is_empty() => LoadState::Empty,
            Ok(rows) => LoadState::Loaded(rows),
            Err(err) => LoadState::Failed(err.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadState<U> {
        match self {
            LoadState::Loading => LoadState::Loading,
            LoadState::Failed(message) => LoadState::Failed(message),
            LoadState::Empty => LoadState::Empty,
            LoadState::Loaded(value) => LoadState::Loaded(f(value)),
        }
    }
}

/// Collections that can be checked for emptiness.
pub trait IsEmpty {
    fn is_empty(&self) -> bool;
}

impl<T> IsEmpty for Vec<T> {
    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let ok: Result<Vec<u8>, String> = Ok(vec![1, 2]);
        assert_eq!(LoadState::from_rows(ok), LoadState::Loaded(vec![1, 2]));

        let empty: Result<Vec<u8>, String> = Ok(vec![]);
        assert_eq!(LoadState::from_rows(empty), LoadState::Empty);

        let failed: Result<Vec<u8>, String> = Err("HTTP 500".into());
        let state = LoadState::from_rows(failed);
        assert_eq!(state.error(), Some("HTTP 500"));
        assert!(state.loaded().is_none());
    }

    #[test]
    fn test_default_is_loading() {
        let state: LoadState<Vec<u8>> = LoadState::default();
        assert!(state.is_loading());
        assert_eq!(state.map(|v| v.len()), LoadState::Loading);
    }
}
