//! Snapshots of backend fetches

/// Lifecycle of one fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Success,
    Error,
}

/// Latest result of a fetch, with a usable value even before success
///
/// `data` holds the caller's default until a response arrives and after a
/// failure, so consumers can always render it.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSnapshot<T> {
    pub data: T,
    pub error: Option<String>,
    pub status: FetchStatus,
}

impl<T> FetchSnapshot<T> {
    pub fn success(data: T) -> Self {
        Self {
            data,
            error: None,
            status: FetchStatus::Success,
        }
    }

    pub fn failed(default: T, error: impl Into<String>) -> Self {
        Self {
            data: default,
            error: Some(error.into()),
            status: FetchStatus::Error,
        }
    }
}

impl<T: Default> Default for FetchSnapshot<T> {
    fn default() -> Self {
        Self {
            data: T::default(),
            error: None,
            status: FetchStatus::Idle,
        }
    }
}
