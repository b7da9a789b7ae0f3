use crate::error::SourceError;

/// Outcome of a single provider call.
///
/// Callers map every variant explicitly. For title resolution both `Empty`
/// and `Failed` mean "no platforms"; only the first listing page treats a
/// failure differently from a successful empty answer.
#[derive(Debug)]
pub enum Lookup<T> {
    /// The request succeeded and carried data
    Found(T),
    /// The request succeeded but the answer had nothing usable in it
    Empty,
    /// The request failed (transport error, non-200 status, malformed body)
    Failed(SourceError),
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::Empty,
        }
    }
}
