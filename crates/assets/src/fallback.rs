use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// Errors from a single load attempt.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of a fallback load.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub value: T,
    /// The source that succeeded, or `None` when the default was used.
    pub source: Option<String>,
    /// One line per failed attempt, plus one if every source failed.
    pub warnings: Vec<String>,
}

impl<T> Loaded<T> {
    pub fn used_default(&self) -> bool {
        self.source.is_none()
    }
}

/// Try `sources` in order with `fetch`; the first success wins and later
/// sources are not touched. If all fail, return `default()` and a warning.
pub fn load_first<T, F, D>(sources: &[String], mut fetch: F, default: D) -> Loaded<T>
where
    F: FnMut(&str) -> Result<T, AssetError>,
    D: FnOnce() -> T,
{
    let mut warnings = Vec::new();
    for source in sources {
        match fetch(source.as_str()) {
            Ok(value) => {
                tracing::debug!(source = %source, "asset loaded");
                return Loaded {
                    value,
                    source: Some(source.clone()),
                    warnings,
                };
            }
            Err(e) => {
                tracing::debug!(source = %source, "asset source failed: {e}");
                warnings.push(format!("{source}: {e}"));
            }
        }
    }
    tracing::warn!(?sources, "all asset sources failed, using default");
    warnings.push(format!("all {} sources failed", sources.len()));
    Loaded {
        value: default(),
        source: None,
        warnings,
    }
}

/// A load running on a background thread.
#[derive(Debug)]
pub struct PendingLoad<T> {
    rx: Option<Receiver<Loaded<T>>>,
    result: Option<Loaded<T>>,
}

impl<T> PendingLoad<T> {
    /// An already settled load.
    pub fn ready(result: Loaded<T>) -> Self {
        Self {
            rx: None,
            result: Some(result),
        }
    }

    /// Non-blocking check. Returns the result once it has arrived.
    pub fn poll(&mut self) -> Option<&Loaded<T>> {
        if self.result.is_none() {
            if let Some(rx) = &self.rx {
                match rx.try_recv() {
                    Ok(loaded) => {
                        self.result = Some(loaded);
                        self.rx = None;
                    }
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        tracing::warn!("asset loader exited without a result");
                        self.rx = None;
                    }
                }
            }
        }
        self.result.as_ref()
    }

    /// True once a result arrived or the loader is gone.
    pub fn is_settled(&self) -> bool {
        self.result.is_some() || self.rx.is_none()
    }

    /// Block until the load settles. For tools and tests; the frame loop
    /// uses [`PendingLoad::poll`].
    pub fn wait(mut self) -> Option<Loaded<T>> {
        if self.result.is_none() {
            if let Some(rx) = self.rx.take() {
                self.result = rx.recv().ok();
            }
        }
        self.result
    }
}

/// Run [`load_first`] on a background thread. If the thread cannot be
/// started the load settles empty and callers keep their placeholder.
pub fn spawn_load<T, F, D>(sources: Vec<String>, fetch: F, default: D) -> PendingLoad<T>
where
    T: Send + 'static,
    F: FnMut(&str) -> Result<T, AssetError> + Send + 'static,
    D: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let job = move || {
        let loaded = load_first(&sources, fetch, default);
        let _ = tx.send(loaded);
    };
    match thread::Builder::new().name("asset-load".into()).spawn(job) {
        Ok(_) => PendingLoad {
            rx: Some(rx),
            result: None,
        },
        Err(e) => {
            tracing::warn!("could not start asset loader thread: {e}");
            PendingLoad {
                rx: None,
                result: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn missing() -> AssetError {
        AssetError::Io(io::Error::new(io::ErrorKind::NotFound, "missing"))
    }

    fn sources(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_success_wins() {
        let mut tried = Vec::new();
        let loaded = load_first(
            &sources(&["a", "b", "c"]),
            |s| {
                tried.push(s.to_string());
                if s == "b" { Ok(2) } else { Err(missing()) }
            },
            || 0,
        );
        assert_eq!(loaded.value, 2);
        assert_eq!(loaded.source.as_deref(), Some("b"));
        assert_eq!(tried, vec!["a", "b"]);
        assert_eq!(loaded.warnings.len(), 1);
    }

    #[test]
    fn exhaustion_uses_default_with_warning() {
        let loaded = load_first(&sources(&["a", "b"]), |_| Err::<i32, _>(missing()), || 7);
        assert_eq!(loaded.value, 7);
        assert!(loaded.used_default());
        assert_eq!(loaded.warnings.len(), 3);
        assert!(loaded.warnings.last().unwrap().contains("all 2 sources failed"));
    }

    #[test]
    fn empty_source_list_uses_default() {
        let loaded = load_first(&[], |_| Ok(1), || 5);
        assert_eq!(loaded.value, 5);
        assert!(loaded.used_default());
    }

    #[test]
    fn background_load_completes() {
        let pending = spawn_load(sources(&["x"]), |_| Ok(String::from("done")), String::new);
        let loaded = pending.wait().unwrap();
        assert_eq!(loaded.value, "done");
    }

    #[test]
    fn ready_load_polls_immediately() {
        let mut pending = PendingLoad::ready(Loaded {
            value: 1,
            source: None,
            warnings: Vec::new(),
        });
        assert!(pending.is_settled());
        assert_eq!(pending.poll().unwrap().value, 1);
    }
}
