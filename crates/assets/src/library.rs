use crate::fallback::{AssetError, Loaded, PendingLoad, spawn_load};
use crate::material::{Material, Surface};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Per-surface materials, loaded in the background from JSON descriptors.
///
/// Surfaces answer with their built-in material until their load settles.
#[derive(Debug)]
pub struct MaterialLibrary {
    current: BTreeMap<Surface, Material>,
    pending: BTreeMap<Surface, PendingLoad<Material>>,
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MaterialLibrary {
    /// Built-in materials only, nothing to load.
    pub fn builtin() -> Self {
        let current = Surface::ALL.iter().map(|s| (*s, s.builtin())).collect();
        Self {
            current,
            pending: BTreeMap::new(),
        }
    }

    /// Start loading every surface's descriptors from `root`.
    pub fn spawn(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        tracing::info!(root = %root.display(), "loading surface materials");
        let mut library = Self::builtin();
        for surface in Surface::ALL {
            let dir = root.clone();
            let pending = spawn_load(
                surface.sources(),
                move |name| read_descriptor(&dir.join(name)),
                move || surface.builtin(),
            );
            library.pending.insert(surface, pending);
        }
        library
    }

    /// Collect finished loads. Returns how many surfaces settled this call.
    pub fn poll(&mut self) -> usize {
        let mut settled = Vec::new();
        for (surface, pending) in &mut self.pending {
            if let Some(loaded) = pending.poll() {
                Self::log_outcome(*surface, loaded);
                self.current.insert(*surface, loaded.value.clone());
            }
            if pending.is_settled() {
                settled.push(*surface);
            }
        }
        for surface in &settled {
            self.pending.remove(surface);
        }
        settled.len()
    }

    pub fn is_settled(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn material(&self, surface: Surface) -> &Material {
        // Every surface is seeded in the constructor.
        &self.current[&surface]
    }

    /// Block until every load settles.
    pub fn wait_all(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        for (surface, load) in pending {
            if let Some(loaded) = load.wait() {
                Self::log_outcome(surface, &loaded);
                self.current.insert(surface, loaded.value);
            }
        }
    }

    fn log_outcome(surface: Surface, loaded: &Loaded<Material>) {
        match &loaded.source {
            Some(source) => {
                tracing::info!(?surface, source = %source, "surface material ready")
            }
            None => tracing::warn!(
                ?surface,
                failures = loaded.warnings.len(),
                "surface material unavailable, keeping built-in"
            ),
        }
    }
}

fn read_descriptor(path: &Path) -> Result<Material, AssetError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
