//! Registry of every viewer embedded in a page, keyed by container id.

use fnv::FnvHashMap;

use crate::backend::SceneBackend;
use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::viewer::Viewer;

pub struct ViewerManager<B: SceneBackend> {
    viewers: FnvHashMap<String, Viewer<B>>,
}

impl<B: SceneBackend> Default for ViewerManager<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: SceneBackend> ViewerManager<B> {
    pub fn new() -> Self {
        Self {
            viewers: FnvHashMap::default(),
        }
    }

    /// Create a viewer for `container_id`. A container holds at most one.
    pub fn mount(
        &mut self,
        container_id: impl Into<String>,
        backend: B,
        config: ViewerConfig,
    ) -> Result<&mut Viewer<B>, ViewerError> {
        let id = container_id.into();
        if self.viewers.contains_key(&id) {
            return Err(ViewerError::AlreadyMounted(id));
        }
        log::info!("[manager] mounting viewer in `{}`", id);
        Ok(self
            .viewers
            .entry(id)
            .or_insert_with(|| Viewer::new(backend, config)))
    }

    /// Dispose and drop the viewer in `container_id`.
    pub fn unmount(&mut self, container_id: &str) -> Result<(), ViewerError> {
        let mut viewer = self
            .viewers
            .remove(container_id)
            .ok_or_else(|| ViewerError::UnknownViewer(container_id.to_string()))?;
        viewer.dispose();
        log::info!("[manager] unmounted viewer in `{}`", container_id);
        Ok(())
    }

    pub fn get(&self, container_id: &str) -> Result<&Viewer<B>, ViewerError> {
        self.viewers
            .get(container_id)
            .ok_or_else(|| ViewerError::UnknownViewer(container_id.to_string()))
    }

    pub fn get_mut(&mut self, container_id: &str) -> Result<&mut Viewer<B>, ViewerError> {
        self.viewers
            .get_mut(container_id)
            .ok_or_else(|| ViewerError::UnknownViewer(container_id.to_string()))
    }

    pub fn contains(&self, container_id: &str) -> bool {
        self.viewers.contains_key(container_id)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Viewer<B>)> {
        self.viewers.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.viewers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.viewers.is_empty()
    }
}
