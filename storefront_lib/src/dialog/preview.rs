//! Image preview resources for the image change dialog.
//!
//! A preview is acquired when a file is picked and must be released exactly
//! once: when another file replaces it, when the file is removed, and when the
//! dialog closes or goes away. [`PreviewHandle`] releases on drop, so each of
//! those paths is just dropping the handle.

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use storefront_api::types::ImageUpload;

/// Mints and revokes preview URLs.
pub trait PreviewStore: Send + Sync {
    fn create(&self, file: &ImageUpload) -> String;
    fn revoke(&self, url: &str);
}

/// In-memory store handing out `blob:preview/<n>` URLs.
#[derive(Debug, Default)]
pub struct ObjectUrlStore {
    next: AtomicU64,
    live: Mutex<HashSet<String>>,
}

impl ObjectUrlStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of URLs created and not yet revoked.
    pub fn live_count(&self) -> usize {
        self.live.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl PreviewStore for ObjectUrlStore {
    fn create(&self, file: &ImageUpload) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        let url = format!("blob:preview/{}", n);
        tracing::debug!("Created preview {} for {}", url, file.file_name);
        self.live
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(url.clone());
        url
    }

    fn revoke(&self, url: &str) {
        let removed = self
            .live
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(url);
        if !removed {
            tracing::warn!("Preview {} revoked twice or never created", url);
        }
    }
}

/// Owns one preview URL and revokes it on drop.
pub struct PreviewHandle {
    url: String,
    store: Arc<dyn PreviewStore>,
}

impl PreviewHandle {
    pub fn acquire(store: &Arc<dyn PreviewStore>, file: &ImageUpload) -> Self {
        Self {
            url: store.create(file),
            store: Arc::clone(store),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.store.revoke(&self.url);
    }
}

impl fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewHandle").field("url", &self.url).finish()
    }
}

/// The file picked in the image change dialog and its preview.
pub struct ImageSelection {
    store: Arc<dyn PreviewStore>,
    file: Option<ImageUpload>,
    preview: Option<PreviewHandle>,
}

impl ImageSelection {
    pub fn new(store: Arc<dyn PreviewStore>) -> Self {
        Self {
            store,
            file: None,
            preview: None,
        }
    }

    /// Replaces the selection. The old preview is released before the new
    /// one is created.
    pub fn select(&mut self, file: ImageUpload) {
        drop(self.preview.take());
        self.preview = Some(PreviewHandle::acquire(&self.store, &file));
        self.file = Some(file);
    }

    pub fn clear(&mut self) {
        self.preview = None;
        self.file = None;
    }

    pub fn file(&self) -> Option<&ImageUpload> {
        self.file.as_ref()
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.preview.as_ref().map(PreviewHandle::url)
    }
}

impl fmt::Debug for ImageSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageSelection")
            .field("file", &self.file.as_ref().map(|f| &f.file_name))
            .field("preview", &self.preview)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Logs every create and revoke in order.
    #[derive(Default)]
    pub(crate) struct RecordingStore {
        events: Mutex<Vec<String>>,
    }

    impl RecordingStore {
        pub(crate) fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl PreviewStore for RecordingStore {
        fn create(&self, file: &ImageUpload) -> String {
            self.events
                .lock()
                .unwrap()
                .push(format!("create {}", file.file_name));
            format!("blob:{}", file.file_name)
        }

        fn revoke(&self, url: &str) {
            self.events.lock().unwrap().push(format!("revoke {}", url));
        }
    }

    fn png(name: &str) -> ImageUpload {
        ImageUpload::new(name, "image/png", vec![0x89, 0x50])
    }

    #[test]
    fn replacing_releases_old_before_creating_new() {
        let store = Arc::new(RecordingStore::default());
        let mut selection = ImageSelection::new(store.clone());

        selection.select(png("a.png"));
        selection.select(png("b.png"));
        assert_eq!(selection.preview_url(), Some("blob:b.png"));
        assert_eq!(
            store.events(),
            vec!["create a.png", "revoke blob:a.png", "create b.png"]
        );

        drop(selection);
        assert_eq!(store.events().last().unwrap(), "revoke blob:b.png");
        assert_eq!(store.events().len(), 4);
    }

    #[test]
    fn clear_releases_once() {
        let store = Arc::new(RecordingStore::default());
        let mut selection = ImageSelection::new(store.clone());
        selection.select(png("a.png"));
        selection.clear();
        selection.clear();
        drop(selection);
        assert_eq!(store.events(), vec!["create a.png", "revoke blob:a.png"]);
    }

    #[test]
    fn object_url_store_tracks_live_urls() {
        let store: Arc<dyn PreviewStore> = Arc::new(ObjectUrlStore::new());
        let first = PreviewHandle::acquire(&store, &png("a.png"));
        let second = PreviewHandle::acquire(&store, &png("b.png"));
        assert_eq!(first.url(), "blob:preview/1");
        assert_eq!(second.url(), "blob:preview/2");
        drop(first);
        drop(second);

        let concrete = ObjectUrlStore::new();
        let url = concrete.create(&png("c.png"));
        assert_eq!(concrete.live_count(), 1);
        concrete.revoke(&url);
        assert_eq!(concrete.live_count(), 0);
    }
}
