//! Intake queue: ordered files awaiting or past metadata generation, with
//! per-file selection and the preview resources derived from them.

use std::collections::HashSet;
use uuid::Uuid;

use stockmeta_core::models::{FileHandle, FileStatus, MediaKind, PreviewHandle, QueuedFile};

/// Static preview shown for video entries
pub const VIDEO_PLACEHOLDER_URL: &str = "placeholder://video";

#[derive(Debug, Default)]
pub struct IntakeQueue {
    files: Vec<QueuedFile>,
    /// Ids of minted preview handles not yet revoked
    live_previews: HashSet<Uuid>,
}

impl IntakeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append candidates whose display name is not already queued.
    ///
    /// Duplicates (against the queue or earlier in the same batch) are
    /// skipped silently. New entries start pending and selected. Returns the
    /// ids of the entries actually added, in input order.
    pub fn add_files(&mut self, candidates: Vec<FileHandle>) -> Vec<Uuid> {
        let mut names: HashSet<String> = self.files.iter().map(|f| f.display_name.clone()).collect();
        let mut added = Vec::new();

        for handle in candidates {
            if !names.insert(handle.name.clone()) {
                tracing::debug!(file = %handle.name, "Skipping duplicate file name");
                continue;
            }

            let mut file = QueuedFile::from_handle(handle);
            file.preview = Some(self.mint_preview(file.media_kind));
            added.push(file.id);
            self.files.push(file);
        }

        if !added.is_empty() {
            tracing::info!(added = added.len(), queued = self.files.len(), "Files added to queue");
        }

        added
    }

    fn mint_preview(&mut self, kind: MediaKind) -> PreviewHandle {
        match kind {
            MediaKind::Image => {
                let id = Uuid::new_v4();
                self.live_previews.insert(id);
                PreviewHandle::Object {
                    id,
                    url: format!("preview://{}", id),
                }
            }
            MediaKind::Video => PreviewHandle::Placeholder {
                url: VIDEO_PLACEHOLDER_URL.to_string(),
            },
        }
    }

    fn revoke_preview(&mut self, preview: Option<&PreviewHandle>) {
        if let Some(PreviewHandle::Object { id, .. }) = preview {
            self.live_previews.remove(id);
        }
    }

    /// Remove an entry. Unknown ids are ignored.
    pub fn remove_file(&mut self, id: Uuid) -> Option<QueuedFile> {
        let index = self.files.iter().position(|f| f.id == id)?;
        let removed = self.files.remove(index);
        self.revoke_preview(removed.preview.as_ref());
        tracing::info!(file_id = %id, file = %removed.display_name, "File removed from queue");
        Some(removed)
    }

    /// Empty the queue, revoking every preview.
    pub fn clear(&mut self) {
        let count = self.files.len();
        self.files.clear();
        self.live_previews.clear();
        tracing::info!(removed = count, "Queue cleared");
    }

    /// Toggle selection of one entry. Returns false for unknown ids.
    pub fn set_selected(&mut self, id: Uuid, selected: bool) -> bool {
        match self.files.iter_mut().find(|f| f.id == id) {
            Some(file) => {
                file.selected = selected;
                true
            }
            None => false,
        }
    }

    pub fn select_all(&mut self, selected: bool) {
        for file in &mut self.files {
            file.selected = selected;
        }
    }

    pub fn set_status(&mut self, id: Uuid, status: FileStatus) -> bool {
        match self.files.iter_mut().find(|f| f.id == id) {
            Some(file) => {
                file.status = status;
                true
            }
            None => false,
        }
    }

    pub fn files(&self) -> &[QueuedFile] {
        &self.files
    }

    pub fn get(&self, id: Uuid) -> Option<&QueuedFile> {
        self.files.iter().find(|f| f.id == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.get(id).is_some()
    }

    /// Selected ids in queue order
    pub fn selected_ids(&self) -> Vec<Uuid> {
        self.files.iter().filter(|f| f.selected).map(|f| f.id).collect()
    }

    pub fn selected_count(&self) -> usize {
        self.files.iter().filter(|f| f.selected).count()
    }

    pub fn all_selected(&self) -> bool {
        !self.files.is_empty() && self.files.iter().all(|f| f.selected)
    }

    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.byte_size).sum()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn is_any_processing(&self) -> bool {
        self.files.iter().any(|f| f.status == FileStatus::Processing)
    }

    /// Number of minted previews that have not been revoked
    pub fn live_previews(&self) -> usize {
        self.live_previews.len()
    }
}
