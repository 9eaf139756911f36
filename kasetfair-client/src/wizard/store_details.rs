use shared::models::LayoutInfo;

use crate::api::Attachment;

/// Store-details (booth layout) step draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutDraft {
    pub description: String,
    pub file: Option<Attachment>,
    /// Name of a layout file already on the server; the file itself is not
    /// downloaded back.
    pub uploaded_file_name: Option<String>,
}

impl LayoutDraft {
    pub fn seed(&mut self, layout: &LayoutInfo) {
        if let Some(description) = &layout.description {
            self.description.clone_from(description);
        }
        if let Some(file_name) = layout.file_name.as_ref().filter(|name| !name.is_empty()) {
            self.uploaded_file_name = Some(file_name.clone());
            self.file = None;
        }
    }

    /// Name to show for the layout file: a fresh pick, else the stored one.
    #[must_use]
    pub fn display_file_name(&self) -> Option<&str> {
        self.file
            .as_ref()
            .map(|file| file.file_name.as_str())
            .or(self.uploaded_file_name.as_deref())
    }
}
