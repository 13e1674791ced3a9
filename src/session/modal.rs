//! Preview modal state. Holds at most one document; opening replaces it.

use crate::preview::PreviewDocument;

#[derive(Debug, Clone, Default)]
pub struct ModalController {
    document: Option<PreviewDocument>,
}

impl ModalController {
    pub fn open(&mut self, doc: PreviewDocument) {
        self.document = Some(doc);
    }

    pub fn close(&mut self) {
        self.document = None;
    }

    pub fn is_open(&self) -> bool {
        self.document.is_some()
    }

    pub fn document(&self) -> Option<&PreviewDocument> {
        self.document.as_ref()
    }
}
