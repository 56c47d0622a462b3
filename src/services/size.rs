//! Site size aggregation.
//!
//! Unlike the other visitors this one computes across a whole subtree: it
//! walks every folder of a site, including the root folders of its lists,
//! and optionally its subwebs, before returning a single total. It only runs
//! when the web size report is requested.

use crate::models::{FolderAttributes, KindAttributes, Node, NodeKind};
use crate::services::source::{HierarchySource, NodeGuard, SourceError, SourceResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeVisitor {
    include_subwebs: bool,
}

impl SizeVisitor {
    #[must_use]
    pub fn new(include_subwebs: bool) -> Self {
        Self { include_subwebs }
    }

    #[must_use]
    pub fn includes_subwebs(&self) -> bool {
        self.include_subwebs
    }

    /// Total file length under `site`, in bytes
    ///
    /// # Errors
    /// Fails on the first folder or subweb that cannot be read.
    pub fn measure(&self, source: &dyn HierarchySource, site: &Node) -> SourceResult<u64> {
        let mut total = 0u64;

        for folder in NodeGuard::children(source, site, NodeKind::Folder)? {
            total = total.saturating_add(self.folder_size(source, &folder)?);
        }

        // List root folders hang off their list, not the site
        for list in NodeGuard::children(source, site, NodeKind::List)? {
            for folder in NodeGuard::children(source, &list, NodeKind::Folder)? {
                total = total.saturating_add(self.folder_size(source, &folder)?);
            }
        }

        if self.include_subwebs {
            for web in NodeGuard::children(source, site, NodeKind::Site)? {
                total = total.saturating_add(self.measure(source, &web)?);
            }
        }

        log::trace!("Size of {}: {total}", site.location);
        Ok(total)
    }

    fn folder_size(&self, source: &dyn HierarchySource, folder: &Node) -> SourceResult<u64> {
        let attributes = FolderAttributes::from_data(source.attributes(folder)?).map_err(|other| {
            SourceError::Malformed(format!(
                "{} reported {} attributes for a folder",
                folder.location,
                other.kind()
            ))
        })?;

        let mut total = attributes
            .files
            .iter()
            .fold(0u64, |sum, file| sum.saturating_add(file.length));

        for subfolder in NodeGuard::children(source, folder, NodeKind::Folder)? {
            total = total.saturating_add(self.folder_size(source, &subfolder)?);
        }

        Ok(total)
    }
}
