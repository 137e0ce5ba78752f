use super::{Archive, FileHandle};

use core::iter::Iterator;

/// Iterates over each file in the archive.
/// Actual extraction occurs only once the file's contents are requested.
///
/// Underlying `Archive` must live at least as long.
#[derive(Debug, Clone)]
pub struct ArchiveIterator<'a> {
    ar: &'a Archive<'a>,
    next: usize,
}

impl<'a> ArchiveIterator<'a> {
    /// Create a new iterator over the given `Archive`.
    pub fn new(ar: &'a Archive<'a>) -> ArchiveIterator<'a> {
        return ArchiveIterator { ar, next: 0 };
    }
}

impl<'a> Iterator for ArchiveIterator<'a> {
    type Item = FileHandle<'a>;

    fn next(&mut self) -> Option<FileHandle<'a>> {
        let handle = FileHandle::new(self.ar, self.next)?;
        self.next += 1;
        return Some(handle);
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.ar.len().saturating_sub(self.next);
        return (left, Some(left));
    }
}

impl<'a> ExactSizeIterator for ArchiveIterator<'a> {}
