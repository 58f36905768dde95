//! Decoding of mesh geometry from text formats.

pub mod obj;

use crate::error::Error;

/// Boundary trait for whatever supplies raw document text; the decoder
/// itself never opens files or sockets.
///
/// `path` is passed through uninterpreted, so an implementation may treat
/// it as a filesystem path, a URL, an archive member name, and so on.
pub trait TextSource {
    /// Fetch the full text of the document at `path`.
    ///
    /// # Errors
    ///
    /// * [`Error::Fetch`] when the document cannot be supplied. Decoding
    ///   is never attempted in that case.
    fn fetch(&self, path: &str) -> Result<String, Error>;
}

/// [TextSource] reading documents from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl TextSource for FsSource {
    fn fetch(&self, path: &str) -> Result<String, Error> {
        std::fs::read_to_string(path).map_err(|source| Error::Fetch {
            path: path.to_owned(),
            source: Box::new(source),
        })
    }
}
