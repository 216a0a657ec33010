//! Error types for the print pipeline.
//!
//! The pipeline reports exactly two kinds of failure: the source document
//! could not be turned into a bitmap, or the OS spooler refused the job.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type returned by [`dispatch`](crate::dispatch).
///
/// Discriminates between document-side and printer-side failures so the
/// interface layer can pick the right dialog without inspecting strings.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Print(#[from] PrintError),
}

/// Failures while loading or rasterizing the source document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The selected path does not exist on disk.
    ///
    /// Raised before the document is opened; nothing has been rendered or
    /// spooled when this is returned.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The renderer rejected the file or failed mid-page.
    #[error(transparent)]
    Render(#[from] mupdf::Error),

    /// The rendered page image could not be written to disk.
    #[error("could not write page image: {0}")]
    PageImage(#[from] image::ImageError),
}

/// Failures while handing the bitmap to the OS print spooler.
#[derive(Error, Debug)]
pub enum PrintError {
    /// The spooler query or submission command could not be run at all.
    #[error("could not invoke print spooler: {0}")]
    SpoolerUnavailable(#[from] std::io::Error),

    /// The spooler ran but rejected the request.
    ///
    /// Carries the spooler's own diagnostic verbatim; there is no retry and
    /// no distinction between transient and permanent causes.
    #[error("print spooler failed: {0}")]
    Rejected(String),

    /// The bitmap could not be encoded into a spool file.
    #[error("could not encode spool image: {0}")]
    SpoolImage(#[from] image::ImageError),
}
