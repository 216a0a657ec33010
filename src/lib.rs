//! PDF Label Printer
//!
//! This crate prints the first page of a PDF document on a label printer
//! registered with the OS print spooler. The page is rasterized at a fixed
//! 2x scale, resized to the dot width of the selected tape, and submitted
//! as a single one-page job.
//!
//! # Example
//!
//! ```rust,no_run
//! use labelprint::{dispatch, Config, CupsSpooler, PrintRequest};
//!
//! let config = Config::new();
//! let request = PrintRequest::new("invoice.pdf", "7インチ", "QL-720NW");
//! let receipt = dispatch(&config, &request, &CupsSpooler::new()).unwrap();
//! println!("spooled {} page(s)", receipt.pages);
//! ```

mod dispatch;
mod error;
mod media;
mod render;
mod spool;
mod utils;

pub use crate::{
    dispatch::{dispatch, Config, PrintRequest},
    error::{DocumentError, Error, PrintError},
    media::{width_for_label, PaperSize},
    render::render_first_page,
    spool::{CupsSpooler, JobReceipt, Spooler},
    utils::resize_to_width,
};

/// Dot width printed for one labeled tape inch.
///
/// A "6インチ" tape comes out at 192 dots, not the 432pt a point-based
/// reading of the label would give; the hardware expects the `inches * 32`
/// arithmetic.
pub const DOTS_PER_LABEL_INCH: u32 = 32;

/// Width in dots used when the paper-size label is not recognized.
///
/// One inch of a 203 dpi thermal head, the common resolution for the
/// receipt and label printers this tool targets.
pub const FALLBACK_WIDTH_DOTS: u32 = 203;

/// Supersampling factor applied when rasterizing the PDF page.
pub const RENDER_SCALE: f32 = 2.0;
