use image::RgbImage;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DocumentError, Error};
use crate::media::width_for_label;
use crate::render::render_first_page;
use crate::spool::{JobReceipt, Spooler};
use crate::utils::resize_to_width;
use crate::RENDER_SCALE;

/// File name of the intermediate page image.
const TEMP_IMAGE_NAME: &str = "temp_page.png";

/// Title the job shows up under in the spooler queue.
const JOB_TITLE: &str = "PDF Image Print";

/// Fixed settings for the print pipeline.
///
/// Built once at startup and passed by reference into [`dispatch`]; per-click
/// state travels in [`PrintRequest`] instead.
#[derive(Debug, Clone)]
pub struct Config {
    scale: f32,
    temp_dir: PathBuf,
    job_title: String,
}

impl Config {
    pub fn new() -> Config {
        Config {
            scale: RENDER_SCALE,
            temp_dir: PathBuf::from("."),
            job_title: JOB_TITLE.to_string(),
        }
    }

    /// Override the rasterization scale factor.
    pub fn scale(self, scale: f32) -> Self {
        Config { scale, ..self }
    }

    /// Directory the intermediate page image is written to.
    pub fn temp_dir(self, dir: impl Into<PathBuf>) -> Self {
        Config {
            temp_dir: dir.into(),
            ..self
        }
    }

    pub fn job_title(self, title: impl Into<String>) -> Self {
        Config {
            job_title: title.into(),
            ..self
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// The three form fields of one print invocation.
#[derive(Debug, Clone)]
pub struct PrintRequest {
    pub path: PathBuf,
    pub size_label: String,
    pub printer: String,
}

impl PrintRequest {
    pub fn new(
        path: impl Into<PathBuf>,
        size_label: impl Into<String>,
        printer: impl Into<String>,
    ) -> Self {
        PrintRequest {
            path: path.into(),
            size_label: size_label.into(),
            printer: printer.into(),
        }
    }
}

/// Removes the intermediate page image when the pipeline finishes,
/// whichever way it finishes.
struct TempImage {
    path: PathBuf,
}

impl TempImage {
    fn write(dir: &Path, image: &RgbImage) -> Result<Self, DocumentError> {
        let path = dir.join(TEMP_IMAGE_NAME);
        image.save_with_format(&path, image::ImageFormat::Png)?;
        Ok(TempImage { path })
    }
}

impl Drop for TempImage {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            debug!("could not remove {}: {}", self.path.display(), err);
        }
    }
}

/// Run one print request through the whole pipeline.
///
/// Strictly sequential: check the file exists, rasterize page 1, write the
/// intermediate image, resize to the label width, submit one one-page job.
/// The first failure aborts and is returned; nothing is retried.
pub fn dispatch<S: Spooler>(
    config: &Config,
    request: &PrintRequest,
    spooler: &S,
) -> Result<JobReceipt, Error> {
    debug!("dispatching {:?}", request);

    let page = render_first_page(&request.path, config.scale)?;
    let _rendered = TempImage::write(&config.temp_dir, &page).map_err(Error::Document)?;

    let width = width_for_label(&request.size_label);
    let resized = resize_to_width(&page, width);
    debug!(
        "resized {}x{} page to {}x{}",
        page.width(),
        page.height(),
        resized.width(),
        resized.height()
    );

    let receipt = spooler.submit(&request.printer, &config.job_title, &resized)?;
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrintError;
    use crate::spool::RecordingSpooler;

    /// Hand-assembled single-page PDF with a correct xref table and no
    /// content stream; renders as a blank page of the given point size.
    fn write_one_page_pdf(path: &Path, width_pt: u32, height_pt: u32) {
        let objects = [
            "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n".to_string(),
            "2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n".to_string(),
            format!(
                "3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] >>\nendobj\n",
                width_pt, height_pt
            ),
        ];

        let mut body: Vec<u8> = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for object in &objects {
            offsets.push(body.len());
            body.extend_from_slice(object.as_bytes());
        }

        let xref_at = body.len();
        let mut xref = String::from("xref\n0 4\n0000000000 65535 f \n");
        for offset in &offsets {
            xref.push_str(&format!("{:010} 00000 n \n", offset));
        }
        body.extend_from_slice(xref.as_bytes());
        body.extend_from_slice(
            format!(
                "trailer\n<< /Size 4 /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                xref_at
            )
            .as_bytes(),
        );

        fs::write(path, body).unwrap();
    }

    fn temp_image_in(dir: &Path) -> PathBuf {
        dir.join(TEMP_IMAGE_NAME)
    }

    #[test]
    fn missing_file_never_reaches_the_spooler() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new().temp_dir(dir.path());
        let request = PrintRequest::new(dir.path().join("gone.pdf"), "7インチ", "Mock");
        let spooler = RecordingSpooler::new();

        let err = dispatch(&config, &request, &spooler).unwrap_err();
        assert!(matches!(
            err,
            Error::Document(DocumentError::NotFound(_))
        ));
        assert!(spooler.drain_jobs().is_empty());
        assert!(!temp_image_in(dir.path()).exists());
    }

    #[test]
    fn one_page_is_spooled_at_the_label_width() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("page.pdf");
        // 144x288pt page: aspect 2.0, rendered 288x576 at the default scale.
        write_one_page_pdf(&pdf, 144, 288);

        let config = Config::new().temp_dir(dir.path());
        let request = PrintRequest::new(&pdf, "7インチ", "Mock");
        let spooler = RecordingSpooler::new();

        let receipt = dispatch(&config, &request, &spooler).unwrap();
        assert_eq!(receipt.pages, 1);
        assert_eq!(receipt.printer, "Mock");

        let jobs = spooler.drain_jobs();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].pages, 1);
        assert_eq!(jobs[0].printer, "Mock");
        assert_eq!(jobs[0].title, JOB_TITLE);
        assert_eq!((jobs[0].width, jobs[0].height), (224, 448));

        assert!(!temp_image_in(dir.path()).exists());
    }

    #[test]
    fn unknown_label_uses_the_fallback_width() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("page.pdf");
        write_one_page_pdf(&pdf, 144, 288);

        let config = Config::new().temp_dir(dir.path());
        let request = PrintRequest::new(&pdf, "A4", "Mock");
        let spooler = RecordingSpooler::new();

        dispatch(&config, &request, &spooler).unwrap();
        let jobs = spooler.drain_jobs();
        assert_eq!(jobs[0].width, crate::FALLBACK_WIDTH_DOTS);
    }

    #[test]
    fn temp_image_is_removed_when_the_spooler_rejects() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("page.pdf");
        write_one_page_pdf(&pdf, 144, 288);

        let config = Config::new().temp_dir(dir.path());
        let request = PrintRequest::new(&pdf, "7インチ", "Mock");
        let spooler = RecordingSpooler::rejecting();

        let err = dispatch(&config, &request, &spooler).unwrap_err();
        assert!(matches!(err, Error::Print(PrintError::Rejected(_))));
        assert!(!temp_image_in(dir.path()).exists());
    }
}
