use image::RgbImage;
use log::{debug, info};
use std::process::Command;
#[cfg(test)]
use std::sync::{Arc, Mutex};

use crate::error::PrintError;

/// What the spooler reports back for an accepted job.
#[derive(Debug, Clone)]
pub struct JobReceipt {
    pub printer: String,
    /// Pages in the job. Always 1 for this tool.
    pub pages: u32,
    /// Spooler request id, when the OS hands one out.
    pub request_id: Option<String>,
}

/// Abstraction over the OS print subsystem.
///
/// Queries go straight to the OS on every call; nothing is cached, so a
/// printer added or removed between calls shows up in the next one.
pub trait Spooler {
    /// Every destination the spooler knows, local and network alike, in
    /// whatever order the OS reports them.
    fn printers(&self) -> Result<Vec<String>, PrintError>;

    /// The OS-designated default destination, if one is set.
    fn default_printer(&self) -> Result<Option<String>, PrintError>;

    /// Submit one job containing exactly one page: the given bitmap drawn
    /// at its full pixel dimensions.
    fn submit(&self, printer: &str, title: &str, page: &RgbImage)
        -> Result<JobReceipt, PrintError>;
}

/// Spooler backed by the CUPS command line tools.
///
/// Enumeration goes through `lpstat`, submission through `lp`. The bitmap
/// is encoded into a throwaway PNG spool file for the hand-off; CUPS
/// filters take it from there.
#[derive(Debug, Default, Clone, Copy)]
pub struct CupsSpooler;

impl CupsSpooler {
    pub fn new() -> Self {
        CupsSpooler
    }
}

impl Spooler for CupsSpooler {
    fn printers(&self) -> Result<Vec<String>, PrintError> {
        let output = Command::new("lpstat").arg("-e").output()?;
        if !output.status.success() {
            return Err(PrintError::Rejected(stderr_line(&output.stderr)));
        }
        Ok(parse_destinations(&String::from_utf8_lossy(&output.stdout)))
    }

    fn default_printer(&self) -> Result<Option<String>, PrintError> {
        let output = Command::new("lpstat").arg("-d").output()?;
        if !output.status.success() {
            return Err(PrintError::Rejected(stderr_line(&output.stderr)));
        }
        Ok(parse_default_destination(&String::from_utf8_lossy(
            &output.stdout,
        )))
    }

    fn submit(
        &self,
        printer: &str,
        title: &str,
        page: &RgbImage,
    ) -> Result<JobReceipt, PrintError> {
        let spool = tempfile::Builder::new()
            .prefix("labelprint-")
            .suffix(".png")
            .tempfile()?;
        page.save_with_format(spool.path(), image::ImageFormat::Png)?;

        debug!(
            "handing {}x{} page to {} as {:?}",
            page.width(),
            page.height(),
            printer,
            title
        );

        let output = Command::new("lp")
            .arg("-d")
            .arg(printer)
            .arg("-t")
            .arg(title)
            .arg(spool.path())
            .output()?;
        if !output.status.success() {
            return Err(PrintError::Rejected(stderr_line(&output.stderr)));
        }

        let request_id = parse_request_id(&String::from_utf8_lossy(&output.stdout));
        info!("spooled job {:?} on {}", request_id, printer);

        Ok(JobReceipt {
            printer: printer.to_string(),
            pages: 1,
            request_id,
        })
    }
}

/// `lpstat -e` prints one destination name per line.
fn parse_destinations(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// `lpstat -d` prints `system default destination: NAME`, or a
/// `no system default destination` notice when none is configured.
fn parse_default_destination(stdout: &str) -> Option<String> {
    stdout.lines().find_map(|line| {
        line.trim()
            .strip_prefix("system default destination:")
            .map(|name| name.trim().to_string())
    })
}

/// `lp` acknowledges with `request id is NAME-SEQ (1 file(s))`.
fn parse_request_id(stdout: &str) -> Option<String> {
    let rest = stdout.trim().strip_prefix("request id is ")?;
    rest.split_whitespace().next().map(String::from)
}

fn stderr_line(stderr: &[u8]) -> String {
    String::from_utf8_lossy(stderr).trim().to_string()
}

/// One job captured by [`RecordingSpooler`].
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct RecordedJob {
    pub printer: String,
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub pages: u32,
}

/// In-memory [`Spooler`] used by the pipeline tests.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct RecordingSpooler {
    jobs: Arc<Mutex<Vec<RecordedJob>>>,
    reject: bool,
}

#[cfg(test)]
impl RecordingSpooler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A spooler that refuses every submission.
    pub fn rejecting() -> Self {
        RecordingSpooler {
            jobs: Arc::default(),
            reject: true,
        }
    }

    pub fn drain_jobs(&self) -> Vec<RecordedJob> {
        self.jobs.lock().expect("lock poisoned").drain(..).collect()
    }
}

#[cfg(test)]
impl Spooler for RecordingSpooler {
    fn printers(&self) -> Result<Vec<String>, PrintError> {
        Ok(vec!["Mock".to_string()])
    }

    fn default_printer(&self) -> Result<Option<String>, PrintError> {
        Ok(Some("Mock".to_string()))
    }

    fn submit(
        &self,
        printer: &str,
        title: &str,
        page: &RgbImage,
    ) -> Result<JobReceipt, PrintError> {
        if self.reject {
            return Err(PrintError::Rejected("printer on fire".to_string()));
        }
        let mut guard = self.jobs.lock().expect("lock poisoned");
        guard.push(RecordedJob {
            printer: printer.to_string(),
            title: title.to_string(),
            width: page.width(),
            height: page.height(),
            pages: 1,
        });
        Ok(JobReceipt {
            printer: printer.to_string(),
            pages: 1,
            request_id: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destinations_keep_spooler_order() {
        let listed = parse_destinations("Office_Laser\nQL-720NW\nPDF\n");
        assert_eq!(listed, vec!["Office_Laser", "QL-720NW", "PDF"]);
    }

    #[test]
    fn destinations_may_be_empty() {
        assert!(parse_destinations("").is_empty());
        assert!(parse_destinations("\n").is_empty());
    }

    #[test]
    fn default_destination_is_parsed() {
        assert_eq!(
            parse_default_destination("system default destination: QL-720NW\n"),
            Some("QL-720NW".to_string())
        );
        assert_eq!(
            parse_default_destination("no system default destination\n"),
            None
        );
    }

    #[test]
    fn request_id_is_taken_from_lp_acknowledgement() {
        assert_eq!(
            parse_request_id("request id is QL-720NW-42 (1 file(s))\n"),
            Some("QL-720NW-42".to_string())
        );
        assert_eq!(parse_request_id("something unexpected"), None);
    }
}
