use crate::{DOTS_PER_LABEL_INCH, FALLBACK_WIDTH_DOTS};

/// Tape widths the print form offers.
///
/// The variants mirror the three entries of the size dropdown; the 8 inch
/// tape is the widest that still fits an A4 source page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperSize {
    Inch6,
    Inch7,
    Inch8,
}

struct PaperSpec {
    label: &'static str,
    inches: u32,
}

impl PaperSize {
    /// Dropdown order. The first entry is the form default.
    pub const ALL: [PaperSize; 3] = [PaperSize::Inch6, PaperSize::Inch7, PaperSize::Inch8];

    fn spec(&self) -> PaperSpec {
        match self {
            Self::Inch6 => PaperSpec {
                label: "6インチ",
                inches: 6,
            },
            Self::Inch7 => PaperSpec {
                label: "7インチ",
                inches: 7,
            },
            Self::Inch8 => PaperSpec {
                label: "8インチ",
                inches: 8,
            },
        }
    }

    /// The label shown in the size dropdown.
    pub fn label(&self) -> &'static str {
        self.spec().label
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.label() == label)
    }

    /// Target bitmap width in printer dots.
    pub fn width_dots(&self) -> u32 {
        self.spec().inches * DOTS_PER_LABEL_INCH
    }
}

/// Resolve a dropdown label to a dot width.
///
/// Unrecognized labels (including an empty selection) fall back to
/// [`FALLBACK_WIDTH_DOTS`] rather than failing the job.
pub fn width_for_label(label: &str) -> u32 {
    PaperSize::from_label(label)
        .map(|size| size.width_dots())
        .unwrap_or(FALLBACK_WIDTH_DOTS)
}
