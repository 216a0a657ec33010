use eframe::egui;
use std::fs;

use labelprint::{
    dispatch, Config, CupsSpooler, DocumentError, Error, PaperSize, PrintRequest, Spooler,
};

const WINDOW_TITLE: &str = "PDF 印刷ツール";

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 280.0])
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|cc| {
            install_cjk_font(&cc.egui_ctx);
            Box::new(LabelPrintApp::new())
        }),
    )
}

/// Outcome dialog shown after a print attempt, modal until dismissed.
struct Dialog {
    title: &'static str,
    message: String,
}

struct LabelPrintApp {
    config: Config,
    spooler: CupsSpooler,
    path: String,
    size: PaperSize,
    printers: Vec<String>,
    printer: usize,
    dialog: Option<Dialog>,
}

impl LabelPrintApp {
    fn new() -> Self {
        let spooler = CupsSpooler::new();
        let printers = spooler.printers().unwrap_or_default();

        LabelPrintApp {
            config: Config::new(),
            spooler,
            path: String::new(),
            size: PaperSize::ALL[0],
            printers,
            printer: 0,
            dialog: None,
        }
    }

    fn pick_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PDF Files", &["pdf"])
            .pick_file()
        {
            self.path = path.display().to_string();
        }
    }

    /// The print button handler. Runs the pipeline synchronously on the UI
    /// thread, as the original tool did, then reports through a dialog.
    fn print_clicked(&mut self) {
        let printer = self
            .printers
            .get(self.printer)
            .cloned()
            .unwrap_or_default();
        let request = PrintRequest::new(self.path.clone(), self.size.label(), printer);

        self.dialog = Some(match dispatch(&self.config, &request, &self.spooler) {
            Ok(_) => Dialog {
                title: "完了",
                message: "印刷が完了しました。".to_string(),
            },
            Err(Error::Document(DocumentError::NotFound(_))) => Dialog {
                title: "エラー",
                message: "PDFファイルが存在しません。".to_string(),
            },
            Err(err) => Dialog {
                title: "印刷エラー",
                message: err.to_string(),
            },
        });
    }

    fn show_dialog(&mut self, ctx: &egui::Context) {
        let mut close = false;
        if let Some(dialog) = &self.dialog {
            egui::Window::new(dialog.title)
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.label(&dialog.message);
                    if ui.button("OK").clicked() {
                        close = true;
                    }
                });
        }
        if close {
            self.dialog = None;
        }
    }
}

impl eframe::App for LabelPrintApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let enabled = self.dialog.is_none();
            ui.add_enabled_ui(enabled, |ui| {
                ui.label("PDFファイルを選択:");
                ui.text_edit_singleline(&mut self.path);
                if ui.button("ファイル選択").clicked() {
                    self.pick_file();
                }

                ui.label("用紙サイズを選択:");
                egui::ComboBox::from_id_source("size_selector")
                    .selected_text(self.size.label())
                    .show_ui(ui, |ui| {
                        for size in PaperSize::ALL {
                            ui.selectable_value(&mut self.size, size, size.label());
                        }
                    });

                ui.label("プリンタを選択:");
                egui::ComboBox::from_id_source("printer_selector")
                    .selected_text(
                        self.printers
                            .get(self.printer)
                            .map(String::as_str)
                            .unwrap_or(""),
                    )
                    .show_ui(ui, |ui| {
                        for (idx, name) in self.printers.iter().enumerate() {
                            ui.selectable_value(&mut self.printer, idx, name);
                        }
                    });

                if ui.button("印刷実行").clicked() {
                    self.print_clicked();
                }
            });
        });

        self.show_dialog(ctx);
    }
}

/// Make the UI's Japanese labels renderable by appending a system CJK font
/// to egui's default families. Skipped quietly when none is installed.
fn install_cjk_font(ctx: &egui::Context) {
    let Some(bytes) = load_cjk_font() else {
        log::warn!("no CJK font found; Japanese labels may render as boxes");
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert("cjk_fallback".to_owned(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        if let Some(list) = fonts.families.get_mut(&family) {
            list.push("cjk_fallback".to_owned());
        }
    }
    ctx.set_fonts(fonts);
}

fn load_cjk_font() -> Option<Vec<u8>> {
    let mut candidates: Vec<&str> = Vec::new();

    #[cfg(target_os = "windows")]
    {
        candidates.push(r"C:\Windows\Fonts\msgothic.ttc");
        candidates.push(r"C:\Windows\Fonts\YuGothM.ttc");
    }

    #[cfg(target_os = "macos")]
    {
        candidates.push("/System/Library/Fonts/Hiragino Sans GB.ttc");
        candidates.push("/System/Library/Fonts/Supplemental/Arial Unicode.ttf");
    }

    #[cfg(target_os = "linux")]
    {
        candidates.push("/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc");
        candidates.push("/usr/share/fonts/opentype/noto/NotoSansCJKjp-Regular.otf");
        candidates.push("/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc");
    }

    candidates
        .into_iter()
        .find_map(|path| fs::read(path).ok())
}
