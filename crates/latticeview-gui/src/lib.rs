use eframe::egui;
use latticeview_core::LatticeSettings;

mod app;
mod canvas;

pub use app::LatticeViewerApp;
pub use canvas::LatticeCanvas;

/// Launch the viewer window for one lattice.
pub fn run_viewer(
    data_dir: std::path::PathBuf,
    lattice_id: String,
    full: bool,
    settings: LatticeSettings,
) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Lattice View",
        options,
        Box::new(move |cc| {
            Ok(Box::new(LatticeViewerApp::new(
                cc,
                data_dir,
                lattice_id,
                full,
                settings,
            )))
        }),
    )
}
