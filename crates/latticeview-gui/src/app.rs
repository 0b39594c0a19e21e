use std::path::PathBuf;

use eframe::egui;
use latticeview_core::{ConceptLattice, LatticeSettings};
use latticeview_graph::LatticeSession;
use latticeview_store::{DocumentSource, LoadCoordinator};

use crate::canvas::LatticeCanvas;

/// Top-level viewer application.
///
/// Owns the load coordinator and, once a document arrives, the
/// [`LatticeSession`] holding all per-visualization state. Loads run in the
/// background; an outcome belonging to a superseded request never replaces a
/// newer lattice.
pub struct LatticeViewerApp {
    coordinator: LoadCoordinator,
    settings: LatticeSettings,
    lattice_id: String,
    full: bool,
    /// Arrived but not yet laid out: layout needs the viewport width, which
    /// is only known while drawing.
    pending: Option<ConceptLattice>,
    session: Option<LatticeSession>,
    canvas: LatticeCanvas,
    load_error: Option<String>,
}

impl LatticeViewerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        data_dir: PathBuf,
        lattice_id: String,
        full: bool,
        settings: LatticeSettings,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let mut coordinator = LoadCoordinator::new(DocumentSource::new(data_dir));
        coordinator.request(&lattice_id, full);

        Self {
            coordinator,
            settings,
            lattice_id,
            full,
            pending: None,
            session: None,
            canvas: LatticeCanvas::default(),
            load_error: None,
        }
    }

    fn reload(&mut self) {
        self.coordinator.request(&self.lattice_id, self.full);
    }

    fn poll_loads(&mut self) {
        if let Some(outcome) = self.coordinator.poll() {
            match outcome.result {
                Ok(lattice) => {
                    tracing::info!(id = outcome.id, full = outcome.full, "lattice loaded");
                    self.load_error = None;
                    self.pending = Some(lattice);
                    self.session = None;
                }
                Err(error) => {
                    tracing::error!(id = outcome.id, %error, "lattice load failed");
                    self.load_error = Some(format!("{error:#}"));
                }
            }
        }
    }

    fn settings_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Lattice");
        ui.horizontal(|ui| {
            ui.label("Id:");
            ui.text_edit_singleline(&mut self.lattice_id);
        });
        ui.checkbox(&mut self.full, "Full document");
        if ui.button("Load").clicked() {
            self.reload();
        }
        if let Some(error) = &self.load_error {
            ui.colored_label(egui::Color32::DARK_RED, error);
        }

        ui.separator();
        ui.heading("Display");
        let settings = &mut self.settings;
        ui.checkbox(&mut settings.collision_detection, "Collision detection");
        ui.checkbox(&mut settings.show_top_labels, "Attribute labels");
        ui.checkbox(&mut settings.show_bottom_labels, "Object labels");
        ui.checkbox(&mut settings.collapse_labels, "Collapse labels");
        ui.add(
            egui::Slider::new(&mut settings.circle_radius, 6.0..=40.0).text("Circle radius"),
        );
        ui.add(
            egui::Slider::new(&mut settings.circle_radius_variation, 0.0..=20.0)
                .text("Radius variation"),
        );
    }

    /// Push the panel-owned settings into the live session. The panel is the
    /// single source of truth, so a reload never reverts display toggles.
    fn sync_session_settings(&mut self) {
        if let Some(session) = &mut self.session {
            session.settings = self.settings.clone();
        }
    }
}

impl eframe::App for LatticeViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loads();

        egui::SidePanel::left("lattice_settings")
            .resizable(false)
            .show(ctx, |ui| self.settings_panel(ui));
        self.sync_session_settings();

        egui::CentralPanel::default().show(ctx, |ui| {
            // Layout reads the mounting region's width once, here.
            if let Some(lattice) = self.pending.take() {
                self.session = Some(LatticeSession::new(
                    lattice,
                    ui.available_width(),
                    self.settings.clone(),
                ));
            }

            match &mut self.session {
                Some(session) => {
                    egui::ScrollArea::both().show(ui, |ui| {
                        self.canvas.show(ui, session);
                    });
                }
                None => {
                    ui.centered_and_justified(|ui| {
                        ui.label(if self.load_error.is_some() {
                            "Failed to load lattice"
                        } else {
                            "Loading lattice…"
                        });
                    });
                }
            }
        });

        // Keep polling for background load completions even when idle.
        if self.session.is_none() && self.load_error.is_none() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }
}
