//! IMF Differ - IMF package inspector
//!
//! Entry point and main window.

mod dialogs;

use std::path::PathBuf;

use anyhow::Result;
use eframe::egui;
use imfdiff_export::{ExportFormat, ExportJob};
use imfdiff_imf::Session;
use imfdiff_ui::{CplTreeModel, CplTreeView, Theme};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    // RUST_LOG overrides the default filter
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("IMF Differ starting...");

    // Optional package directory
    let package_path = std::env::args().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 800.0])
            .with_title("IMF Differ"),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "IMF Differ",
        options,
        Box::new(move |cc| Ok(Box::new(ImfDifferApp::new(cc, package_path)))),
    )?;

    Ok(())
}

enum Action {
    Open,
    Export(ExportFormat),
}

struct ImfDifferApp {
    session: Session,
    tree: Option<CplTreeModel>,
    tree_view: CplTreeView,
    /// Show the open dialog on the first frame
    prompt_on_start: bool,
}

impl ImfDifferApp {
    fn new(cc: &eframe::CreationContext<'_>, package_path: Option<PathBuf>) -> Self {
        Theme::apply(&cc.egui_ctx);

        let mut app = Self {
            session: Session::new(),
            tree: None,
            tree_view: CplTreeView::new(),
            prompt_on_start: package_path.is_none(),
        };
        if let Some(path) = package_path {
            app.open(path);
        }
        app
    }

    fn open(&mut self, path: PathBuf) {
        match self.session.open(&path) {
            Ok(package) => {
                info!(
                    path = %path.display(),
                    title = package.title(),
                    resources = package.composition().resource_count(),
                    "Opened IMF package"
                );
                self.tree = Some(CplTreeModel::from_package(package));
                self.tree_view.reset();
            }
            Err(e) => dialogs::error("Cannot Open IMF", e.to_string()),
        }
    }

    fn prompt_open(&mut self) {
        let start = self.session.package().map(|p| p.root().to_path_buf());
        if let Some(path) = dialogs::pick_package(start.as_deref()) {
            self.open(path);
        }
    }

    fn export(&self, format: ExportFormat) {
        let Some(package) = self.session.package() else {
            return;
        };
        let Some(path) = dialogs::pick_export_path(format, package.title(), package.root()) else {
            return;
        };

        match ExportJob::new(path, format).run(package) {
            Ok(summary) => dialogs::info(
                "Export Complete",
                format!("Exported to {}", summary.path.display()),
            ),
            Err(e) => {
                error!(error = %e, "Export failed");
                dialogs::error("Export Failed", e.to_string());
            }
        }
    }

    fn actions(&self, ui: &mut egui::Ui, pending: &mut Option<Action>) {
        if ui.button("Open\u{2026}").clicked() {
            *pending = Some(Action::Open);
            ui.close_menu();
        }
        let loaded = self.session.is_open();
        for format in ExportFormat::ALL {
            let label = format!("{}\u{2026}", format.action_label());
            if ui.add_enabled(loaded, egui::Button::new(label)).clicked() {
                *pending = Some(Action::Export(format));
                ui.close_menu();
            }
        }
    }
}

impl eframe::App for ImfDifferApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if std::mem::take(&mut self.prompt_on_start) {
            self.prompt_open();
        }

        let mut pending = None;

        // Menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    self.actions(ui, &mut pending);
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| self.actions(ui, &mut pending));
        });

        egui::CentralPanel::default().show(ctx, |ui| match (self.session.package(), &self.tree) {
            (Some(package), Some(tree)) => {
                ui.label(
                    egui::RichText::new(package.title())
                        .size(Theme::FONT_LG)
                        .strong(),
                );
                ui.label(
                    egui::RichText::new(format!(
                        "{}  \u{2022}  {} @ {}  \u{2022}  {} resources",
                        package.root().display(),
                        package.composition().start,
                        package.composition().edit_rate,
                        package.composition().resource_count()
                    ))
                    .color(Theme::t2()),
                );
                ui.separator();
                self.tree_view.show(ui, tree);
            }
            _ => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new("No IMF package loaded\nUse File > Open to load one")
                            .color(Theme::t2()),
                    );
                });
            }
        });

        match pending {
            Some(Action::Open) => self.prompt_open(),
            Some(Action::Export(format)) => self.export(format),
            None => {}
        }
    }
}
