//! egui rendering of a [`CplTreeModel`].

use egui::{CollapsingHeader, Grid, RichText, ScrollArea, Ui};
use imfdiff_imf::ResourceKind;

use crate::cpl_model::{CplTreeModel, NodeId, NodeKind};
use crate::theme::Theme;

/// Collapsible segment and sequence headers with a resource grid under each sequence.
#[derive(Debug, Default)]
pub struct CplTreeView {
    /// Resource row last clicked
    pub selected: Option<NodeId>,
}

impl CplTreeView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the selection, e.g. after another package was opened.
    pub fn reset(&mut self) {
        self.selected = None;
    }

    pub fn show(&mut self, ui: &mut Ui, model: &CplTreeModel) {
        if model.is_empty() {
            ui.label(RichText::new("Composition has no segments").color(Theme::t2()));
            return;
        }

        ScrollArea::both()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for &segment in model.children(model.root()) {
                    CollapsingHeader::new(
                        RichText::new(model.label(segment)).size(Theme::FONT_MD),
                    )
                    .id_salt(("cpl_segment", segment.index()))
                    .default_open(true)
                    .show(ui, |ui| {
                        if model.child_count(segment) == 0 {
                            ui.label(RichText::new("No sequences").color(Theme::t2()));
                        }
                        for &sequence in model.children(segment) {
                            self.show_sequence(ui, model, sequence);
                        }
                    });
                }
            });
    }

    fn show_sequence(&mut self, ui: &mut Ui, model: &CplTreeModel, sequence: NodeId) {
        let color = match model.kind(sequence) {
            Some(NodeKind::Sequence(ResourceKind::Audio)) => Theme::audio(),
            _ => Theme::video(),
        };

        CollapsingHeader::new(RichText::new(model.label(sequence)).color(color))
            .id_salt(("cpl_sequence", sequence.index()))
            .default_open(true)
            .show(ui, |ui| {
                Grid::new(("cpl_grid", sequence.index()))
                    .striped(true)
                    .num_columns(model.column_count())
                    .spacing([Theme::SPACE_SM * 2.0, Theme::SPACE_XS])
                    .show(ui, |ui| {
                        for column in 0..model.column_count() {
                            ui.label(Theme::column_header(model.header(column).unwrap_or_default()));
                        }
                        ui.end_row();

                        for &resource in model.children(sequence) {
                            self.show_resource(ui, model, resource);
                            ui.end_row();
                        }
                    });
            });
    }

    fn show_resource(&mut self, ui: &mut Ui, model: &CplTreeModel, resource: NodeId) {
        let name = model.column_value(resource, 0);
        let mut text = Theme::cell(name);
        if model.label(resource) == imfdiff_imf::timeline::EXTERNAL_REEL {
            text = text.color(Theme::amber());
        }
        let is_selected = self.selected == Some(resource);
        if ui.selectable_label(is_selected, text).clicked() {
            self.selected = Some(resource);
        }

        for column in 1..model.column_count() {
            ui.label(Theme::cell(model.column_value(resource, column)));
        }
    }
}
