use std::path::PathBuf;

use eframe::egui::{self, RichText};

use super::theme;
use super::{InventoryApp, Route, SelectionChanged};

/// Paths of a drop, led by the first dropped entry. A first entry without a
/// path yields an empty list, which clears the target slot.
fn dropped_paths(files: &[egui::DroppedFile]) -> Option<Vec<PathBuf>> {
    let (first, rest) = files.split_first()?;
    let Some(path) = first.path.clone() else {
        return Some(Vec::new());
    };
    Some(
        std::iter::once(path)
            .chain(rest.iter().filter_map(|file| file.path.clone()))
            .collect(),
    )
}

impl InventoryApp {
    pub fn render(&mut self, ctx: &egui::Context) {
        let (pending_drop, files_hovering, pointer) = ctx.input(|i| {
            (
                dropped_paths(&i.raw.dropped_files),
                !i.raw.hovered_files.is_empty(),
                i.pointer.hover_pos(),
            )
        });

        let mut navigate_to = None;
        let current = self.route();
        egui::SidePanel::left("sidebar")
            .exact_width(220.0)
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(12.0);
                ui.label(RichText::new("Inventory Automation").size(18.0).strong());
                ui.add_space(16.0);
                for route in Route::ALL {
                    let text = if route == current {
                        RichText::new(route.nav_label()).strong().color(theme::SIDEBAR_ACTIVE)
                    } else {
                        RichText::new(route.nav_label())
                    };
                    let item = egui::SelectableLabel::new(route == current, text);
                    if ui.add_sized([ui.available_width(), 32.0], item).clicked() {
                        navigate_to = Some(route);
                    }
                    ui.add_space(4.0);
                }
            });

        let mut submit = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(12.0);
                submit = self.render_page(ui, pending_drop, files_hovering, pointer);
            });
        });

        if submit {
            let ctx = ctx.clone();
            self.submit(move || ctx.request_repaint());
        }
        if let Some(route) = navigate_to {
            self.navigate(route);
        }
        if files_hovering {
            ctx.request_repaint();
        }
    }

    /// Returns true when the submit button was clicked.
    fn render_page(
        &mut self,
        ui: &mut egui::Ui,
        pending_drop: Option<Vec<PathBuf>>,
        files_hovering: bool,
        pointer: Option<egui::Pos2>,
    ) -> bool {
        let route = self.page.route;
        let target = self.page.mark_drop_target(pointer, files_hovering);
        let submit_label = self.page.submit_label();
        let mut events: Vec<SelectionChanged> = Vec::new();
        let mut clicked = false;

        egui::Frame::group(ui.style())
            .inner_margin(16.0)
            .rounding(8.0)
            .show(ui, |ui| {
                ui.heading(route.title());
                ui.add_space(12.0);

                let zones = &mut self.page.zones;
                if zones.len() > 1 {
                    ui.columns(zones.len(), |columns| {
                        for (index, (column, zone)) in
                            columns.iter_mut().zip(zones.iter_mut()).enumerate()
                        {
                            events.extend(zone.show(column, index == target, files_hovering));
                        }
                    });
                } else {
                    ui.set_max_width(560.0);
                    for (index, zone) in zones.iter_mut().enumerate() {
                        events.extend(zone.show(ui, index == target, files_hovering));
                    }
                }

                ui.add_space(20.0);

                let controller = &self.page.controller;
                ui.horizontal(|ui| {
                    ui.add_enabled_ui(controller.can_submit(), |ui| {
                        let button = egui::Button::new(submit_label).min_size(egui::vec2(240.0, 36.0));
                        if ui.add(button).clicked() {
                            clicked = true;
                        }
                    });
                    if !controller.has_required_files() {
                        ui.add_space(8.0);
                        ui.label(RichText::new(route.missing_files_hint()).color(theme::MUTED));
                    }
                });
            });

        if let Some(paths) = pending_drop {
            events.extend(self.page.drop_files(pointer, paths));
        }
        for event in events {
            self.select(event);
        }

        clicked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dropped(path: Option<&str>) -> egui::DroppedFile {
        egui::DroppedFile {
            path: path.map(PathBuf::from),
            name: "sheet.xlsx".into(),
            ..Default::default()
        }
    }

    #[test]
    fn no_drop_this_frame() {
        assert_eq!(dropped_paths(&[]), None);
    }

    #[test]
    fn first_dropped_entry_leads() {
        let paths = dropped_paths(&[dropped(Some("/tmp/wms.xlsx")), dropped(Some("/tmp/other.xlsx"))]);
        assert_eq!(
            paths,
            Some(vec![PathBuf::from("/tmp/wms.xlsx"), PathBuf::from("/tmp/other.xlsx")])
        );
    }

    #[test]
    fn pathless_first_entry_does_not_promote_the_second() {
        let paths = dropped_paths(&[dropped(None), dropped(Some("/tmp/other.xlsx"))]);
        assert_eq!(paths, Some(Vec::new()));
    }
}
