use std::path::PathBuf;

use eframe::egui::{self, Align2, CursorIcon, FontId, Pos2, Rect, RichText, Rounding, Sense, Stroke};
use rfd::FileDialog;
use tracing::{debug, warn};

use super::controller::SelectionChanged;
use super::state::SlotId;
use super::theme;
use crate::client::SelectedFile;
use crate::utils::format_size;

pub const DEFAULT_ACCEPT: &str = ".xlsx,.xls";
const ZONE_HEIGHT: f32 = 180.0;

/// Turns an `accept` string such as `.xlsx,.xls` into bare extensions.
pub fn parse_accept(accept: &str) -> Vec<String> {
    accept
        .split(',')
        .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

/// Drag-and-drop / click-to-browse picker for a single spreadsheet.
#[derive(Debug)]
pub struct DropZone {
    slot: SlotId,
    label: String,
    extensions: Vec<String>,
    selected: Option<(String, u64)>,
    hovering: bool,
    error: Option<String>,
    rect: Option<Rect>,
}

impl DropZone {
    pub fn new(slot: SlotId, label: impl Into<String>) -> Self {
        Self {
            slot,
            label: label.into(),
            extensions: parse_accept(DEFAULT_ACCEPT),
            selected: None,
            hovering: false,
            error: None,
            rect: None,
        }
    }

    pub fn with_accept(mut self, accept: &str) -> Self {
        self.extensions = parse_accept(accept);
        self
    }

    pub fn slot(&self) -> SlotId {
        self.slot
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn file_name(&self) -> Option<&str> {
        self.selected.as_ref().map(|(name, _)| name.as_str())
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    /// Whether `pos` falls inside the area the zone was last drawn in.
    pub fn contains(&self, pos: Pos2) -> bool {
        self.rect.is_some_and(|rect| rect.contains(pos))
    }

    pub(crate) fn place(&mut self, rect: Rect) {
        self.rect = Some(rect);
    }

    /// Drop handler: only the first path counts, an empty drop clears.
    pub fn take_paths(&mut self, paths: impl IntoIterator<Item = PathBuf>) -> SelectionChanged {
        self.hovering = false;
        let mut paths = paths.into_iter();
        let first = paths.next();
        let ignored = paths.count();
        if ignored > 0 {
            debug!(ignored, slot = ?self.slot, "extra dropped files ignored");
        }
        self.select(first)
    }

    /// Chooser handler. A cancelled chooser leaves the current selection alone.
    pub fn picked(&mut self, path: Option<PathBuf>) -> Option<SelectionChanged> {
        path.map(|path| self.select(Some(path)))
    }

    pub fn clear(&mut self) -> SelectionChanged {
        self.selected = None;
        self.error = None;
        SelectionChanged {
            slot: self.slot,
            file: None,
        }
    }

    fn select(&mut self, path: Option<PathBuf>) -> SelectionChanged {
        let Some(path) = path else {
            return self.clear();
        };
        match SelectedFile::from_path(&path) {
            Ok(file) => {
                self.selected = Some((file.name.clone(), file.len()));
                self.error = None;
                SelectionChanged {
                    slot: self.slot,
                    file: Some(file),
                }
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not read selected file");
                let event = self.clear();
                self.error = Some(format!("Não foi possível ler {}: {}", path.display(), err));
                event
            }
        }
    }

    fn open_picker(&self) -> Option<PathBuf> {
        let mut dialog = FileDialog::new().set_title(self.label.as_str());
        if !self.extensions.is_empty() {
            dialog = dialog.add_filter("Planilhas", self.extensions.as_slice());
        }
        dialog.pick_file()
    }

    fn accept_display(&self) -> String {
        self.extensions
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Draws the zone and returns a selection event when the picker or the
    /// clear button produced one this frame. Drops are handed in by the page,
    /// which decides the target; `targeted` only drives the highlight.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        targeted: bool,
        files_hovering: bool,
    ) -> Option<SelectionChanged> {
        let mut event = None;

        ui.label(RichText::new(&self.label).strong());
        ui.add_space(4.0);

        let size = egui::vec2(ui.available_width(), ZONE_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());
        self.place(rect);
        self.set_hovering(files_hovering && targeted);

        let (fill, border) = if self.hovering {
            (theme::ZONE_ACTIVE, theme::DRAG_BORDER)
        } else if response.hovered() {
            (theme::ZONE_ACTIVE, theme::ZONE_BORDER)
        } else {
            (theme::ZONE_IDLE, theme::ZONE_BORDER)
        };

        let painter = ui.painter_at(rect);
        painter.rect(rect.shrink(1.0), Rounding::same(12.0), fill, Stroke::new(2.0, border));

        let center = rect.center();
        painter.text(
            center - egui::vec2(0.0, 18.0),
            Align2::CENTER_CENTER,
            "Arraste e solte aqui ou clique para selecionar",
            FontId::proportional(14.0),
            theme::TEXT,
        );
        painter.text(
            center,
            Align2::CENTER_CENTER,
            format!("Aceita: {}", self.accept_display()),
            FontId::proportional(11.0),
            theme::MUTED,
        );
        if let Some((name, size)) = &self.selected {
            painter.text(
                center + egui::vec2(0.0, 26.0),
                Align2::CENTER_CENTER,
                format!("✔ {} ({})", name, format_size(*size)),
                FontId::proportional(14.0),
                theme::TEXT_STRONG,
            );
        }

        if response.on_hover_cursor(CursorIcon::PointingHand).clicked() {
            if let Some(picked) = self.picked(self.open_picker()) {
                event = Some(picked);
            }
        }

        if self.selected.is_some() {
            ui.add_space(4.0);
            if ui.small_button("Limpar").clicked() {
                event = Some(self.clear());
            }
        }

        if let Some(err) = &self.error {
            ui.colored_label(theme::ERROR, err);
        }

        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn accept_string_is_split_into_extensions() {
        assert_eq!(parse_accept(".xlsx,.xls"), vec!["xlsx", "xls"]);
        assert_eq!(parse_accept(" .XLSX , csv ,"), vec!["xlsx", "csv"]);
        assert!(parse_accept("").is_empty());

        let zone = DropZone::new(SlotId::Official, "WMS").with_accept(".csv");
        assert_eq!(zone.extensions(), ["csv"]);
    }

    #[test]
    fn drop_selects_only_the_first_file() {
        let dir = tempfile::tempdir().unwrap();
        let first = write(dir.path(), "wms.xlsx", b"first");
        let second = write(dir.path(), "other.xlsx", b"second");
        let mut zone = DropZone::new(SlotId::Official, "Planilha oficial (WMS)");
        zone.set_hovering(true);

        let event = zone.take_paths(vec![first, second]);

        assert_eq!(event.slot, SlotId::Official);
        let file = event.file.unwrap();
        assert_eq!(file.name, "wms.xlsx");
        assert_eq!(file.content(), b"first");
        assert_eq!(zone.file_name(), Some("wms.xlsx"));
        assert!(!zone.is_hovering());
    }

    #[test]
    fn clear_resets_name_and_emits_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "fisico.xlsx", b"x");
        let mut zone = DropZone::new(SlotId::Divergent, "Planilha divergente (Físico)");
        zone.take_paths(vec![path]);

        let event = zone.clear();

        assert_eq!(
            event,
            SelectionChanged {
                slot: SlotId::Divergent,
                file: None
            }
        );
        assert_eq!(zone.file_name(), None);
    }

    #[test]
    fn empty_drop_clears_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "wms.xlsx", b"x");
        let mut zone = DropZone::new(SlotId::Official, "WMS");
        zone.take_paths(vec![path]);

        let event = zone.take_paths(Vec::new());
        assert!(event.file.is_none());
        assert_eq!(zone.file_name(), None);
    }

    #[test]
    fn cancelled_picker_keeps_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "wms.xlsx", b"x");
        let mut zone = DropZone::new(SlotId::Official, "WMS");
        assert!(zone.picked(Some(path)).is_some());

        assert!(zone.picked(None).is_none());
        assert_eq!(zone.file_name(), Some("wms.xlsx"));
    }

    #[test]
    fn unreadable_file_clears_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let mut zone = DropZone::new(SlotId::Official, "WMS");

        let event = zone.take_paths(vec![dir.path().join("missing.xlsx")]);

        assert!(event.file.is_none());
        assert_eq!(zone.file_name(), None);
        assert!(zone.error().is_some());
    }

    #[test]
    fn contains_follows_the_last_drawn_area() {
        let mut zone = DropZone::new(SlotId::Official, "WMS");
        assert!(!zone.contains(Pos2::new(10.0, 10.0)));

        zone.place(Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(100.0, 50.0)));
        assert!(zone.contains(Pos2::new(10.0, 10.0)));
        assert!(!zone.contains(Pos2::new(150.0, 10.0)));
    }

    #[test]
    fn no_content_validation_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "notes.txt", b"not a spreadsheet");
        let mut zone = DropZone::new(SlotId::Official, "WMS");

        let event = zone.take_paths(vec![path]);
        assert_eq!(event.file.unwrap().name, "notes.txt");
    }
}
