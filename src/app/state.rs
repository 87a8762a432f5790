use std::path::PathBuf;

use eframe::egui::Pos2;

use super::controller::{PageController, SelectionChanged};
use super::intake::DropZone;
use crate::client::ReportKind;

/// Identifies the page instance that issued a request.
pub type Ticket = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotId {
    Official,
    Divergent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub id: SlotId,
    pub label: &'static str,
}

const COMPARE_SLOTS: [Slot; 2] = [
    Slot {
        id: SlotId::Official,
        label: "Planilha oficial (WMS)",
    },
    Slot {
        id: SlotId::Divergent,
        label: "Planilha divergente (Físico)",
    },
];

const BLIND_SLOTS: [Slot; 1] = [Slot {
    id: SlotId::Official,
    label: "Planilha oficial (WMS)",
}];

const BLANK_SLOTS: [Slot; 1] = [Slot {
    id: SlotId::Official,
    label: "Planilha WMS",
}];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Compare,
    BlindTemplate,
    Blank,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Compare, Route::BlindTemplate, Route::Blank];

    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        match normalized {
            "/" | "/comparar" => Some(Route::Compare),
            "/relatorio-as-cegas" => Some(Route::BlindTemplate),
            "/relatorio-em-branco" => Some(Route::Blank),
            _ => None,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Compare => "/comparar",
            Route::BlindTemplate => "/relatorio-as-cegas",
            Route::Blank => "/relatorio-em-branco",
        }
    }

    pub fn kind(self) -> ReportKind {
        match self {
            Route::Compare => ReportKind::Compare,
            Route::BlindTemplate => ReportKind::BlindTemplate,
            Route::Blank => ReportKind::Blank,
        }
    }

    pub fn slots(self) -> &'static [Slot] {
        match self {
            Route::Compare => &COMPARE_SLOTS,
            Route::BlindTemplate => &BLIND_SLOTS,
            Route::Blank => &BLANK_SLOTS,
        }
    }

    pub fn nav_label(self) -> &'static str {
        match self {
            Route::Compare => "Comparar Planilhas",
            Route::BlindTemplate => "Relatório às Cegas",
            Route::Blank => "Relatório em Branco",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Compare => "Comparar Planilhas (WMS x Físico)",
            Route::BlindTemplate => "Relatório às Cegas (a partir do WMS)",
            Route::Blank => "Relatório em Branco (contagem a partir do WMS)",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Route::Compare => "Gerar Relatório de Comparação",
            Route::BlindTemplate => "Gerar Relatório às Cegas",
            Route::Blank => "Gerar Relatório em Branco",
        }
    }

    pub fn busy_label(self) -> &'static str {
        "Gerando..."
    }

    pub fn missing_files_hint(self) -> &'static str {
        match self {
            Route::Compare => "Envie as duas planilhas para habilitar.",
            Route::BlindTemplate | Route::Blank => "Envie a planilha WMS para habilitar.",
        }
    }

    pub fn confirm_message(self) -> &'static str {
        match self {
            Route::Compare => "Relatório gerado com sucesso. Deseja baixar agora?",
            Route::BlindTemplate => "Relatório às cegas gerado. Baixar agora?",
            Route::Blank => "Relatório em branco gerado. Baixar agora?",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Route::Compare => {
                "Falha ao gerar/baixar o relatório. Verifique o backend e tente novamente."
            }
            Route::BlindTemplate | Route::Blank => "Falha ao gerar/baixar. Verifique o backend.",
        }
    }

    pub fn filename_prefix(self) -> &'static str {
        match self {
            Route::Compare => "relatorio_auditoria_comparacao",
            Route::BlindTemplate => "relatorio_as_cegas",
            Route::Blank => "relatorio_em_branco",
        }
    }
}

/// The page currently on screen. Replaced wholesale on navigation, which drops
/// every selected file along with it.
pub struct ActivePage {
    pub route: Route,
    pub ticket: Ticket,
    pub controller: PageController,
    pub zones: Vec<DropZone>,
}

impl ActivePage {
    pub fn new(route: Route, ticket: Ticket) -> Self {
        Self {
            route,
            ticket,
            controller: PageController::new(route),
            zones: route
                .slots()
                .iter()
                .map(|slot| DropZone::new(slot.id, slot.label))
                .collect(),
        }
    }

    pub fn apply(&mut self, event: SelectionChanged) {
        self.controller.apply(event);
    }

    /// Label for the submit button, swapped while a request is running.
    pub fn submit_label(&self) -> &'static str {
        if self.controller.is_in_flight() {
            self.route.busy_label()
        } else {
            self.route.submit_label()
        }
    }

    /// Zone a drop would land in. The zone under the pointer wins; without a
    /// usable pointer position (platforms that stop reporting it during an OS
    /// drag) it is the first empty slot, or the first slot when all are full.
    pub fn drop_target(&self, pointer: Option<Pos2>) -> usize {
        pointer
            .and_then(|pos| self.zones.iter().position(|zone| zone.contains(pos)))
            .or_else(|| self.zones.iter().position(|zone| zone.file_name().is_none()))
            .unwrap_or(0)
    }

    /// Highlights the zone a drop would land in while files hover the window.
    pub fn mark_drop_target(&mut self, pointer: Option<Pos2>, files_hovering: bool) -> usize {
        let target = self.drop_target(pointer);
        for (index, zone) in self.zones.iter_mut().enumerate() {
            zone.set_hovering(files_hovering && index == target);
        }
        target
    }

    /// Hands dropped files to the zone picked by [`ActivePage::drop_target`].
    pub fn drop_files(
        &mut self,
        pointer: Option<Pos2>,
        paths: Vec<PathBuf>,
    ) -> Option<SelectionChanged> {
        let target = self.drop_target(pointer);
        let zone = self.zones.get_mut(target)?;
        Some(zone.take_paths(paths))
    }
}
