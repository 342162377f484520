// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Adaptateur pur : chaque bouton produit une `Entree`, rien d’autre
// - Tactile : gros boutons ; clavier géré dans app.rs (même `Entree`)
// - Mode scientifique : pavé de fonctions au-dessus du pavé numérique

use eframe::egui;

use super::etat::{AppCalc, Mode};
use crate::noyau::{EtatTampon, Entree, Touche};

const TAILLE_BOUTON: [f32; 2] = [64.0, 44.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        ui.horizontal(|ui| {
            ui.heading("Calculatrice");
            ui.separator();
            ui.selectable_value(&mut self.reglages.mode, Mode::Basique, "Basique");
            ui.selectable_value(&mut self.reglages.mode, Mode::Scientifique, "Scientifique");
            ui.separator();
            ui.toggle_value(&mut self.reglages.historique_visible, "Historique");
        });

        ui.add_space(8.0);
        self.ui_affichage(ui);
        ui.add_space(8.0);

        if self.reglages.mode == Mode::Scientifique {
            self.ui_pave_scientifique(ui);
            ui.add_space(6.0);
        }
        self.ui_pave_numerique(ui);
    }

    fn ui_affichage(&mut self, ui: &mut egui::Ui) {
        let aff = self.editeur.affichage();
        let en_erreur = self.editeur.etat() == EtatTampon::ErreurAffichee;
        let ans = crate::noyau::format::formater(self.editeur.dernier_resultat());

        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    ui.label(egui::RichText::new(&aff.expression).monospace().size(18.0));

                    let mut resultat = egui::RichText::new(&aff.resultat).monospace().size(36.0);
                    if en_erreur {
                        resultat = resultat.color(ui.visuals().error_fg_color);
                    }
                    ui.label(resultat).on_hover_text(format!("Ans = {ans}"));
                });
            });
    }

    fn ui_pave_scientifique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_scientifique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in [
                    [Touche::Sin, Touche::Cos, Touche::Tan, Touche::Log],
                    [Touche::Ln, Touche::Sqrt, Touche::Puissance, Touche::Carre],
                ] {
                    for t in rangee {
                        self.bouton(ui, t.libelle(), Entree::Fonction(t));
                    }
                    ui.end_row();
                }

                self.bouton(ui, Touche::Pi.libelle(), Entree::Fonction(Touche::Pi));
                self.bouton(ui, Touche::E.libelle(), Entree::Fonction(Touche::E));
                ui.label("");
                ui.label("");
                ui.end_row();
            });
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton(ui, "C", Entree::Effacer);
                self.bouton(ui, "⌫", Entree::RetourArriere);
                self.bouton(ui, "%", Entree::Fonction(Touche::Pourcentage));
                self.bouton(ui, "÷", Entree::Operateur('÷'));
                ui.end_row();

                for (chiffres, op) in [("789", '×'), ("456", '−'), ("123", '+')] {
                    for c in chiffres.chars() {
                        self.bouton(ui, &c.to_string(), Entree::Chiffre(c));
                    }
                    self.bouton(ui, &op.to_string(), Entree::Operateur(op));
                    ui.end_row();
                }

                self.bouton(ui, "0", Entree::Chiffre('0'));
                self.bouton(ui, ".", Entree::Chiffre('.'));
                self.bouton(ui, "(", Entree::Fonction(Touche::ParenOuvrante));
                self.bouton(ui, ")", Entree::Fonction(Touche::ParenFermante));
                ui.end_row();
            });

        ui.add_space(6.0);
        let largeur = TAILLE_BOUTON[0] * 4.0 + 6.0 * 3.0;
        let eq = ui.add_sized([largeur, TAILLE_BOUTON[1]], egui::Button::new("="));
        if eq.clicked() {
            self.appliquer(Entree::Valider);
        }
    }

    /// Panneau d’historique (rappel / suppression / vidage).
    pub fn ui_historique(&mut self, ui: &mut egui::Ui) {
        ui.heading("Historique");
        ui.add_space(4.0);

        if self.historique.is_empty() {
            ui.label("Aucun calcul pour l’instant");
            return;
        }

        let libelle_vider = if self.confirmer_vidage {
            "Confirmer ?"
        } else {
            "Tout effacer"
        };
        let mut action: Option<ActionHistorique> = None;
        if ui.button(libelle_vider).clicked() {
            action = Some(ActionHistorique::Vider);
        }

        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for e in self.historique.iter() {
                    ui.horizontal(|ui| {
                        let resp = ui
                            .add(egui::Button::new(
                                egui::RichText::new(format!("{} = {}", e.expression, e.resultat))
                                    .monospace(),
                            ))
                            .on_hover_text("Rappeler ce calcul");
                        if resp.clicked() {
                            action = Some(ActionHistorique::Rappeler(e.id));
                        }
                        if ui.small_button("✕").clicked() {
                            action = Some(ActionHistorique::Supprimer(e.id));
                        }
                        if let Some(heure) = e.heure() {
                            ui.weak(heure);
                        }
                    });
                }
            });

        // appliqué hors de l’itération (emprunt de self.historique)
        match action {
            Some(ActionHistorique::Rappeler(id)) => self.rappeler(id),
            Some(ActionHistorique::Supprimer(id)) => self.supprimer(id),
            Some(ActionHistorique::Vider) => self.vider_historique(),
            None => {}
        }
    }

    fn bouton(&mut self, ui: &mut egui::Ui, libelle: &str, entree: Entree) {
        let resp = ui.add_sized(TAILLE_BOUTON, egui::Button::new(libelle));
        if resp.clicked() {
            self.appliquer(entree);
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum ActionHistorique {
    Rappeler(u64),
    Supprimer(u64),
    Vider,
}
