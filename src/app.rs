// src/app.rs
//
// Calculatrice — module App (racine)
// ----------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + historique.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Important:
// - Le clavier passe par noyau::depuis_touche : mêmes `Entree` que les boutons.
// - L’horloge de frame (i.time) fait avancer la minuterie d’erreur.

pub mod etat;
pub mod historique;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use std::time::Duration;

use eframe::egui;

use crate::noyau::{depuis_touche, Entree};

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (evenements, maintenant) = ctx.input(|i| (i.events.clone(), i.time));

        for ev in &evenements {
            for entree in entrees_clavier(ev) {
                self.appliquer(entree);
            }
        }

        // Échéance "Error" : on repeint juste à temps, sans boucle active.
        self.avancer(maintenant);
        if let Some(restant) = self.editeur.echeance_restante(maintenant) {
            ctx.request_repaint_after(Duration::from_secs_f64(restant));
        }

        if self.reglages.historique_visible {
            egui::SidePanel::right("panneau_historique")
                .resizable(true)
                .default_width(240.0)
                .show(ctx, |ui| {
                    self.ui_historique(ui);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.sauvegarder(storage);
    }
}

/// Événement egui -> primitives (un texte peut porter plusieurs caractères).
fn entrees_clavier(ev: &egui::Event) -> Vec<Entree> {
    match ev {
        egui::Event::Text(texte) => texte
            .chars()
            .filter_map(|c| depuis_touche(c.encode_utf8(&mut [0; 4])))
            .collect(),
        egui::Event::Key {
            key, pressed: true, ..
        } => {
            let nom = match key {
                egui::Key::Enter => "Enter",
                egui::Key::Backspace => "Backspace",
                egui::Key::Escape => "Escape",
                _ => return Vec::new(),
            };
            depuis_touche(nom).into_iter().collect()
        }
        _ => Vec::new(),
    }
}
