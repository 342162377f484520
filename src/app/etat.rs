//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : posséder la session (un éditeur, un historique, des réglages) et
//! relier l’éditeur à l’historique. Aucun singleton global : tout vit ici,
//! construit une fois au démarrage par main.rs.
//!
//! Contrats :
//! - Aucune évaluation ici (tout passe par noyau::Editeur).
//! - Un `Calcul` rendu par l’éditeur est ajouté à l’historique, une seule fois.
//! - Persistance via eframe::Storage (historique + réglages).

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::historique::{Historique, CLE_HISTORIQUE};
use crate::noyau::{Editeur, Entree};

/// Clé de stockage eframe.
const CLE_REGLAGES: &str = "reglages";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Basique,
    Scientifique,
}

/// Préférences utilisateur persistées.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reglages {
    pub mode: Mode,
    pub historique_visible: bool,
}

#[derive(Clone, Debug, Default)]
pub struct AppCalc {
    pub editeur: Editeur,
    pub historique: Historique,
    pub reglages: Reglages,

    // --- UX ---
    // "Tout effacer" demande une seconde pression.
    pub confirmer_vidage: bool,
}

impl AppCalc {
    /// Reconstruit la session depuis le stockage eframe (si disponible).
    pub fn depuis_stockage(storage: Option<&dyn eframe::Storage>) -> Self {
        let Some(storage) = storage else {
            return Self::default();
        };

        let historique = eframe::get_value::<Historique>(storage, CLE_HISTORIQUE)
            .map(Historique::normaliser)
            .unwrap_or_default();
        let reglages = eframe::get_value::<Reglages>(storage, CLE_REGLAGES).unwrap_or_default();

        debug!(entrees = historique.len(), mode = ?reglages.mode, "session restaurée");

        Self {
            historique,
            reglages,
            ..Self::default()
        }
    }

    pub fn sauvegarder(&self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, CLE_HISTORIQUE, &self.historique);
        eframe::set_value(storage, CLE_REGLAGES, &self.reglages);
    }

    /* ------------------------ Actions ------------------------ */

    /// Primitive d’édition (clavier ou bouton) + transmission à l’historique.
    pub fn appliquer(&mut self, entree: Entree) {
        if let Some(calcul) = self.editeur.appliquer(entree) {
            debug!(expression = %calcul.expression, resultat = %calcul.resultat, "calcul validé");
            self.historique.ajouter(calcul);
        }
    }

    /// Rappel d’un calcul de l’historique dans l’éditeur.
    pub fn rappeler(&mut self, id: u64) {
        match self.historique.rappeler(id) {
            Some(e) => self.editeur.charger_calcul(&e.expression, &e.resultat),
            None => warn!(id, "rappel d’un calcul absent de l’historique"),
        }
    }

    pub fn supprimer(&mut self, id: u64) {
        if !self.historique.supprimer(id) {
            warn!(id, "suppression d’un calcul absent de l’historique");
        }
    }

    /// Premier appel : demande confirmation. Second : vide.
    pub fn vider_historique(&mut self) {
        if self.historique.is_empty() {
            return;
        }
        if self.confirmer_vidage {
            self.historique.vider();
            self.confirmer_vidage = false;
        } else {
            self.confirmer_vidage = true;
        }
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.reglages.mode = mode;
    }

    /// Horloge de frame (secondes). Efface "Error" à l’échéance.
    pub fn avancer(&mut self, maintenant: f64) {
        if self.editeur.avancer(maintenant) {
            debug!("erreur effacée après délai");
        }
    }
}
