// src/noyau/minuterie.rs
//
// Minuterie annulable (effacement automatique après "Error").
//
// Pas de thread, pas de callback : l’hôte (boucle de frames egui) fait
// avancer l’horloge via avancer(maintenant). L’échéance est ancrée au
// premier avancer() qui suit armer(), ce qui évite de passer l’heure
// à chaque primitive d’édition.
//
// Contrats :
// - au plus une échéance en attente
// - armer() remplace l’échéance précédente (jamais d’empilement)
// - annuler() est idempotent

#[derive(Clone, Copy, Debug, PartialEq)]
enum Echeance {
    /// Armée, pas encore ancrée sur l’horloge.
    Armee,
    /// Déclenche quand maintenant >= t (secondes).
    A(f64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Minuterie {
    delai: f64,
    echeance: Option<Echeance>,
}

impl Minuterie {
    pub fn new(delai_s: f64) -> Self {
        Self {
            delai: delai_s.max(0.0),
            echeance: None,
        }
    }

    pub fn armer(&mut self) {
        self.echeance = Some(Echeance::Armee);
    }

    pub fn annuler(&mut self) {
        self.echeance = None;
    }

    /// Fait avancer l’horloge. Renvoie true une seule fois, au déclenchement.
    pub fn avancer(&mut self, maintenant: f64) -> bool {
        let t = match self.echeance {
            None => return false,
            Some(Echeance::Armee) => {
                let t = maintenant + self.delai;
                self.echeance = Some(Echeance::A(t));
                t
            }
            Some(Echeance::A(t)) => t,
        };

        if maintenant >= t {
            self.echeance = None;
            return true;
        }
        false
    }

    /// Temps restant avant déclenchement (pour planifier un repaint).
    pub fn restant(&self, maintenant: f64) -> Option<f64> {
        match self.echeance? {
            Echeance::Armee => Some(self.delai),
            Echeance::A(t) => Some((t - maintenant).max(0.0)),
        }
    }
}
