//! src/app/historique.rs
//!
//! Historique des calculs : journal borné, le plus récent en tête.
//!
//! Contrats :
//! - uniquement alimenté par les validations réussies (jamais % ni "Error")
//! - au plus MAX_HISTORIQUE entrées (les plus anciennes tombent)
//! - identifiants strictement croissants, jamais réutilisés
//! - persistant via eframe::Storage (fichier en natif, localStorage en web)

use std::collections::VecDeque;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::noyau::Calcul;

/// Garde-fou : taille maximale du journal.
pub const MAX_HISTORIQUE: usize = 50;

/// Clé de stockage eframe.
pub const CLE_HISTORIQUE: &str = "historique";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntreeHistorique {
    pub id: u64,
    pub expression: String,
    pub resultat: String,
    /// Secondes Unix (UTC) de la validation. 0 : entrée relue sans horodatage.
    #[serde(default)]
    pub horodatage: i64,
}

impl EntreeHistorique {
    /// Heure locale lisible ("18/10 14:05"), None si non horodatée.
    pub fn heure(&self) -> Option<String> {
        if self.horodatage <= 0 {
            return None;
        }
        let t = DateTime::<Utc>::from_timestamp(self.horodatage, 0)?;
        Some(t.with_timezone(&Local).format("%d/%m %H:%M").to_string())
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Historique {
    elements: VecDeque<EntreeHistorique>,
    prochain_id: u64,
}

impl Historique {
    /// Ajoute en tête, horodaté maintenant. Renvoie l’id attribué.
    pub fn ajouter(&mut self, calcul: Calcul) -> u64 {
        self.ajouter_a(calcul, Utc::now().timestamp())
    }

    pub fn ajouter_a(&mut self, calcul: Calcul, horodatage: i64) -> u64 {
        let id = self.prochain_id;
        self.prochain_id += 1;

        self.elements.push_front(EntreeHistorique {
            id,
            expression: calcul.expression,
            resultat: calcul.resultat,
            horodatage,
        });
        self.elements.truncate(MAX_HISTORIQUE);
        id
    }

    pub fn supprimer(&mut self, id: u64) -> bool {
        let avant = self.elements.len();
        self.elements.retain(|e| e.id != id);
        self.elements.len() != avant
    }

    pub fn vider(&mut self) {
        self.elements.clear();
    }

    pub fn rappeler(&self, id: u64) -> Option<&EntreeHistorique> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntreeHistorique> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Défense en profondeur après relecture d’un stockage (borne + ids).
    pub fn normaliser(mut self) -> Self {
        self.elements.truncate(MAX_HISTORIQUE);
        let max_id = self.elements.iter().map(|e| e.id).max();
        if let Some(m) = max_id {
            self.prochain_id = self.prochain_id.max(m + 1);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{EntreeHistorique, Historique, MAX_HISTORIQUE};
    use crate::noyau::Calcul;

    fn calcul(expression: &str, resultat: &str) -> Calcul {
        Calcul {
            expression: expression.into(),
            resultat: resultat.into(),
        }
    }

    #[test]
    fn plus_recent_en_tete() {
        let mut h = Historique::default();
        h.ajouter(calcul("1+1", "2"));
        h.ajouter(calcul("2×3", "6"));

        let exprs: Vec<&str> = h.iter().map(|e| e.expression.as_str()).collect();
        assert_eq!(exprs, ["2×3", "1+1"]);
    }

    #[test]
    fn borne_respectee() {
        let mut h = Historique::default();
        for i in 0..(MAX_HISTORIQUE + 7) {
            h.ajouter(calcul(&format!("{i}"), &format!("{i}")));
        }
        assert_eq!(h.len(), MAX_HISTORIQUE);
        // les plus anciennes sont tombées
        assert_eq!(h.iter().last().map(|e| e.expression.as_str()), Some("7"));
    }

    #[test]
    fn supprimer_rappeler_vider() {
        let mut h = Historique::default();
        let a = h.ajouter(calcul("9^2", "81"));
        let b = h.ajouter(calcul("5÷2", "2.5"));
        assert_ne!(a, b);

        assert_eq!(h.rappeler(a).map(|e| e.resultat.as_str()), Some("81"));
        assert!(h.supprimer(a));
        assert!(!h.supprimer(a));
        assert!(h.rappeler(a).is_none());

        h.vider();
        assert!(h.is_empty());

        // ids jamais réutilisés
        let c = h.ajouter(calcul("1", "1"));
        assert!(c > b);
    }

    #[test]
    fn normaliser_repare_les_ids() {
        let mut h = Historique::default();
        h.ajouter(calcul("1", "1"));
        h.ajouter(calcul("2", "2"));
        let mut relu = h.clone();
        relu.prochain_id = 0;

        let mut relu = relu.normaliser();
        let id = relu.ajouter(calcul("3", "3"));
        assert_eq!(id, 2);
    }

    #[test]
    fn horodatage_conserve() {
        let mut h = Historique::default();
        let id = h.ajouter_a(calcul("6×7", "42"), 1_700_000_000);
        let e = h.rappeler(id).unwrap();
        assert_eq!(e.horodatage, 1_700_000_000);
        assert!(e.heure().is_some());

        // horloge réelle : forcément après 2020
        let id = h.ajouter(calcul("1", "1"));
        assert!(h.rappeler(id).unwrap().horodatage > 1_577_836_800);
    }

    #[test]
    fn entree_sans_horodatage() {
        let e = EntreeHistorique {
            id: 0,
            expression: "1".into(),
            resultat: "1".into(),
            horodatage: 0,
        };
        assert_eq!(e.heure(), None);
    }
}
