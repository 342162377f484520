//! src/noyau/editeur.rs
//!
//! Éditeur d’expression : tampon + dernier résultat + machine d’états.
//!
//! États : Vide -> Edition (tout ajout) -> Vide (validation réussie / effacer)
//!         Edition -> ErreurAffichee (validation ratée) -> Vide (délai ou nouvelle saisie)
//!
//! Contrats :
//! - au plus un point par littéral (le littéral = fin du tampon depuis le dernier
//!   opérateur / parenthèse / fonction)
//! - opérateurs consécutifs : le dernier gagne (remplacement, jamais d’empilement)
//! - tampon vide : seul le moins unaire peut ouvrir l’expression
//! - validation réussie : un `Calcul` rendu, exactement une fois, pour l’historique

use tracing::debug;

use super::clavier::{Entree, Touche};
use super::eval::{evaluer, ErreurEval, TEXTE_ERREUR};
use super::format::formater;
use super::minuterie::Minuterie;

/// Délai d’affichage de "Error" avant remise à zéro (secondes).
pub const DELAI_ERREUR_S: f64 = 2.0;

/// Moins d’affichage (U+2212), aussi moins unaire.
pub const MOINS: char = '−';

/// Opérateurs binaires tels qu’ils apparaissent dans le tampon.
pub const OPERATEURS_BINAIRES: [char; 4] = ['+', MOINS, '×', '÷'];

const RESULTAT_INITIAL: &str = "0";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EtatTampon {
    Vide,
    Edition,
    ErreurAffichee,
}

/// Calcul terminé, à transmettre à l’historique.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Calcul {
    pub expression: String,
    pub resultat: String,
}

/// Paire (expression, résultat) à afficher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Affichage {
    pub expression: String,
    pub resultat: String,
}

#[derive(Clone, Debug)]
pub struct Editeur {
    tampon: String,
    resultat: String,

    // expression validée, montrée tant qu’on n’a rien retapé
    derniere_expression: String,

    dernier_resultat: f64,
    etat: EtatTampon,
    minuterie: Minuterie,
}

impl Default for Editeur {
    fn default() -> Self {
        Self::new(DELAI_ERREUR_S)
    }
}

impl Editeur {
    pub fn new(delai_erreur_s: f64) -> Self {
        Self {
            tampon: String::new(),
            resultat: RESULTAT_INITIAL.to_string(),
            derniere_expression: String::new(),
            dernier_resultat: 0.0,
            etat: EtatTampon::Vide,
            minuterie: Minuterie::new(delai_erreur_s),
        }
    }

    /* ------------------------ Lecture ------------------------ */

    pub fn tampon(&self) -> &str {
        &self.tampon
    }

    pub fn resultat(&self) -> &str {
        &self.resultat
    }

    /// LastAnswer : dernière valeur validée avec succès.
    pub fn dernier_resultat(&self) -> f64 {
        self.dernier_resultat
    }

    pub fn etat(&self) -> EtatTampon {
        self.etat
    }

    pub fn affichage(&self) -> Affichage {
        let expression = if !self.tampon.is_empty() {
            self.tampon.clone()
        } else if !self.derniere_expression.is_empty() {
            self.derniere_expression.clone()
        } else {
            RESULTAT_INITIAL.to_string()
        };

        Affichage {
            expression,
            resultat: self.resultat.clone(),
        }
    }

    /* ------------------------ Primitives ------------------------ */

    /// Point d’entrée unique des adaptateurs (clavier + boutons).
    pub fn appliquer(&mut self, entree: Entree) -> Option<Calcul> {
        match entree {
            Entree::Chiffre(c) => {
                self.ajouter_chiffre(c);
            }
            Entree::Operateur(op) => {
                self.ajouter_operateur(op);
            }
            Entree::Fonction(t) => {
                self.ajouter_fonction(t);
            }
            Entree::RetourArriere => {
                self.retour_arriere();
            }
            Entree::Effacer => self.effacer(),
            Entree::Valider => return self.valider(),
        }
        None
    }

    /// Chiffre ou point. Refuse un second point dans le littéral courant.
    pub fn ajouter_chiffre(&mut self, c: char) -> &str {
        if !(c.is_ascii_digit() || c == '.') {
            return &self.tampon;
        }
        self.preparer_edition();

        if c == '.' && self.litteral_courant().contains('.') {
            debug!(tampon = %self.tampon, "second point refusé");
            return &self.tampon;
        }

        self.tampon.push(c);
        self.maj_etat();
        &self.tampon
    }

    /// Opérateur binaire (ou moins unaire en tête). Le dernier opérateur gagne.
    pub fn ajouter_operateur(&mut self, op: char) -> &str {
        let Some(op) = operateur_canonique(op) else {
            return &self.tampon;
        };
        self.preparer_edition();

        // longueur du tampon sans l’opérateur final éventuel
        let base = match self.tampon.chars().last() {
            Some(c) if OPERATEURS_BINAIRES.contains(&c) => self.tampon.len() - c.len_utf8(),
            _ => self.tampon.len(),
        };

        if base == 0 && op != MOINS {
            debug!(op = %op, "opérateur binaire refusé en tête");
            return &self.tampon;
        }

        self.tampon.truncate(base);
        self.tampon.push(op);
        self.maj_etat();
        &self.tampon
    }

    /// Fonctions, constantes, parenthèses, x², et % (micro-validation).
    pub fn ajouter_fonction(&mut self, touche: Touche) -> &str {
        self.preparer_edition();

        match touche.texte() {
            Some(texte) => self.tampon.push_str(texte),
            None => self.pourcentage(),
        }

        self.maj_etat();
        &self.tampon
    }

    /// Retire exactement un caractère final (sans effet sur tampon vide).
    pub fn retour_arriere(&mut self) -> &str {
        self.preparer_edition();
        self.tampon.pop();
        self.maj_etat();
        &self.tampon
    }

    /// Remise à zéro : tampon vide, résultat "0", minuterie annulée.
    pub fn effacer(&mut self) {
        self.tampon.clear();
        self.resultat = RESULTAT_INITIAL.to_string();
        self.derniere_expression.clear();
        self.minuterie.annuler();
        self.etat = EtatTampon::Vide;
    }

    /// Validation (= / Enter).
    ///
    /// - tampon vide : rien
    /// - succès : résultat formaté affiché + LastAnswer, tampon vidé, `Calcul` rendu
    /// - échec : "Error" affiché, effacement automatique programmé, rien de rendu
    pub fn valider(&mut self) -> Option<Calcul> {
        if self.etat == EtatTampon::ErreurAffichee {
            self.effacer();
        }
        if self.tampon.is_empty() {
            return None;
        }

        match evaluer(&self.tampon) {
            Ok(v) => {
                let resultat = formater(v);
                self.resultat = resultat.clone();
                self.dernier_resultat = v;
                self.derniere_expression = std::mem::take(&mut self.tampon);
                self.etat = EtatTampon::Vide;

                Some(Calcul {
                    expression: self.derniere_expression.clone(),
                    resultat,
                })
            }
            Err(e) => {
                self.signaler_erreur(&e);
                None
            }
        }
    }

    /// Rappel depuis l’historique : écrase tampon et résultat, sans validation.
    pub fn charger_calcul(&mut self, expression: &str, resultat: &str) {
        self.minuterie.annuler();
        self.tampon = expression.to_string();
        self.resultat = resultat.to_string();
        self.derniere_expression.clear();
        self.etat = EtatTampon::Vide;
        self.maj_etat();
    }

    /* ------------------------ Minuterie ------------------------ */

    /// À appeler à chaque frame. Renvoie true si l’erreur vient d’être effacée.
    pub fn avancer(&mut self, maintenant: f64) -> bool {
        if self.minuterie.avancer(maintenant) {
            self.effacer();
            return true;
        }
        false
    }

    pub fn echeance_restante(&self, maintenant: f64) -> Option<f64> {
        self.minuterie.restant(maintenant)
    }

    /* ------------------------ Interne ------------------------ */

    /// Toute saisie pendant "Error" repart d’un tampon vide.
    fn preparer_edition(&mut self) {
        if self.etat == EtatTampon::ErreurAffichee {
            self.effacer();
        }
        self.derniere_expression.clear();
    }

    fn maj_etat(&mut self) {
        if self.etat == EtatTampon::ErreurAffichee {
            return;
        }
        self.etat = if self.tampon.is_empty() {
            EtatTampon::Vide
        } else {
            EtatTampon::Edition
        };
    }

    /// Suffixe du tampon fait de chiffres / point / virgules de groupement.
    fn litteral_courant(&self) -> &str {
        let debut = self
            .tampon
            .char_indices()
            .rev()
            .find(|(_, c)| !(c.is_ascii_digit() || *c == '.' || *c == ','))
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        &self.tampon[debut..]
    }

    /// Micro-validation : tampon <- format(valeur / 100). Ni historique, ni LastAnswer.
    fn pourcentage(&mut self) {
        if self.tampon.is_empty() {
            return;
        }

        match evaluer(&self.tampon) {
            Ok(v) => {
                let texte = formater(v / 100.0);
                if texte == TEXTE_ERREUR {
                    self.signaler_erreur(&ErreurEval::NonFini);
                    return;
                }
                // le tampon garde le moins d’affichage
                self.tampon = texte.replace('-', &MOINS.to_string());
                self.resultat = texte;
            }
            Err(e) => self.signaler_erreur(&e),
        }
    }

    fn signaler_erreur(&mut self, e: &ErreurEval) {
        debug!(tampon = %self.tampon, erreur = %e, "échec d’évaluation");
        self.resultat = TEXTE_ERREUR.to_string();
        self.etat = EtatTampon::ErreurAffichee;
        self.minuterie.armer();
    }
}

/// Accepte aussi les équivalents ASCII (- * /).
fn operateur_canonique(op: char) -> Option<char> {
    match op {
        '+' => Some('+'),
        '-' | MOINS => Some(MOINS),
        '*' | '×' => Some('×'),
        '/' | '÷' => Some('÷'),
        _ => None,
    }
}
