//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler l’éditeur et l’évaluateur sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - séquences de touches bornées
//! - budget temps global
//! - invariants clés :
//!   * jamais deux points dans un même littéral
//!   * jamais deux opérateurs binaires collés
//!   * jamais d’opérateur binaire (hors moins) en tête
//!   * évaluer() ne panique pas ; un succès est toujours fini
//!   * un `Calcul` rendu a toujours un résultat différent de "Error"

use std::time::{Duration, Instant};

use super::clavier::{Entree, Touche};
use super::editeur::{Editeur, EtatTampon, MOINS, OPERATEURS_BINAIRES};
use super::eval::{evaluer, ErreurEval, TEXTE_ERREUR};
use super::format::formater;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération de touches ------------------------ */

const TOUCHES: [Touche; 13] = [
    Touche::Sin,
    Touche::Cos,
    Touche::Tan,
    Touche::Log,
    Touche::Ln,
    Touche::Sqrt,
    Touche::Puissance,
    Touche::Pi,
    Touche::E,
    Touche::ParenOuvrante,
    Touche::ParenFermante,
    Touche::Pourcentage,
    Touche::Carre,
];

fn gen_entree(rng: &mut Rng) -> Entree {
    // chiffres et opérateurs dominent, comme une vraie saisie
    match rng.pick(20) {
        0..=7 => {
            let c = if rng.pick(6) == 0 {
                '.'
            } else {
                char::from(b'0' + rng.pick(10) as u8)
            };
            Entree::Chiffre(c)
        }
        8..=12 => Entree::Operateur(OPERATEURS_BINAIRES[rng.pick(4) as usize]),
        13..=16 => Entree::Fonction(TOUCHES[rng.pick(TOUCHES.len() as u32) as usize]),
        17 => Entree::RetourArriere,
        18 => Entree::Valider,
        _ => {
            if rng.pick(4) == 0 {
                Entree::Effacer
            } else {
                Entree::Chiffre('1')
            }
        }
    }
}

/* ------------------------ Invariants ------------------------ */

fn check_points(tampon: &str) {
    let mut points = 0;
    for c in tampon.chars() {
        if c == '.' {
            points += 1;
            assert!(points <= 1, "deux points dans un littéral: {tampon:?}");
        } else if !(c.is_ascii_digit() || c == ',') {
            points = 0;
        }
    }
}

fn check_operateurs(tampon: &str) {
    let chars: Vec<char> = tampon.chars().collect();
    for w in chars.windows(2) {
        let colles = OPERATEURS_BINAIRES.contains(&w[0]) && OPERATEURS_BINAIRES.contains(&w[1]);
        assert!(!colles, "opérateurs colles: {tampon:?}");
    }
    if let Some(&c) = chars.first() {
        let binaire_en_tete = OPERATEURS_BINAIRES.contains(&c) && c != MOINS;
        assert!(!binaire_en_tete, "binaire en tête: {tampon:?}");
    }
}

/* ------------------------ Campagnes ------------------------ */

#[test]
fn fuzz_editeur_invariants() {
    let start = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0xC0FFEE);
    let mut horloge = 0.0;

    for _session in 0..200 {
        budget(start, max);
        let mut ed = Editeur::default();

        for _ in 0..60 {
            let entree = gen_entree(&mut rng);
            let calcul = ed.appliquer(entree);

            if let Some(c) = calcul {
                assert_ne!(c.resultat, "Error", "calcul rendu en erreur: {c:?}");
                assert_eq!(ed.tampon(), "");
                assert_eq!(ed.resultat(), c.resultat);
            }

            // pendant "Error" le tampon fautif reste affiché : invariants de saisie seulement ailleurs
            if ed.etat() != EtatTampon::ErreurAffichee {
                check_points(ed.tampon());
                check_operateurs(ed.tampon());
            }

            horloge += 0.25;
            ed.avancer(horloge);
        }
    }
}

#[test]
fn fuzz_evaluer_ne_panique_pas() {
    let start = Instant::now();
    let max = Duration::from_secs(5);

    let alphabet: Vec<char> = "0123456789.,+−×÷-*/^()πe sincotalgqr".chars().collect();
    let mut rng = Rng::new(42);

    for _ in 0..3000 {
        budget(start, max);

        let len = 1 + rng.pick(24) as usize;
        let s: String = (0..len)
            .map(|_| alphabet[rng.pick(alphabet.len() as u32) as usize])
            .collect();

        if let Ok(v) = evaluer(&s) {
            assert!(v.is_finite(), "succès non fini pour {s:?}");
            assert_ne!(formater(v), "Error", "format en erreur pour {s:?}");
        }
    }
}

#[test]
fn determinisme_evaluation() {
    for s in ["2+3×4", "sin(90)", "sqrt(2)^2", "1,234.5÷5", "−(2^−1)"] {
        let a = evaluer(s);
        let b = evaluer(s);
        assert_eq!(a, b, "expr={s:?}");
    }
}

#[test]
fn profondeur_parentheses_bornee() {
    // profondeur raisonnable : pas de débordement de pile
    let n = 200;
    let s = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(evaluer(&s), Ok(1.0));

    let s = format!("{}1{}", "sqrt(".repeat(n), ")".repeat(n));
    assert_eq!(evaluer(&s), Ok(1.0));
}

#[test]
fn imbrication_extreme_rejetee_sans_crash() {
    let n = 100_000;

    let s = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(evaluer(&s), Ok(1.0));

    let s = format!("{}1{}", "sqrt(".repeat(n), ")".repeat(n));
    assert!(matches!(evaluer(&s), Err(ErreurEval::ExpressionInvalide(_))));

    let s = format!("1{}", "+1".repeat(n));
    assert!(matches!(evaluer(&s), Err(ErreurEval::ExpressionInvalide(_))));

    // même chemin que l’UI : primitives de l’éditeur puis validation
    let mut ed = Editeur::default();
    for _ in 0..n {
        ed.appliquer(Entree::Fonction(Touche::Sqrt));
    }
    ed.appliquer(Entree::Chiffre('1'));
    for _ in 0..n {
        ed.appliquer(Entree::Fonction(Touche::ParenFermante));
    }
    assert_eq!(ed.appliquer(Entree::Valider), None);
    assert_eq!(ed.etat(), EtatTampon::ErreurAffichee);
    assert_eq!(ed.resultat(), TEXTE_ERREUR);
}
