// src/noyau/format.rs
//
// Affichage du résultat :
// - arrondi à 8 décimales (absorbe le bruit binaire : 0.1+0.2 -> 0.3)
// - groupement des milliers ("1,234,567.5") si |arrondi| ≥ 1000
// - sinon chiffre brut, jamais de notation exponentielle
// - non fini -> "Error"

use super::eval::TEXTE_ERREUR;

/// Nombre de décimales conservées à l’affichage.
pub const DECIMALES: i32 = 8;

/// Seuil à partir duquel on groupe les milliers.
const SEUIL_GROUPEMENT: f64 = 1000.0;

/// 2^52 : plus aucune partie fractionnaire représentable au-delà.
const LIMITE_ENTIERE: f64 = 4_503_599_627_370_496.0;

/// Arrondi « demi vers +∞ » à DECIMALES (même règle que Math.round).
pub fn arrondir(v: f64) -> f64 {
    let facteur = 10f64.powi(DECIMALES);
    let scaled = v * facteur;

    // au-delà de 2^52, tout f64 est entier : l’arrondi est l’identité
    if !scaled.is_finite() || scaled.abs() >= LIMITE_ENTIERE {
        return v;
    }

    let plancher = scaled.floor();
    let entier = if scaled - plancher >= 0.5 {
        plancher + 1.0
    } else {
        plancher
    };

    let r = entier / facteur;
    // pas de "-0"
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

/// Formate une valeur pour l’affichage (et pour la relecture par le tokenizer).
pub fn formater(v: f64) -> String {
    if !v.is_finite() {
        return TEXTE_ERREUR.to_string();
    }

    let r = arrondir(v);

    // Display f64 : plus courte écriture exacte, sans exposant
    let brut = format!("{r}");

    if r.abs() >= SEUIL_GROUPEMENT {
        grouper_milliers(&brut)
    } else {
        brut
    }
}

/// "-1234567.5" -> "-1,234,567.5"
fn grouper_milliers(brut: &str) -> String {
    let (signe, reste) = match brut.strip_prefix('-') {
        Some(r) => ("-", r),
        None => ("", brut),
    };
    let (entier, frac) = match reste.find('.') {
        Some(p) => reste.split_at(p),
        None => (reste, ""),
    };

    let n = entier.len();
    let mut out = String::with_capacity(brut.len() + n / 3);
    out.push_str(signe);
    for (i, c) in entier.chars().enumerate() {
        if i > 0 && (n - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(frac);
    out
}
