//! Noyau — évaluation (pipeline réel)
//!
//! tokenize (substitution des glyphes + fonctions) -> RPN -> Expr -> valeur f64
//!
//! Deux échecs possibles, tous deux affichés "Error" côté UI :
//! - ExpressionInvalide : syntaxe (jeton inconnu, parenthèse, opérateur pendant, argument vide)
//! - NonFini            : syntaxe correcte mais NaN / ±∞ (ex: 5÷0, log(0), sqrt(-1))

use thiserror::Error;
use tracing::debug;

use super::jetons::{format_tokens, tokenize};
use super::rpn::{from_rpn, to_rpn};

/// Seul texte d’échec montré à l’utilisateur (la distinction reste interne).
pub const TEXTE_ERREUR: &str = "Error";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurEval {
    #[error("expression invalide : {0}")]
    ExpressionInvalide(String),

    #[error("résultat non fini")]
    NonFini,
}

impl ErreurEval {
    pub(crate) fn invalide(msg: impl Into<String>) -> Self {
        ErreurEval::ExpressionInvalide(msg.into())
    }
}

/// API publique : évalue une expression terminée.
pub fn evaluer(expr_str: &str) -> Result<f64, ErreurEval> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurEval::invalide("entrée vide"));
    }

    // 1) Jetons (substitution × ÷ − π e ^ + fonctions)
    let jetons = tokenize(s)?;

    // 2) RPN (précédence + validation syntaxique)
    let rpn = to_rpn(&jetons)?;

    // 3) AST
    let arbre = from_rpn(&rpn)?;

    debug!(
        jetons = %format_tokens(&jetons),
        rpn = %format_tokens(&rpn),
        arbre = %arbre,
        "évaluation"
    );

    // 4) Réduction ; seule la valeur finale est jugée
    let v = arbre.valeur();
    if !v.is_finite() {
        return Err(ErreurEval::NonFini);
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::{evaluer, ErreurEval};

    fn ok(s: &str) -> f64 {
        evaluer(s).unwrap_or_else(|e| panic!("evaluer({s:?}) erreur: {e}"))
    }

    fn proche(s: &str, attendu: f64) {
        let v = ok(s);
        assert!(
            (v - attendu).abs() < 1e-9,
            "expr={s:?} valeur={v} attendu={attendu}"
        );
    }

    fn invalide(s: &str) {
        assert!(
            matches!(evaluer(s), Err(ErreurEval::ExpressionInvalide(_))),
            "attendu ExpressionInvalide pour {s:?}"
        );
    }

    fn non_fini(s: &str) {
        assert_eq!(evaluer(s), Err(ErreurEval::NonFini), "expr={s:?}");
    }

    // --- Précédence ---

    #[test]
    fn precedence_loi() {
        proche("2+3×4", 14.0);
        proche("(2+3)×4", 20.0);
        proche("10−4−3", 3.0);
        proche("100÷10÷5", 2.0);
    }

    #[test]
    fn puissances() {
        proche("9^2", 81.0);
        proche("2^3^2", 512.0);
        proche("−2^2", -4.0);
        proche("2^(3)", 8.0);
        proche("4^0.5", 2.0);
    }

    #[test]
    fn moins_unaire() {
        proche("−5+2", -3.0);
        proche("2×−3", -6.0);
        proche("(−(−4))", 4.0);
    }

    // --- Scientifique ---

    #[test]
    fn trigo_en_radians() {
        proche("sin(90)", 0.893_996_663_600_557_9);
        proche("cos(π)", -1.0);
        proche("tan(0)", 0.0);
    }

    #[test]
    fn logarithmes_racines_constantes() {
        proche("log(1000)", 3.0);
        proche("ln(e)", 1.0);
        proche("sqrt(16)", 4.0);
        proche("π", std::f64::consts::PI);
        proche("2×sqrt(e^2)", 2.0 * std::f64::consts::E);
    }

    // --- Non fini ---

    #[test]
    fn division_par_zero() {
        non_fini("5÷0");
        non_fini("0÷0");
    }

    #[test]
    fn hors_domaine() {
        non_fini("log(0)");
        non_fini("ln(−1)");
        non_fini("sqrt(−1)");
        non_fini("10^400");
    }

    #[test]
    fn infini_intermediaire_absorbe() {
        // seule la valeur finale compte
        proche("1÷(1÷0)", 0.0);
    }

    // --- Invalide ---

    #[test]
    fn syntaxe_invalide() {
        invalide("");
        invalide("2+");
        invalide("×3");
        invalide("(2+3");
        invalide("2+3)");
        invalide("sin()");
        invalide("2π");
        invalide("foo(2)");
        invalide("1.2.3");
    }

    #[test]
    fn groupement_relu() {
        proche("1,234.5+0.5", 1235.0);
    }
}
