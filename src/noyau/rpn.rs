// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), en validant la syntaxe au passage
// - Puis reconstruire Expr
//
// Priorités (de la plus faible à la plus forte):
//   + -  (gauche)  <  * /  (gauche)  <  moins unaire  <  ^  (droite)  <  appels, parenthèses
//
// Donc: -2^2 = -(2^2), 2^-3 = 2^(-3), 2*-3 = 2*(-3).
//
// NOTE:
// - Les fonctions restent sur la pile sous leur '(' et sortent après la ')'.
// - Pas de multiplication implicite : "2π" ou ")(" sont des erreurs.
// - Arbre borné à MAX_PROFONDEUR niveaux : valeur(), Display et Drop sont récursifs.

use std::f64::consts::{E, PI};

use super::eval::ErreurEval;
use super::expr::Expr;
use super::jetons::Tok;

/// Garde-fou : profondeur maximale de l’arbre construit par from_rpn.
pub const MAX_PROFONDEUR: usize = 1000;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Caret => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(2), Plus, Num(3), Star, Num(4)]
///   rpn:    [Num(2), Num(3), Num(4), Star, Plus]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurEval> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // true tant qu’on attend un opérande (début, après opérateur, après '(')
    let mut attend_valeur = true;

    let mut iter = tokens.iter().cloned().peekable();
    while let Some(tok) = iter.next() {
        match tok {
            Tok::Num(_) | Tok::Pi | Tok::E => {
                if !attend_valeur {
                    return Err(ErreurEval::invalide("valeur inattendue après une valeur"));
                }
                out.push(tok);
                attend_valeur = false;
            }

            Tok::Fonction(f) => {
                if !attend_valeur {
                    return Err(ErreurEval::invalide(format!(
                        "{}( inattendu après une valeur",
                        f.nom()
                    )));
                }
                if !matches!(iter.peek(), Some(Tok::LPar)) {
                    return Err(ErreurEval::invalide(format!("{} sans parenthèse", f.nom())));
                }
                ops.push(tok);
            }

            Tok::LPar => {
                if !attend_valeur {
                    return Err(ErreurEval::invalide("'(' inattendue après une valeur"));
                }
                ops.push(tok);
            }

            Tok::RPar => {
                if attend_valeur {
                    // "()", "sin()", "(2+)"
                    return Err(ErreurEval::invalide("opérande manquant avant ')'"));
                }

                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        Some(Tok::LPar) => break,
                        Some(top) => out.push(top),
                        None => return Err(ErreurEval::invalide("')' sans '(' correspondante")),
                    }
                }

                // si une fonction est au sommet, elle s’applique au groupe fermé
                if matches!(ops.last(), Some(Tok::Fonction(_))) {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }
            }

            Tok::Minus if attend_valeur => {
                // préfixe : ne dépile rien
                ops.push(Tok::Neg);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if attend_valeur {
                    return Err(ErreurEval::invalide("opérateur sans opérande gauche"));
                }

                // dépile tant que:
                // - on n'est pas bloqué par '(' ou une fonction
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar | Tok::Fonction(_)) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };
                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok);
                attend_valeur = true;
            }

            Tok::Neg => return Err(ErreurEval::invalide("jeton interne inattendu")),
        }
    }

    if attend_valeur {
        return Err(ErreurEval::invalide("expression incomplète"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurEval::invalide("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
/// π et e sont substitués par leur valeur ici.
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, ErreurEval> {
    // chaque noeud garde la profondeur de son sous-arbre
    let mut st: Vec<(Expr, usize)> = Vec::new();

    fn depile(st: &mut Vec<(Expr, usize)>) -> Result<(Box<Expr>, usize), ErreurEval> {
        st.pop()
            .map(|(e, p)| (Box::new(e), p))
            .ok_or_else(|| ErreurEval::invalide("opérande manquant"))
    }

    for tok in rpn.iter().cloned() {
        let (e, profondeur) = match tok {
            Tok::Num(x) => (Expr::Nombre(x), 1),
            Tok::Pi => (Expr::Nombre(PI), 1),
            Tok::E => (Expr::Nombre(E), 1),

            Tok::Neg => {
                let (a, p) = depile(&mut st)?;
                (Expr::Neg(a), p + 1)
            }
            Tok::Fonction(f) => {
                let (a, p) = depile(&mut st)?;
                (Expr::Appel(f, a), p + 1)
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let (b, pb) = depile(&mut st)?;
                let (a, pa) = depile(&mut st)?;
                let e = match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    _ => Expr::Pow(a, b),
                };
                (e, pa.max(pb) + 1)
            }

            Tok::LPar | Tok::RPar => {
                return Err(ErreurEval::invalide("parenthèse inattendue en RPN"))
            }
        };

        if profondeur > MAX_PROFONDEUR {
            return Err(ErreurEval::invalide("expression trop profonde"));
        }
        st.push((e, profondeur));
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        _ => Err(ErreurEval::invalide("expression invalide")),
    }
}

#[cfg(test)]
mod tests {
    use super::{from_rpn, to_rpn, MAX_PROFONDEUR};
    use crate::noyau::eval::ErreurEval;
    use crate::noyau::jetons::{format_tokens, tokenize};

    fn rpn(s: &str) -> String {
        let t = tokenize(s).unwrap();
        format_tokens(&to_rpn(&t).unwrap())
    }

    fn arbre(s: &str) -> String {
        let t = tokenize(s).unwrap();
        from_rpn(&to_rpn(&t).unwrap()).unwrap().to_string()
    }

    #[test]
    fn precedence_mul_avant_add() {
        assert_eq!(rpn("2+3×4"), "2 3 4 * +");
    }

    #[test]
    fn puissance_associative_a_droite() {
        assert_eq!(rpn("2^3^2"), "2 3 2 ^ ^");
    }

    #[test]
    fn moins_unaire_sous_la_puissance() {
        assert_eq!(arbre("-2^2"), "(-(2^2))");
        assert_eq!(arbre("2^-3"), "(2^(-3))");
        assert_eq!(arbre("2×−3"), "(2*(-3))");
        assert_eq!(arbre("-2×3"), "((-2)*3)");
    }

    #[test]
    fn fonction_colle_a_son_argument() {
        assert_eq!(rpn("sin(1+2)×3"), "1 2 + sin 3 *");
    }

    #[test]
    fn erreurs_de_syntaxe() {
        for s in [
            "2+", "×2", "(2+3", "2+3)", "()", "sin()", "sin 2", "2π", "(1)(2)", "2 3", "",
        ] {
            let res = tokenize(s).and_then(|t| to_rpn(&t));
            assert!(res.is_err(), "attendu une erreur pour {s:?}");
        }
    }

    #[test]
    fn profondeur_bornee() {
        let construit = |s: &str| tokenize(s).and_then(|t| to_rpn(&t)).and_then(|r| from_rpn(&r));

        let n = MAX_PROFONDEUR - 1;
        let s = format!("{}1{}", "sqrt(".repeat(n), ")".repeat(n));
        assert!(construit(&s).is_ok());

        let n = MAX_PROFONDEUR;
        let s = format!("{}1{}", "sqrt(".repeat(n), ")".repeat(n));
        assert!(matches!(construit(&s), Err(ErreurEval::ExpressionInvalide(_))));

        // chaîne plate : l’arbre est profond à gauche
        let s = vec!["1"; MAX_PROFONDEUR + 1].join("+");
        assert!(matches!(construit(&s), Err(ErreurEval::ExpressionInvalide(_))));
    }
}
