// src/noyau/jetons.rs
//
// Tokenisation + substitution des glyphes d’affichage.
// Les symboles de la calculatrice (× ÷ − π e ^) sont ramenés ici
// à leurs jetons arithmétiques canoniques : plus de réécriture de texte.

use super::eval::ErreurEval;
use super::expr::Fonction;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Pi,
    E,

    // Toujours suivie d’une parenthèse ouvrante (vérifié par rpn.rs)
    Fonction(Fonction),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    // Moins unaire : jamais produit par tokenize(), seulement par to_rpn()
    Neg,

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .5, 5.) avec séparateurs de milliers (1,234.5)
/// - opérateurs + − × ÷ ^ (et leurs équivalents ASCII - * /)
/// - parenthèses ( )
/// - π (ou "pi") et e
/// - fonctions sin cos tan log ln sqrt
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurEval> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' | '−' => Some(Tok::Minus),
            '*' | '×' => Some(Tok::Star),
            '/' | '÷' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            'π' => Some(Tok::Pi),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Nombre : chiffres, un seul point, virgules de groupement dans la partie entière
        if c.is_ascii_digit() || c == '.' {
            let (valeur, suivant) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(valeur));
            i = suivant;
            continue;
        }

        // Mots : constantes + fonctions
        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();

            let t = match word.as_str() {
                "e" => Tok::E,
                "pi" => Tok::Pi,
                w => match Fonction::depuis_nom(w) {
                    Some(f) => Tok::Fonction(f),
                    None => return Err(ErreurEval::invalide(format!("jeton inconnu: '{w}'"))),
                },
            };
            out.push(t);
            continue;
        }

        return Err(ErreurEval::invalide(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

/// Lit un littéral à partir de `start`. Renvoie (valeur, index suivant).
///
/// Groupement accepté : celui produit par le formateur ("1,234,567.5"),
/// 1 à 3 chiffres en tête puis des groupes d’exactement 3 chiffres.
fn lire_nombre(chars: &[char], start: usize) -> Result<(f64, usize), ErreurEval> {
    let mut i = start;
    let mut texte = String::new();
    let mut point = false;
    let mut chiffres = false;
    let mut en_tete = 0usize;
    // chiffres lus depuis la dernière virgule (None : pas de groupement)
    let mut depuis_virgule: Option<usize> = None;

    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_digit() {
            texte.push(c);
            chiffres = true;
            if !point {
                match depuis_virgule.as_mut() {
                    Some(n) => *n += 1,
                    None => en_tete += 1,
                }
            }
        } else if c == '.' {
            if point {
                return Err(ErreurEval::invalide("deux points dans un nombre"));
            }
            verifier_groupe(depuis_virgule)?;
            point = true;
            texte.push(c);
        } else if c == ',' && chiffres && !point {
            let groupe_ok = match depuis_virgule {
                None => en_tete <= 3,
                Some(n) => n == 3,
            };
            if !groupe_ok {
                return Err(ErreurEval::invalide("groupement de milliers invalide"));
            }
            // la virgule doit précéder un chiffre
            match chars.get(i + 1) {
                Some(d) if d.is_ascii_digit() => {}
                _ => return Err(ErreurEval::invalide("virgule isolée")),
            }
            depuis_virgule = Some(0);
        } else {
            break;
        }
        i += 1;
    }

    if !chiffres {
        return Err(ErreurEval::invalide("point sans chiffre"));
    }
    if !point {
        verifier_groupe(depuis_virgule)?;
    }

    let valeur = texte
        .parse::<f64>()
        .map_err(|_| ErreurEval::invalide(format!("nombre invalide: '{texte}'")))?;
    Ok((valeur, i))
}

/// Le dernier groupe après une virgule compte exactement 3 chiffres.
fn verifier_groupe(depuis_virgule: Option<usize>) -> Result<(), ErreurEval> {
    match depuis_virgule {
        Some(n) if n != 3 => Err(ErreurEval::invalide("groupement de milliers invalide")),
        _ => Ok(()),
    }
}

/// Format utilitaire (traces) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(x) => format!("{x}"),
            Tok::Pi => "π".to_string(),
            Tok::E => "e".to_string(),
            Tok::Fonction(f) => f.nom().to_string(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
