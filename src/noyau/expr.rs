// src/noyau/expr.rs
//
// AST flottant (f64, IEEE-754).
// - Nombre : littéral ou constante déjà substituée (π, e)
// - Neg    : moins unaire
// - Appel  : fonction scientifique (radians pour la trigo)
//
// IMPORTANT :
// - valeur() ne filtre rien : NaN / ±∞ remontent tels quels,
//   c’est eval.rs qui décide (NonFini) sur la valeur FINALE.

use std::fmt;

/// Fonctions scientifiques reconnues (toutes unaires, écrites `nom(`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Sqrt,
}

impl Fonction {
    pub const TOUTES: [Fonction; 6] = [
        Fonction::Sin,
        Fonction::Cos,
        Fonction::Tan,
        Fonction::Log,
        Fonction::Ln,
        Fonction::Sqrt,
    ];

    /// Nom tel qu’il apparaît dans l’expression (sans la parenthèse).
    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Log => "log",
            Fonction::Ln => "ln",
            Fonction::Sqrt => "sqrt",
        }
    }

    pub fn depuis_nom(nom: &str) -> Option<Self> {
        Self::TOUTES.into_iter().find(|f| f.nom() == nom)
    }

    /// sin/cos/tan en radians, log = base 10, ln = base e.
    pub fn appliquer(self, x: f64) -> f64 {
        match self {
            Fonction::Sin => x.sin(),
            Fonction::Cos => x.cos(),
            Fonction::Tan => x.tan(),
            Fonction::Log => x.log10(),
            Fonction::Ln => x.ln(),
            Fonction::Sqrt => x.sqrt(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),

    Neg(Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),

    Appel(Fonction, Box<Expr>),
}

impl Expr {
    /// Réduction récursive de l’arbre.
    pub fn valeur(&self) -> f64 {
        use Expr::*;

        match self {
            Nombre(x) => *x,
            Neg(x) => -x.valeur(),
            Add(a, b) => a.valeur() + b.valeur(),
            Sub(a, b) => a.valeur() - b.valeur(),
            Mul(a, b) => a.valeur() * b.valeur(),
            Div(a, b) => a.valeur() / b.valeur(),
            Pow(a, b) => a.valeur().powf(b.valeur()),
            Appel(f, x) => f.appliquer(x.valeur()),
        }
    }
}

/// Forme entièrement parenthésée (traces de debug).
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;

        match self {
            Nombre(x) => write!(f, "{x}"),
            Neg(x) => write!(f, "(-{x})"),
            Add(a, b) => write!(f, "({a}+{b})"),
            Sub(a, b) => write!(f, "({a}-{b})"),
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
            Pow(a, b) => write!(f, "({a}^{b})"),
            Appel(func, x) => write!(f, "{}({x})", func.nom()),
        }
    }
}
