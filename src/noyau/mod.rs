//! Noyau calculatrice (f64)
//!
//! Organisation interne :
//! - jetons.rs    : tokenisation + substitution des glyphes (× ÷ − π e ^)
//! - rpn.rs       : shunting-yard + construction Expr
//! - expr.rs      : AST + fonctions scientifiques + réduction
//! - eval.rs      : pipeline complet + erreurs typées
//! - format.rs    : arrondi 8 décimales + groupement des milliers
//! - clavier.rs   : vocabulaire d’entrée (boutons + clavier)
//! - minuterie.rs : échéance annulable (effacement de "Error")
//! - editeur.rs   : tampon + machine d’états

pub mod clavier;
pub mod editeur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod minuterie;
pub mod rpn;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use clavier::{depuis_touche, Entree, Touche};
pub use editeur::{Calcul, Editeur, EtatTampon};
