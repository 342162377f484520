// src/noyau/clavier.rs
//
// Vocabulaire d’entrée commun au clavier et aux boutons.
// L’adaptateur UI traduit un événement en `Entree`, l’éditeur ne voit que ça :
// même sémantique quel que soit le chemin (clic, tactile, touche).

/// Touches "fonction" (pavé scientifique + parenthèses + % + x²).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Touche {
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Sqrt,
    Puissance,
    Pi,
    E,
    ParenOuvrante,
    ParenFermante,
    Pourcentage,
    Carre,
}

impl Touche {
    /// Nom du bouton (identifiant stable, pas forcément le texte inséré).
    pub fn nom(self) -> &'static str {
        match self {
            Touche::Sin => "sin",
            Touche::Cos => "cos",
            Touche::Tan => "tan",
            Touche::Log => "log",
            Touche::Ln => "ln",
            Touche::Sqrt => "sqrt",
            Touche::Puissance => "pow",
            Touche::Pi => "pi",
            Touche::E => "e",
            Touche::ParenOuvrante => "(",
            Touche::ParenFermante => ")",
            Touche::Pourcentage => "percent",
            Touche::Carre => "square",
        }
    }

    pub fn depuis_nom(nom: &str) -> Option<Self> {
        let t = match nom {
            "sin" => Touche::Sin,
            "cos" => Touche::Cos,
            "tan" => Touche::Tan,
            "log" => Touche::Log,
            "ln" => Touche::Ln,
            "sqrt" => Touche::Sqrt,
            "pow" => Touche::Puissance,
            "pi" => Touche::Pi,
            "e" => Touche::E,
            "(" => Touche::ParenOuvrante,
            ")" => Touche::ParenFermante,
            "percent" => Touche::Pourcentage,
            "square" => Touche::Carre,
            _ => return None,
        };
        Some(t)
    }

    /// Texte ajouté au tampon. None pour % (micro-validation, n’ajoute rien).
    pub fn texte(self) -> Option<&'static str> {
        let s = match self {
            Touche::Sin => "sin(",
            Touche::Cos => "cos(",
            Touche::Tan => "tan(",
            Touche::Log => "log(",
            Touche::Ln => "ln(",
            Touche::Sqrt => "sqrt(",
            Touche::Puissance => "^(",
            Touche::Pi => "π",
            Touche::E => "e",
            Touche::ParenOuvrante => "(",
            Touche::ParenFermante => ")",
            Touche::Carre => "^2",
            Touche::Pourcentage => return None,
        };
        Some(s)
    }

    /// Libellé affiché sur le bouton.
    pub fn libelle(self) -> &'static str {
        match self {
            Touche::Sqrt => "√",
            Touche::Puissance => "xʸ",
            Touche::Pi => "π",
            Touche::Pourcentage => "%",
            Touche::Carre => "x²",
            autre => autre.nom(),
        }
    }
}

/// Primitive d’édition (ce que l’UI envoie à l’éditeur).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entree {
    Chiffre(char),
    Operateur(char),
    Fonction(Touche),
    RetourArriere,
    Effacer,
    Valider,
}

/// Traduit une touche clavier (texte saisi ou nom de touche) en primitive.
///
/// Équivalences : `-`→`−`, `*`→`×`, `/`→`÷`, Enter/`=`→valider,
/// Backspace→retour arrière, Escape→effacer. Les noms de boutons
/// ("sin", "pi", "e", "percent"...) donnent la touche fonction correspondante.
pub fn depuis_touche(touche: &str) -> Option<Entree> {
    let e = match touche {
        "Enter" | "=" => Entree::Valider,
        "Backspace" => Entree::RetourArriere,
        "Escape" => Entree::Effacer,

        "+" => Entree::Operateur('+'),
        "-" | "−" => Entree::Operateur('−'),
        "*" | "×" => Entree::Operateur('×'),
        "/" | "÷" => Entree::Operateur('÷'),

        "(" => Entree::Fonction(Touche::ParenOuvrante),
        ")" => Entree::Fonction(Touche::ParenFermante),
        "^" => Entree::Fonction(Touche::Puissance),
        "%" => Entree::Fonction(Touche::Pourcentage),

        s => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_digit() || c == '.' => Entree::Chiffre(c),
                // noms de boutons : "sin", "pi", "e", "square"...
                _ => return Touche::depuis_nom(s).map(Entree::Fonction),
            }
        }
    };
    Some(e)
}
