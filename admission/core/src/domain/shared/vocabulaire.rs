// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Closed business vocabularies stored under their upper-case names.

/// Declares a closed enum whose variants serialize as the given names, with
/// `ALL`, `name()`, `from_name()` and `Display`.
#[macro_export]
macro_rules! vocabulaire {
    (
        $(#[$meta:meta])*
        $vis:vis enum $nom:ident {
            $( $(#[$vmeta:meta])* $variante:ident => $libelle:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $nom {
            $( $(#[$vmeta])* #[serde(rename = $libelle)] $variante ),+
        }

        impl $nom {
            pub const ALL: &'static [$nom] = &[ $( $nom::$variante ),+ ];

            pub fn name(&self) -> &'static str {
                match self {
                    $( $nom::$variante => $libelle ),+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.name() == name)
            }
        }

        impl std::fmt::Display for $nom {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    vocabulaire! {
        enum Couleur {
            Rouge => "ROUGE",
            BleuCiel => "BLEU_CIEL",
        }
    }

    #[test]
    fn test_names_and_serde_agree() {
        assert_eq!(Couleur::BleuCiel.name(), "BLEU_CIEL");
        assert_eq!(Couleur::from_name("ROUGE"), Some(Couleur::Rouge));
        assert_eq!(serde_json::to_string(&Couleur::BleuCiel).unwrap(), "\"BLEU_CIEL\"");
        assert_eq!(Couleur::ALL.len(), 2);
    }
}
