//! Day-of-week policy table.
//!
//! Each day maps to exactly one policy. The policy selects the rules block
//! shown to the model and the overrides applied to its answer.

use serde::{Deserialize, Serialize};

/// Editorial policy for one day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPolicy {
    /// Promotion day: a product search is always required
    Promotional,
    /// Teaching or informational content; search optional
    Educational,
    /// Search only when the topic names a concrete product
    Flexible,
}

/// Policy by English day name.
pub const DAY_POLICIES: [(&str, DayPolicy); 7] = [
    ("Monday", DayPolicy::Educational),
    ("Tuesday", DayPolicy::Promotional),
    ("Wednesday", DayPolicy::Educational),
    ("Thursday", DayPolicy::Flexible),
    ("Friday", DayPolicy::Flexible),
    ("Saturday", DayPolicy::Educational),
    ("Sunday", DayPolicy::Educational),
];

const PROMOTIONAL_RULES: &str = "💸 MARTES = DÍA DE PROMOCIONES:
- search_needed DEBE ser SIEMPRE true (OBLIGATORIO)
- DEBES especificar preferred_category (ej: riego, fertilizantes, mallasombra, herramientas, sustratos)
- DEBES proporcionar search_keywords para buscar productos
- El post debe enfocarse en promocionar o destacar productos

";

const EDUCATIONAL_RULES: &str = "📚 DÍA EDUCATIVO/INFORMATIVO:
- search_needed puede ser false
- Solo busca producto si el tema lo requiere naturalmente
- Enfoque en educar, informar, motivar o inspirar

";

const FLEXIBLE_RULES: &str = "🔧 DÍA FLEXIBLE:
- search_needed = true si el tema menciona productos específicos o soluciones con productos
- search_needed = false si es contenido educativo general sin producto específico

";

impl DayPolicy {
    /// Policy for a day name. Matching is exact; unknown names are flexible.
    pub fn for_day(day_name: &str) -> Self {
        DAY_POLICIES
            .iter()
            .find(|(name, _)| *name == day_name)
            .map(|(_, policy)| *policy)
            .unwrap_or(Self::Flexible)
    }

    /// Rules block inserted into the decision prompt.
    pub fn rules(&self) -> &'static str {
        match self {
            Self::Promotional => PROMOTIONAL_RULES,
            Self::Educational => EDUCATIONAL_RULES,
            Self::Flexible => FLEXIBLE_RULES,
        }
    }

    /// Whether the final strategy must request a product search.
    pub fn forces_search(&self) -> bool {
        matches!(self, Self::Promotional)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Promotional => "promotional",
            Self::Educational => "educational",
            Self::Flexible => "flexible",
        }
    }
}
