//! Weekly content calendar and special dates.

use crate::{ProductStrategy, WeekdayTheme};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

// ============================================================================
// PRODUCER SEGMENTS
// ============================================================================

/// Audience segment that Saturday rotates through, one per ISO week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProducerSegment {
    Forestry,
    Plant,
    Animal,
}

impl ProducerSegment {
    const ROTATION: [ProducerSegment; 3] = [Self::Forestry, Self::Plant, Self::Animal];

    /// Segment for an ISO week number.
    pub fn for_week(week: u32) -> Self {
        Self::ROTATION[(week % 3) as usize]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forestry => "forestry",
            Self::Plant => "plant",
            Self::Animal => "animal",
        }
    }
}

// ============================================================================
// THEME TABLE
// ============================================================================

struct ThemeTemplate {
    day_name: &'static str,
    theme: &'static str,
    content_type: &'static str,
    primary_tone: &'static str,
    alternative_tones: &'static [&'static str],
    recommended_post_types: &'static [&'static str],
    product_strategy: ProductStrategy,
    rotates_segment: bool,
}

impl ThemeTemplate {
    fn to_theme(&self) -> WeekdayTheme {
        WeekdayTheme {
            day_name: self.day_name.to_string(),
            theme: self.theme.to_string(),
            recommended_post_types: owned(self.recommended_post_types),
            content_type: self.content_type.to_string(),
            primary_tone: self.primary_tone.to_string(),
            alternative_tones: owned(self.alternative_tones),
            product_strategy: self.product_strategy,
            sector_rotation: None,
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

const THEMES: [ThemeTemplate; 7] = [
    ThemeTemplate {
        day_name: "Monday",
        theme: "✊ Motivational / Inspirational",
        content_type: "Inspiring quote or message for agriculture/forestry producers",
        primary_tone: "Motivational",
        alternative_tones: &["Inspirational", "Encouraging", "Humorous"],
        recommended_post_types: &[
            "Motivational Phrase or Quote of the Week",
            "Memes/tips rápidos",
            "Image / Photo of the Week",
        ],
        product_strategy: ProductStrategy::EducationalOnly,
        rotates_segment: false,
    },
    ThemeTemplate {
        day_name: "Tuesday",
        theme: "💸 Promotion / Deals",
        content_type: "Highlight a product with a special price, bundle, or seasonal offer",
        primary_tone: "Promotional",
        alternative_tones: &["Sales-focused", "Urgent", "Humorous"],
        recommended_post_types: &[
            "Promoción puntual",
            "Kits",
            "\"Lo que llegó hoy\"",
            "Cómo pedir / logística",
            "Recordatorio de servicio",
        ],
        product_strategy: ProductStrategy::Required,
        rotates_segment: false,
    },
    ThemeTemplate {
        day_name: "Wednesday",
        theme: "📚 Educational / Tips",
        content_type: "Tips, guides, how-tos, or educational content for farmers",
        primary_tone: "Educational",
        alternative_tones: &["Technical", "Informative", "Humorous"],
        recommended_post_types: &[
            "Infografías de producto o tema",
            "Tutorial corto",
            "Pro Tip",
            "Interesting Fact",
            "Article",
            "Sabías que...",
        ],
        product_strategy: ProductStrategy::EducationalOnly,
        rotates_segment: false,
    },
    ThemeTemplate {
        day_name: "Thursday",
        theme: "🛠️ Problem & Solution",
        content_type: "Infographic showing how one of your products solves a real problem",
        primary_tone: "Problem-Solving",
        alternative_tones: &["Technical", "Solution-focused", "Educational"],
        recommended_post_types: &["Infografías", "Caso de éxito", "Antes / Después"],
        product_strategy: ProductStrategy::Flexible,
        rotates_segment: false,
    },
    ThemeTemplate {
        day_name: "Friday",
        theme: "📅 Seasonal Focus",
        content_type: "Advice or alerts based on regional crop/livestock/forestry seasons",
        primary_tone: "Seasonal",
        alternative_tones: &["Educational", "Informative", "Technical"],
        recommended_post_types: &[
            "Infografías",
            "Tutorial corto",
            "Checklist operativo",
            "Recordatorio de servicio",
            "Seasonal weather tips: what to expect & how to act",
        ],
        product_strategy: ProductStrategy::Flexible,
        rotates_segment: false,
    },
    ThemeTemplate {
        day_name: "Saturday",
        theme: "👩‍🌾 Producer Segment Focus",
        content_type: "Rotate content for: forestry 🌲, plant 🌾, animal 🐄 producers",
        primary_tone: "Educational",
        alternative_tones: &["Technical", "Practical", "Humorous"],
        recommended_post_types: &[
            "Infografías",
            "FAQ / Mitos",
            "Pro Tip",
            "Interesting Fact",
            "Tutorial corto",
            "Recordatorio de servicio",
        ],
        product_strategy: ProductStrategy::EducationalOnly,
        rotates_segment: true,
    },
    ThemeTemplate {
        day_name: "Sunday",
        theme: "📊 Innovation / Industry Reports",
        content_type: "Industry news, agri-innovation, or trending novelty in agriculture",
        primary_tone: "Informative",
        alternative_tones: &["Technical", "Educational", "Humorous"],
        recommended_post_types: &[
            "Industry novelty",
            "Trivia agrotech-style post",
            "Statistics or report highlights relevant to audience",
        ],
        product_strategy: ProductStrategy::EducationalOnly,
        rotates_segment: false,
    },
];

/// All seven themes, Monday first.
pub fn weekday_themes() -> Vec<WeekdayTheme> {
    THEMES.iter().map(ThemeTemplate::to_theme).collect()
}

/// Theme for an English day name ("Monday".."Sunday"). Segment rotation is
/// left unresolved because it depends on the week.
pub fn theme_for_day(day_name: &str) -> Option<WeekdayTheme> {
    THEMES
        .iter()
        .find(|t| t.day_name == day_name)
        .map(ThemeTemplate::to_theme)
}

/// Theme for a calendar date, with Saturday's producer segment resolved from
/// the ISO week number.
pub fn theme_for_date(date: NaiveDate) -> WeekdayTheme {
    let template = &THEMES[date.weekday().num_days_from_monday() as usize];
    let mut theme = template.to_theme();
    if template.rotates_segment {
        theme.sector_rotation = Some(ProducerSegment::for_week(date.iso_week().week()));
    }
    theme
}

// ============================================================================
// SPECIAL DATES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialDateKind {
    Holiday,
    Social,
    Agricultural,
}

/// A date that overrides the regular weekly plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialDate {
    pub name: String,
    pub kind: SpecialDateKind,
    pub recommended_post_type: String,
}

const SPECIAL_DATES: &[(u32, u32, &str, SpecialDateKind)] = &[
    (1, 1, "Año Nuevo", SpecialDateKind::Holiday),
    (2, 5, "Día de la Constitución", SpecialDateKind::Holiday),
    (3, 21, "Natalicio de Benito Juárez", SpecialDateKind::Holiday),
    (5, 10, "Día de las Madres", SpecialDateKind::Social),
    (5, 15, "Día del Maestro", SpecialDateKind::Social),
    (9, 16, "Día de la Independencia", SpecialDateKind::Holiday),
    (11, 2, "Día de Muertos", SpecialDateKind::Holiday),
    (12, 25, "Navidad", SpecialDateKind::Holiday),
    (3, 22, "Día Mundial del Agua", SpecialDateKind::Agricultural),
    (4, 22, "Día de la Tierra", SpecialDateKind::Agricultural),
    (4, 15, "Día del Agrónomo (Mexico)", SpecialDateKind::Agricultural),
    (6, 5, "Día Mundial del Medio Ambiente", SpecialDateKind::Agricultural),
    (10, 16, "Día Mundial de la Alimentación", SpecialDateKind::Agricultural),
];

const SPECIAL_DATE_POST_TYPE: &str = "Fechas importantes";

/// Look up a special date. Father's Day is the third Sunday of June.
pub fn special_date(date: NaiveDate) -> Option<SpecialDate> {
    let (month, day) = (date.month(), date.day());

    if let Some((_, _, name, kind)) = SPECIAL_DATES
        .iter()
        .find(|(m, d, _, _)| *m == month && *d == day)
    {
        return Some(SpecialDate {
            name: name.to_string(),
            kind: *kind,
            recommended_post_type: SPECIAL_DATE_POST_TYPE.to_string(),
        });
    }

    if month == 6 && date.weekday() == Weekday::Sun && (day - 1) / 7 + 1 == 3 {
        return Some(SpecialDate {
            name: "Día del Padre".to_string(),
            kind: SpecialDateKind::Social,
            recommended_post_type: SPECIAL_DATE_POST_TYPE.to_string(),
        });
    }

    None
}
