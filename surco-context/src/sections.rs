//! Line-oriented section extraction over markdown-like documents.
//!
//! A section opens at a heading line (any line containing `##`) whose
//! lowercased text contains one of the rule's keywords. It runs until a
//! boundary heading that does not itself open the section.

/// Which heading lines close an open section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Any line starting with `##`, including `###` and deeper
    AnyHeading,
    /// Only `##` headings, not `###` and deeper
    TopLevelHeading,
}

impl Boundary {
    fn closes(&self, line: &str) -> bool {
        match self {
            Self::AnyHeading => line.starts_with("##"),
            Self::TopLevelHeading => line.starts_with("##") && !line.starts_with("###"),
        }
    }
}

/// Which lines inside an open section are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFilter {
    All,
    NonBlank,
    /// Non-blank lines that are headings, list items or `key: value` pairs
    Structured,
}

impl LineFilter {
    fn keeps(&self, line: &str) -> bool {
        match self {
            Self::All => true,
            Self::NonBlank => !line.trim().is_empty(),
            Self::Structured => {
                !line.trim().is_empty()
                    && (line.starts_with('#') || line.starts_with('-') || line.contains(':'))
            }
        }
    }
}

/// How to locate and collect one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionRule<'a> {
    /// Lowercase keywords; a heading containing any of them opens the section
    pub keywords: &'a [&'a str],
    pub boundary: Boundary,
    /// Whether opening headings are part of the output
    pub keep_opening: bool,
    pub filter: LineFilter,
    pub max_lines: Option<usize>,
}

impl SectionRule<'_> {
    fn opens(&self, line: &str) -> bool {
        if !line.contains("##") {
            return false;
        }
        let lower = line.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k))
    }

    /// Collect the first section matching this rule.
    pub fn extract<'d>(&self, document: &'d str) -> Vec<&'d str> {
        let mut collected = Vec::new();
        let mut inside = false;

        for line in document.lines() {
            if self.opens(line) {
                inside = true;
                if self.keep_opening {
                    collected.push(line);
                }
            } else if inside {
                if self.boundary.closes(line) {
                    break;
                }
                if self.filter.keeps(line) {
                    collected.push(line);
                }
            }

            if self.max_lines.is_some_and(|max| collected.len() >= max) {
                break;
            }
        }

        if let Some(max) = self.max_lines {
            collected.truncate(max);
        }
        collected
    }
}

// ============================================================================
// SEASONAL RULES
// ============================================================================

/// Statistics headings excerpted for sectors that carry them.
pub const STATS_KEYWORDS: &[&str] = &[
    "posicionamiento nacional",
    "estadísticas",
    "ranking",
    "producción total",
    "valor de producción",
];

pub const STATS_MAX_LINES: usize = 15;
pub const CYCLES_MAX_LINES: usize = 20;

/// Shown when a document has neither a month section nor a cycles section.
pub const GENERIC_SECTOR_PLACEHOLDER: &str = "Información general del sector disponible.";

/// Month-name tokens for a month number. Empty outside 1..=12.
pub fn month_tokens(month: u32) -> &'static [&'static str] {
    match month {
        1 | 2 => &["enero", "febrero"],
        3 | 4 => &["marzo", "abril"],
        5..=7 => &["mayo", "junio", "julio"],
        8 | 9 => &["agosto", "septiembre"],
        10 | 11 => &["octubre", "noviembre"],
        12 => &["diciembre"],
        _ => &[],
    }
}

fn month_rule(tokens: &'static [&'static str]) -> SectionRule<'static> {
    SectionRule {
        keywords: tokens,
        boundary: Boundary::AnyHeading,
        keep_opening: true,
        filter: LineFilter::All,
        max_lines: None,
    }
}

const STATS_RULE: SectionRule<'static> = SectionRule {
    keywords: STATS_KEYWORDS,
    boundary: Boundary::TopLevelHeading,
    keep_opening: true,
    filter: LineFilter::Structured,
    max_lines: Some(STATS_MAX_LINES),
};

const CYCLES_RULE: SectionRule<'static> = SectionRule {
    keywords: &["ciclos"],
    boundary: Boundary::AnyHeading,
    keep_opening: false,
    filter: LineFilter::NonBlank,
    max_lines: Some(CYCLES_MAX_LINES),
};

/// Statistics excerpt, or an empty string when the document has none.
pub fn stats_excerpt(document: &str) -> String {
    STATS_RULE.extract(document).join("\n")
}

/// Generic cycles excerpt, or the placeholder when the document has none.
pub fn cycles_excerpt(document: &str) -> String {
    let lines = CYCLES_RULE.extract(document);
    if lines.is_empty() {
        GENERIC_SECTOR_PLACEHOLDER.to_string()
    } else {
        lines.join("\n")
    }
}

/// The section for `month`, falling back to the cycles excerpt.
///
/// Returns an empty string for months outside 1..=12.
pub fn month_excerpt(document: &str, month: u32) -> String {
    let tokens = month_tokens(month);
    if tokens.is_empty() {
        return String::new();
    }

    let lines = month_rule(tokens).extract(document);
    if lines.is_empty() {
        cycles_excerpt(document)
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
# Agricultura Durango

## Posicionamiento Nacional
- Primer lugar en frijol
Producción: 300 mil toneladas
texto libre sin formato
### Ranking estatal
- Segundo lugar en avena

## Ciclos por Mes

### Enero-Febrero
Preparación de siembra.

### Marzo-Abril
Siembra de maíz y frijol.
- Riego de auxilio

### Mayo-Junio-Julio
Crecimiento de cultivos.

## Plagas
Gusano cogollero.
";

    #[test]
    fn test_month_tokens_groups() {
        assert_eq!(month_tokens(1), month_tokens(2));
        assert_eq!(month_tokens(6), &["mayo", "junio", "julio"]);
        assert_eq!(month_tokens(12), &["diciembre"]);
        assert!(month_tokens(0).is_empty());
        assert!(month_tokens(13).is_empty());
    }

    #[test]
    fn test_month_section_stops_at_next_heading() {
        let excerpt = month_excerpt(DOC, 4);
        assert_eq!(
            excerpt,
            "### Marzo-Abril\nSiembra de maíz y frijol.\n- Riego de auxilio\n"
        );
    }

    #[test]
    fn test_month_section_continues_across_matching_headings() {
        let doc = "## Enero\nuno\n### Febrero\ndos\n## Marzo\ntres\n";
        assert_eq!(month_excerpt(doc, 1), "## Enero\nuno\n### Febrero\ndos");
    }

    #[test]
    fn test_month_section_falls_back_to_cycles() {
        let doc = "## Ciclos Productivos\nPrimavera-verano\n\nOtoño-invierno\n## Otros\nnada\n";
        assert_eq!(month_excerpt(doc, 12), "Primavera-verano\nOtoño-invierno");
    }

    #[test]
    fn test_month_section_falls_back_to_placeholder() {
        let doc = "# Sin secciones\nTexto.\n";
        assert_eq!(month_excerpt(doc, 8), GENERIC_SECTOR_PLACEHOLDER);
    }

    #[test]
    fn test_month_excerpt_invalid_month_is_empty() {
        assert_eq!(month_excerpt(DOC, 13), "");
    }

    #[test]
    fn test_month_heading_match_is_case_insensitive() {
        let doc = "### DICIEMBRE\nheladas\n";
        assert_eq!(month_excerpt(doc, 12), "### DICIEMBRE\nheladas");
    }

    #[test]
    fn test_plain_line_with_month_name_does_not_open() {
        let doc = "En enero hace frío\n## Ciclos\nciclo anual\n";
        assert_eq!(month_excerpt(doc, 1), "ciclo anual");
    }

    #[test]
    fn test_stats_excerpt_keeps_structured_lines_and_subsections() {
        let stats = stats_excerpt(DOC);
        assert_eq!(
            stats,
            "## Posicionamiento Nacional\n- Primer lugar en frijol\nProducción: 300 mil toneladas\n### Ranking estatal\n- Segundo lugar en avena"
        );
    }

    #[test]
    fn test_stats_excerpt_capped() {
        let mut doc = String::from("## Estadísticas\n");
        for i in 0..40 {
            doc.push_str(&format!("- dato {}\n", i));
        }
        let stats = stats_excerpt(&doc);
        assert_eq!(stats.lines().count(), STATS_MAX_LINES);
        assert!(stats.starts_with("## Estadísticas"));
    }

    #[test]
    fn test_stats_excerpt_absent() {
        assert_eq!(stats_excerpt("## Plagas\n- gusano\n"), "");
    }

    #[test]
    fn test_cycles_excerpt_capped() {
        let mut doc = String::from("## Ciclos\n");
        for i in 0..30 {
            doc.push_str(&format!("línea {}\n", i));
        }
        assert_eq!(cycles_excerpt(&doc).lines().count(), CYCLES_MAX_LINES);
    }

    #[test]
    fn test_top_level_boundary_ignores_subheadings() {
        let rule = SectionRule {
            keywords: &["resumen"],
            boundary: Boundary::TopLevelHeading,
            keep_opening: false,
            filter: LineFilter::All,
            max_lines: None,
        };
        let doc = "## Resumen\na\n### Detalle\nb\n## Fin\nc\n";
        assert_eq!(rule.extract(doc), vec!["a", "### Detalle", "b"]);
    }
}

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
