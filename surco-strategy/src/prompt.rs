//! Decision prompt assembly.

use crate::policy::DayPolicy;
use std::fmt::Write;
use surco_core::{TopicStrategy, WeekdayTheme};

/// Recent channels listed in the prompt, most recent first.
pub const MAX_RECENT_CHANNELS: usize = 5;

const TASK_AND_FORMAT: &str = r#"TU TAREA:
1. Elige el TIPO DE POST que mejor comunique este tema
2. Selecciona el TONO apropiado para el día y tema
3. Elige un CANAL diferente al usado recientemente
4. Decide si necesitas buscar producto

TIPOS DE POST DISPONIBLES:
- Infografías, Memes/tips rápidos, Kits, Promoción puntual, Tutorial corto,
  Caso de éxito, Antes/Después, FAQ/Mitos, Pro Tip, Checklist operativo, etc.

TONOS DISPONIBLES:
- Motivational, Promotional, Technical, Educational, Problem-Solving,
  Seasonal, Humorous, Informative, Inspirational

CANALES DISPONIBLES:
- fb-post, ig-post, tiktok, wa-status, fb-reel, ig-reel, wa-broadcast

RESPONDE SOLO CON JSON (sin markdown):
{
  "post_type": "nombre exacto del tipo (ej: Infografías, Memes/tips rápidos)",
  "tone": "tono apropiado (ej: Educational, Motivational)",
  "channel": "canal diferente al reciente (ej: fb-post, tiktok)",
  "search_needed": true o false,
  "preferred_category": "categoría de producto si search_needed=true (ej: riego, fertilizantes), vacío si no",
  "search_keywords": "términos de búsqueda si search_needed=true (ej: sistema riego goteo), vacío si no"
}
"#;

/// Build the strategy decision prompt.
///
/// Deterministic: identical inputs always yield identical text. Only the
/// first [`MAX_RECENT_CHANNELS`] entries of `recent_channels` are listed.
pub fn build_prompt(
    topic: &TopicStrategy,
    theme: &WeekdayTheme,
    recent_channels: &[String],
) -> String {
    let mut prompt = String::with_capacity(2_400);

    // Writing to a String cannot fail.
    let _ = write!(
        prompt,
        "Decide la estrategia de contenido para este tema.\n\n\
         TEMA IDENTIFICADO: {}\n\
         PROBLEMA: {}\n\
         ÁNGULO: {}\n\
         AUDIENCIA: {}\n\n\
         PLAN SEMANAL:\n\
         Día: {}\n\
         Tema del día: {}\n\
         Tipos de post recomendados: {}\n\n",
        topic.topic,
        topic.problem_identified,
        topic.angle,
        topic.target_audience,
        theme.day_name,
        theme.theme,
        theme.recommended_post_types.join(", "),
    );

    if recent_channels.is_empty() {
        prompt.push_str("No hay canales recientes.\n\n");
    } else {
        prompt.push_str("CANALES USADOS RECIENTEMENTE:\n");
        for channel in recent_channels.iter().take(MAX_RECENT_CHANNELS) {
            let _ = writeln!(prompt, "- {}", channel);
        }
        prompt.push_str(
            "\n⚠️ Elige un canal DIFERENTE al usado ayer (varía entre fb-post, tiktok, wa-status, ig-reel, etc.)\n\n",
        );
    }

    prompt.push_str("REGLAS PARA ESTE DÍA:\n");
    prompt.push_str(DayPolicy::for_day(&theme.day_name).rules());
    prompt.push_str(TASK_AND_FORMAT);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic() -> TopicStrategy {
        TopicStrategy {
            topic: "Riego excesivo -> Hongos -> Goteo".to_string(),
            problem_identified: "Encharcamiento en plántulas".to_string(),
            angle: "riego".to_string(),
            urgency_level: "high".to_string(),
            target_audience: "plant".to_string(),
        }
    }

    fn theme(day: &str) -> WeekdayTheme {
        WeekdayTheme::new(
            day,
            "Promociones",
            vec!["Promoción puntual".to_string(), "Kits".to_string()],
        )
    }

    fn channels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("ch-{}", i)).collect()
    }

    #[test]
    fn test_header_fields_in_order() {
        let prompt = build_prompt(&topic(), &theme("Tuesday"), &[]);
        assert!(prompt.starts_with(
            "Decide la estrategia de contenido para este tema.\n\n\
             TEMA IDENTIFICADO: Riego excesivo -> Hongos -> Goteo\n\
             PROBLEMA: Encharcamiento en plántulas\n\
             ÁNGULO: riego\n\
             AUDIENCIA: plant\n\n\
             PLAN SEMANAL:\n\
             Día: Tuesday\n\
             Tema del día: Promociones\n\
             Tipos de post recomendados: Promoción puntual, Kits\n\n"
        ));
    }

    #[test]
    fn test_urgency_is_not_in_prompt() {
        let prompt = build_prompt(&topic(), &theme("Monday"), &[]);
        assert!(!prompt.contains("high"));
    }

    #[test]
    fn test_no_recent_channels() {
        let prompt = build_prompt(&topic(), &theme("Monday"), &[]);
        assert!(prompt.contains("No hay canales recientes.\n\nREGLAS PARA ESTE DÍA:\n"));
        assert!(!prompt.contains("CANALES USADOS RECIENTEMENTE"));
    }

    #[test]
    fn test_recent_channels_truncated_in_order() {
        let prompt = build_prompt(&topic(), &theme("Monday"), &channels(8));
        assert!(prompt.contains("CANALES USADOS RECIENTEMENTE:\n- ch-0\n- ch-1\n- ch-2\n- ch-3\n- ch-4\n\n⚠️"));
        assert!(!prompt.contains("- ch-5"));
    }

    #[test]
    fn test_rules_block_follows_day() {
        let tuesday = build_prompt(&topic(), &theme("Tuesday"), &[]);
        assert!(tuesday.contains("REGLAS PARA ESTE DÍA:\n💸 MARTES"));

        let saturday = build_prompt(&topic(), &theme("Saturday"), &[]);
        assert!(saturday.contains("REGLAS PARA ESTE DÍA:\n📚"));

        let friday = build_prompt(&topic(), &theme("Friday"), &[]);
        assert!(friday.contains("REGLAS PARA ESTE DÍA:\n🔧"));
    }

    #[test]
    fn test_prompt_ends_with_json_template() {
        let prompt = build_prompt(&topic(), &theme("Thursday"), &channels(1));
        assert!(prompt.contains("\n\nTU TAREA:\n"));
        assert!(prompt.ends_with("vacío si no\"\n}\n"));
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Prompt construction is a pure function of its inputs.
        #[test]
        fn prop_prompt_is_deterministic(
            day in prop::sample::select(vec!["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]),
            recent in prop::collection::vec("[a-z]{2,4}-[a-z]{4,6}", 0..10),
            title in "[A-Za-z ]{1,40}",
        ) {
            let topic = TopicStrategy {
                topic: title,
                problem_identified: "p".to_string(),
                angle: "a".to_string(),
                urgency_level: String::new(),
                target_audience: "general".to_string(),
            };
            let theme = WeekdayTheme::new(day, "t", vec!["Infografías".to_string()]);
            prop_assert_eq!(
                build_prompt(&topic, &theme, &recent),
                build_prompt(&topic, &theme, &recent)
            );

            let listed = build_prompt(&topic, &theme, &recent)
                .lines()
                .skip_while(|l| *l != "CANALES USADOS RECIENTEMENTE:")
                .skip(1)
                .take_while(|l| l.starts_with("- "))
                .count();
            prop_assert_eq!(listed, recent.len().min(MAX_RECENT_CHANNELS));
        }
    }
}
