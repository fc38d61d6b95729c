//! Built-in seasonal context used when no sector document yields content.

const JAN_FEB: &str = "Ciclos Durango: Preparación siembra maíz/frijol (feb-mar), mantenimiento avena/alfalfa/trigo (cultivos de frío otoño-invierno). Forestal: Protección árboles jóvenes contra heladas, mantenimiento viveros forestales. Ganadero: Alimentación suplementaria, protección ganado contra frío, mantenimiento cercas y corrales.";

const MAR_APR: &str = "Ciclos Durango: Siembra maíz/frijol activa, crecimiento avena/alfalfa/trigo, inicio manzana. Forestal: Siembra/reforestación activa, trasplante árboles, preparación viveros. Ganadero: Pastoreo primaveral, reparación cercas post-invierno, preparación agostaderos.";

const MAY_JUL: &str = "Ciclos Durango: Crecimiento maíz/frijol, cosecha avena/alfalfa, desarrollo manzana, inicio chile. Forestal: Crecimiento activo árboles, mantenimiento reforestaciones, control plagas forestales. Ganadero: Pastoreo intensivo, construcción/reparación cercas, protección sombra para ganado, preparación henificación.";

const AUG_SEP: &str = "Ciclos Durango: Cosecha manzana (ago-sep), desarrollo chile, preparación siembra otoño-invierno (avena, trigo, cultivos de frío). Forestal: Mantenimiento reforestaciones, preparación viveros otoño-invierno, protección contra incendios. Ganadero: Cosecha forraje, henificación, preparación alimentación invernal, mantenimiento infraestructura ganadera.";

const OCT_NOV: &str = "Ciclos Durango: Cosecha frijol (oct-nov), cosecha chile (oct-nov), siembra activa avena/trigo (cultivos de frío otoño-invierno), preparación protección frío. Forestal: Siembra otoño-invierno especies forestales, protección árboles contra heladas tempranas, mantenimiento viveros. Ganadero: Almacenamiento forraje, preparación protección ganado frío, reparación cercas y corrales, alimentación suplementaria inicio.";

const DEC: &str = "Ciclos Durango: Protección heladas crítica, mantenimiento invernal cultivos de frío (avena/trigo), preparación nuevo ciclo. Forestal: Protección árboles contra heladas, mantenimiento viveros invernal, planificación reforestación siguiente año. Ganadero: Protección ganado heladas crítica, alimentación suplementaria intensiva, mantenimiento cercas y refugios, preparación próximo ciclo.";

/// Fixed context for a month. Empty outside 1..=12.
pub fn fallback_context(month: u32) -> &'static str {
    match month {
        1 | 2 => JAN_FEB,
        3 | 4 => MAR_APR,
        5..=7 => MAY_JUL,
        8 | 9 => AUG_SEP,
        10 | 11 => OCT_NOV,
        12 => DEC,
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_share_text() {
        assert_eq!(fallback_context(1), fallback_context(2));
        assert_eq!(fallback_context(5), fallback_context(7));
        assert_ne!(fallback_context(7), fallback_context(8));
    }

    #[test]
    fn test_every_month_has_text() {
        for month in 1..=12 {
            assert!(fallback_context(month).starts_with("Ciclos Durango:"));
        }
    }

    #[test]
    fn test_out_of_range_is_empty() {
        assert_eq!(fallback_context(0), "");
        assert_eq!(fallback_context(13), "");
    }
}
