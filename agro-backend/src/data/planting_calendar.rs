/// Simplified planting window for one crop in one region.
#[derive(Debug, Clone)]
pub struct PlantingWindow {
    pub region: &'static str,
    pub crop: &'static str,
    pub start: &'static str,
    pub end: &'static str,
    pub notes: &'static str,
}

/// Region "default" collects windows that apply country-wide when a region
/// has no entry of its own.
static PLANTING_CALENDAR: &[PlantingWindow] = &[
    PlantingWindow { region: "Centre", crop: "Cacao", start: "Mars", end: "Juin", notes: "Petite campagne de Mars à Juin. Grande campagne en Août." },
    PlantingWindow { region: "Centre", crop: "Maïs", start: "Mars", end: "Avril", notes: "Première campagne (Mars-Juin). Deuxième campagne (Août-Novembre)." },
    PlantingWindow { region: "Centre", crop: "Arachide", start: "Mars", end: "Avril", notes: "Semis en début de saison des pluies." },
    PlantingWindow { region: "Centre", crop: "Manioc", start: "Mars", end: "Novembre", notes: "Peut être planté presque toute l'année, préférence début saison pluies." },
    PlantingWindow { region: "Littoral", crop: "Banane", start: "Janvier", end: "Décembre", notes: "Toute l'année si irrigation, sinon début pluies." },
    PlantingWindow { region: "Littoral", crop: "Macabo", start: "Mars", end: "Avril", notes: "Début de la grande saison des pluies." },
    PlantingWindow { region: "Ouest", crop: "Haricot", start: "Mars", end: "Avril", notes: "Première campagne." },
    PlantingWindow { region: "Ouest", crop: "Pomme de terre", start: "Mars", end: "Avril", notes: "Demande beaucoup d'eau mais pas d'excès." },
    PlantingWindow { region: "Ouest", crop: "Maïs", start: "Février", end: "Mars", notes: "Semis précoce possible." },
    PlantingWindow { region: "Nord", crop: "Coton", start: "Mai", end: "Juin", notes: "Début strict de la saison des pluies." },
    PlantingWindow { region: "Nord", crop: "Sorgho", start: "Mai", end: "Juin", notes: "Après les premières pluies utiles." },
    PlantingWindow { region: "Nord", crop: "Arachide", start: "Mai", end: "Juin", notes: "Cycle court recommandé." },
    PlantingWindow { region: "default", crop: "Tomate", start: "Septembre", end: "Octobre", notes: "Contre-saison souvent préférée pour éviter trop de maladies." },
    PlantingWindow { region: "default", crop: "Piment", start: "Mars", end: "Mai", notes: "" },
];

/// All windows that apply to a region, country-wide defaults included. Gives
/// the crop agent its calendar context.
pub fn windows_for_region(region: &str) -> Vec<&'static PlantingWindow> {
    PLANTING_CALENDAR
        .iter()
        .filter(|w| w.region.eq_ignore_ascii_case(region) || w.region == "default")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_windows_include_defaults() {
        let windows = windows_for_region("Nord");
        assert!(windows.iter().any(|w| w.crop == "Coton"));
        // Tomate has no Nord entry; the country-wide window applies.
        assert!(windows.iter().any(|w| w.crop == "Tomate"));
    }

    #[test]
    fn test_unknown_region_still_gets_defaults() {
        let windows = windows_for_region("Atlantide");
        assert!(windows.iter().all(|w| w.region == "default"));
        assert!(!windows.is_empty());
    }

    #[test]
    fn test_centre_has_the_four_staple_windows() {
        let windows = windows_for_region("Centre");
        for crop in ["Cacao", "Maïs", "Arachide", "Manioc"] {
            assert!(windows.iter().any(|w| w.crop == crop), "missing {}", crop);
        }
    }
}
