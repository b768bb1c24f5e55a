use once_cell::sync::Lazy;

/// Static profile of one of the ten Cameroonian regions.
#[derive(Debug, Clone)]
pub struct Region {
    pub name: &'static str,
    pub capital: &'static str,
    pub climate_description: &'static str,
    pub soil_types: &'static [&'static str],
    pub major_crops: &'static [&'static str],
    pub description: &'static str,
}

static CAMEROON_REGIONS: Lazy<Vec<Region>> = Lazy::new(|| {
    vec![
        Region {
            name: "Centre",
            capital: "Yaoundé",
            climate_description: "Climat équatorial de type guinéen, 4 saisons.",
            soil_types: &["Ferralitiques", "Argileux"],
            major_crops: &["Cacao", "Café", "Manioc", "Maïs", "Arachide", "Plantain"],
            description: "Zone de forêt dense et de savane périforestière. C'est le bassin agricole principal pour le cacao.",
        },
        Region {
            name: "Littoral",
            capital: "Douala",
            climate_description: "Climat équatorial de type camerounien, très humide.",
            soil_types: &["Sableux", "Volcaniques (fertile)"],
            major_crops: &["Banane", "Palmier à huile", "Hévéa", "Poivre", "Cacao"],
            description: "Zone côtière fertile, propice aux grandes plantations agro-industrielles.",
        },
        Region {
            name: "Ouest",
            capital: "Bafoussam",
            climate_description: "Climat tempéré d'altitude, frais et pluvieux.",
            soil_types: &["Volcaniques noirs (très fertiles)"],
            major_crops: &["Café Arabica", "Thé", "Maïs", "Haricot", "Pomme de terre", "Tomate"],
            description: "Le grenier du Cameroun grâce à ses sols volcaniques et son climat favorable.",
        },
        Region {
            name: "Nord-Ouest",
            capital: "Bamenda",
            climate_description: "Climat de montagne, frais.",
            soil_types: &["Volcaniques"],
            major_crops: &["Café Arabica", "Thé", "Pomme de terre", "Riz", "Maïs"],
            description: "Région montagneuse avec une forte activité agricole et pastorale.",
        },
        Region {
            name: "Sud-Ouest",
            capital: "Buea",
            climate_description: "Climat équatorial humide de mousson (proche Mont Cameroun).",
            soil_types: &["Volcaniques"],
            major_crops: &["Cacao", "Café", "Palmier à huile", "Banane", "Thé"],
            description: "Zone très fertile située au pied du Mont Cameroun.",
        },
        Region {
            name: "Sud",
            capital: "Ebolowa",
            climate_description: "Climat équatorial pur.",
            soil_types: &["Ferralitiques"],
            major_crops: &["Cacao", "Manioc", "Plantain", "Palmier à huile"],
            description: "Zone de forêt dense, agriculture vivrière et de rente (cacao).",
        },
        Region {
            name: "Est",
            capital: "Bertoua",
            climate_description: "Climat équatorial.",
            soil_types: &["Ferralitiques"],
            major_crops: &["Cacao", "Café", "Manioc", "Plantain", "Maïs"],
            description: "Vaste zone forestière, potentiel agricole immense mais enclavé.",
        },
        Region {
            name: "Adamaoua",
            capital: "Ngaoundéré",
            climate_description: "Climat tropical de savane d'altitude.",
            soil_types: &["Ferralitiques rouges"],
            major_crops: &["Maïs", "Igname", "Manioc", "Sorgho", "Millet"],
            description: "Le 'château d'eau' du Cameroun, zone de transition forêt-savane, grande zone d'élevage.",
        },
        Region {
            name: "Nord",
            capital: "Garoua",
            climate_description: "Climat tropical sec (Soudanien).",
            soil_types: &["Ferrugineux"],
            major_crops: &["Coton", "Arachide", "Sorgho", "Maïs", "Oignon"],
            description: "Zone de savane, culture principale du coton et des céréales sèches.",
        },
        Region {
            name: "Extrême-Nord",
            capital: "Maroua",
            climate_description: "Climat sahélien, chaud et sec.",
            soil_types: &["Sableux", "Argileux (Vertisols)"],
            major_crops: &["Coton", "Sorgho", "Millet", "Oignon", "Riz"],
            description: "Zone la plus septentrionale, agriculture adaptée à la sécheresse (mil, sorgho).",
        },
    ]
});

pub fn all_regions() -> &'static [Region] {
    &CAMEROON_REGIONS
}

pub fn region_by_name(name: &str) -> Option<&'static Region> {
    CAMEROON_REGIONS
        .iter()
        .find(|r| r.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_ten_regions_present() {
        assert_eq!(all_regions().len(), 10);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert!(region_by_name("centre").is_some());
        assert!(region_by_name("LITTORAL").is_some());
        assert_eq!(region_by_name("Ouest").unwrap().capital, "Bafoussam");
    }

    #[test]
    fn test_unknown_region_returns_none() {
        assert!(region_by_name("Atlantide").is_none());
    }
}
