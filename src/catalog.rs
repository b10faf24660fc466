//! Fixed ingredient catalog. Categories only group items for display; they
//! never reach the prompt.

#[derive(Debug, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub icon: &'static str,
    pub items: &'static [&'static str],
}

pub const CUSTOM_CATEGORY_NAME: &str = "Dodatkowe";
pub const CUSTOM_CATEGORY_ICON: &str = "➕";

pub const CATALOG: &[Category] = &[
    Category {
        name: "Przyprawy i dodatki smakowe",
        icon: "🌶️",
        items: &[
            "Sól",
            "Pieprz czarny",
            "Czosnek granulowany",
            "Papryka słodka",
            "Papryka ostra",
            "Oregano",
            "Bazylia",
            "Curry",
            "Kminek",
            "Tymianek",
            "Liść laurowy",
            "Ziele angielskie",
            "Imbir mielony",
            "Sos sojowy",
        ],
    },
    Category {
        name: "Produkty zbożowe i mączne",
        icon: "🌾",
        items: &[
            "Makaron",
            "Ryż biały",
            "Kasza gryczana",
            "Kasza jaglana",
            "Mąka pszenna",
            "Mąka żytnia",
            "Płatki owsiane",
            "Płatki kukurydziane",
            "Bułka tarta",
            "Chleb",
            "Tortilla pszenna",
            "Kuskus",
            "Quinoa",
        ],
    },
    Category {
        name: "Produkty białkowe",
        icon: "🍗",
        items: &[
            "Jajka",
            "Filet z kurczaka",
            "Mięso mielone",
            "Tuńczyk w puszce",
            "Soczewica czerwona",
            "Soczewica zielona",
            "Ciecierzyca",
            "Fasola czerwona",
            "Fasola biała",
            "Groszek zielony",
            "Tofu",
            "Tempeh",
            "Parówki",
            "Ser biały (twaróg)",
        ],
    },
    Category {
        name: "Produkty mleczne i zamienniki",
        icon: "🥛",
        items: &[
            "Mleko",
            "Mleko roślinne (np. owsiane)",
            "Masło",
            "Margaryna",
            "Jogurt naturalny",
            "Ser żółty",
            "Ser feta",
            "Śmietana",
            "Maślanka",
            "Serek wiejski",
            "Kefir",
        ],
    },
    Category {
        name: "Warzywa",
        icon: "🥕",
        items: &[
            "Ziemniaki",
            "Marchewka",
            "Cebula",
            "Czosnek świeży",
            "Kapusta",
            "Ogórek",
            "Papryka",
            "Pomidory świeże",
            "Pomidory w puszce",
            "Cukinia",
            "Brokuł",
            "Kalafior",
            "Sałata",
            "Por",
        ],
    },
    Category {
        name: "Owoce",
        icon: "🍎",
        items: &[
            "Jabłko",
            "Banan",
            "Cytryna",
            "Gruszka",
            "Śliwka",
            "Truskawki",
            "Maliny",
            "Winogrona",
            "Ananas w puszce",
            "Brzoskwinia",
            "Awokado",
        ],
    },
    Category {
        name: "Tłuszcze i oleje",
        icon: "🫒",
        items: &[
            "Olej rzepakowy",
            "Oliwa z oliwek",
            "Olej kokosowy",
            "Masło klarowane",
            "Smalec",
            "Olej lniany",
            "Olej słonecznikowy",
        ],
    },
    Category {
        name: "Dodatki słodzące i konserwujące",
        icon: "🍯",
        items: &[
            "Cukier biały",
            "Cukier trzcinowy",
            "Miód",
            "Syrop klonowy",
            "Ocet spirytusowy",
            "Ocet jabłkowy",
            "Sól peklująca",
            "Dżem",
            "Musztarda",
            "Ketchup",
        ],
    },
];

pub fn find_category(name: &str) -> Option<&'static Category> {
    let wanted = name.trim().to_lowercase();
    CATALOG.iter().find(|c| c.name.to_lowercase() == wanted)
}

pub fn category_of(ingredient: &str) -> Option<&'static Category> {
    let wanted = ingredient.trim().to_lowercase();
    CATALOG
        .iter()
        .find(|c| c.items.iter().any(|item| item.to_lowercase() == wanted))
}

/// Returns the catalog's own spelling of `ingredient`, if it is listed.
pub fn canonical_item(ingredient: &str) -> Option<&'static str> {
    let wanted = ingredient.trim().to_lowercase();
    CATALOG
        .iter()
        .flat_map(|c| c.items.iter())
        .find(|item| item.to_lowercase() == wanted)
        .copied()
}

pub fn is_catalog_item(ingredient: &str) -> bool {
    canonical_item(ingredient).is_some()
}
