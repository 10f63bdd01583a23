//! Consolidated geographic reference data: country → region assignment and
//! the transboundary episystem table. Owned here and shared by reference;
//! the aggregation engine and any external consumer read the same dataset.

use crate::scenario::Lookup;

/// The five campaign regions.
pub const REGIONS: [&str; 5] = [
    "North Africa",
    "West Africa",
    "Central Africa",
    "East Africa",
    "Southern Africa",
];

/// Region assigned to countries missing from the reference table.
/// A documented fallback, not an error.
pub const DEFAULT_REGION: &str = "West Africa";

/// Region for a country. Unknown countries fall back to [`DEFAULT_REGION`];
/// the same assignment is used at entity level and at aggregation level.
pub fn region_for(country: &str) -> Lookup<&'static str> {
    let region = match country {
        "Algeria" | "Egypt" | "Libya" | "Morocco" | "Tunisia" => "North Africa",

        "Benin" | "Burkina Faso" | "Cabo Verde" | "Cape Verde" | "Côte d'Ivoire"
        | "Gambia" | "Ghana" | "Guinea" | "Guinea-Bissau" | "Liberia" | "Mali"
        | "Mauritania" | "Niger" | "Nigeria" | "Senegal" | "Sierra Leone" | "Togo" => {
            "West Africa"
        }

        "Angola" | "Cameroon" | "Central African Republic" | "Chad" | "Congo"
        | "Democratic Republic of the Congo" | "Equatorial Guinea" | "Gabon"
        | "Sao Tome and Principe" => "Central Africa",

        "Burundi" | "Comoros" | "Djibouti" | "Eritrea" | "Ethiopia" | "Kenya"
        | "Madagascar" | "Mauritius" | "Rwanda" | "Seychelles" | "Somalia"
        | "South Sudan" | "Sudan" | "Uganda" | "United Republic of Tanzania"
        | "Tanzania" => "East Africa",

        "Botswana" | "Eswatini" | "eSwatini" | "Kingdom of eSwatini" | "Lesotho"
        | "Malawi" | "Mozambique" | "Namibia" | "South Africa" | "Zambia"
        | "Zimbabwe" => "Southern Africa",

        _ => return Lookup::Fallback(DEFAULT_REGION),
    };
    Lookup::Known(region)
}

// ---------------------------------------------------------------------------
// Episystems
// ---------------------------------------------------------------------------

/// A named cross-border epidemiological cluster: (country, subregion) pairs
/// sharing sustained virus circulation through animal movement.
pub struct Episystem {
    pub name: &'static str,
    pub members: &'static [(&'static str, &'static [&'static str])],
}

/// The eight transboundary episystems of the continental eradication
/// framework, in framework order. A (country, subregion) pair may appear
/// in more than one cluster; the first declaration wins.
pub const EPISYSTEMS: &[Episystem] = &[
    Episystem {
        name: "Chad-Sudan (DARFUR)",
        members: &[
            ("Chad", &["Ouaddai", "Sila", "Batha Est", "Batha Ouest", "Biltine"]),
            ("Sudan", &["North Darfur", "South Darfur", "West Darfur"]),
        ],
    },
    Episystem {
        name: "Karamoja",
        members: &[
            ("Uganda", &["Kotido", "Kitgum", "Moroto", "Lira", "Soroti"]),
            ("Kenya", &["Rift Valley"]),
            ("Ethiopia", &["SNNP"]),
            ("South Sudan", &["Eastern Equatoria"]),
        ],
    },
    Episystem {
        name: "Mano River",
        members: &[
            ("Guinea", &["Faranah", "Kankan", "N'Zerekore"]),
            ("Sierra Leone", &["Northern", "Eastern"]),
            ("Liberia", &["Lofa", "Nimba", "Bong", "Gbarpolu"]),
            (
                "Côte d'Ivoire",
                &["18 Montagnes", "Denguele", "Bafing", "Haut-Sassandra", "Worodougou"],
            ),
        ],
    },
    Episystem {
        name: "Sahel",
        members: &[
            ("Senegal", &["Saint-Louis"]),
            (
                "Mauritania",
                &[
                    "Brakna", "Tagant", "Assaba", "Gorgol", "Guidimakha",
                    "Hodh Ech Chargi", "Hodh El Gharbi",
                ],
            ),
            ("Mali", &["Bamako", "Mopti", "Tombouctou", "Gao", "Kidal", "Segou"]),
            (
                "Niger",
                &[
                    "Agadez", "Diffa", "Dosso", "Maradi", "Niamey", "Tahoua",
                    "Tillaberi", "Zinder",
                ],
            ),
            ("Chad", &["Hadjer Lamis", "Lac", "Kanem", "Barh El Gazal"]),
            (
                "Burkina Faso",
                &["Sahel", "Nord", "Centre-Nord", "Est", "Plateau Central", "Centre-Est"],
            ),
            ("Benin", &["Atacora", "Alibori"]),
            (
                "Nigeria",
                &["Kebbi", "Zamfara", "Sokoto", "Katsina", "Kano", "Jigawa", "Yobe", "Borno"],
            ),
        ],
    },
    Episystem {
        name: "Southern Protection Zone",
        members: &[
            ("Angola", &["Moxico", "Lunda Sul"]),
            (
                "Burundi",
                &[
                    "Bubanza", "Bujumbura-Mairie", "Bujumbura-Rural", "Bururi",
                    "Cankuzo", "Cibitoke", "Gitega", "Karuzi", "Kayanza", "Kirundo",
                    "Makamba", "Muramvya", "Muyinga", "Mwaro", "Ngozi", "Rutana",
                    "Ruyigi", "Waterbody",
                ],
            ),
            (
                "Democratic Republic of the Congo",
                &["Katanga", "Sud-Kivu", "Maniema", "Kasai-Oriental", "Kasai-Occidental"],
            ),
            (
                "Rwanda",
                &[
                    "Butare", "Byumba", "Cyangugu", "Gikongoro", "Gisenyi", "Gitarama",
                    "Kibungo", "Kibuye", "Kigali-ngali",
                    "Prefecture De La Ville De Kigali", "Ruhengeri", "Umutara",
                ],
            ),
            (
                "United Republic of Tanzania",
                &["Kigoma", "Rukwa", "Kagera", "Tabora"],
            ),
            ("Zambia", &["Luapula", "Northern", "North-Western"]),
        ],
    },
    Episystem {
        name: "Coastal Western Africa",
        members: &[
            ("Ghana", &["Northern"]),
            ("Togo", &["Centrale", "Kara", "Plateaux", "Savanes"]),
            ("Benin", &["Borgou", "Donga", "Collines", "Zou"]),
            (
                "Nigeria",
                &[
                    "Abia", "Akwa Ibom", "Anambra", "Bayelsa", "Benue", "Cross River",
                    "Delta", "Ebonyi", "Edo", "Ekiti",
                ],
            ),
            (
                "Cameroon",
                &[
                    "Sud-Ouest", "Sud", "Littoral", "Ouest", "Nord-Ouest", "Centre",
                    "Est", "Extreme-Nord",
                ],
            ),
            (
                "Equatorial Guinea",
                &[
                    "Annobon", "Bioko Norte", "Bioko Sur", "Centro Sur", "Kientem",
                    "Litoral", "Welenzas",
                ],
            ),
            (
                "Gabon",
                &["ESTUAIRE", "WOLEU-NTEM", "MOYEN-OGOOUE", "OGOOUE-IVINDO"],
            ),
            ("Congo", &["Cuvette Ouest", "Sangha"]),
        ],
    },
    Episystem {
        name: "Lake Chad Basin",
        members: &[
            ("Nigeria", &["Borno", "Adamawa", "Taraba", "Gombe", "Plateau"]),
            ("Cameroon", &["Adamaoua", "Nord", "Extreme-Nord"]),
            (
                "Chad",
                &[
                    "Logone Occidental", "Tandjile Est", "Tandjile Ouest", "Kanem",
                    "Barh El Gazal", "Lac", "Hadjer Lamis", "Mayo-Dala",
                ],
            ),
            ("Central African Republic", &["Ouham", "Bamingui-bangora"]),
            ("Niger", &["Tillaberi", "Zinder"]),
        ],
    },
    Episystem {
        name: "Nile",
        members: &[
            ("Sudan", &["Khartoum", "Kassala", "Gadaref", "Al Jazeera"]),
            ("Ethiopia", &["Amhara"]),
        ],
    },
    Episystem {
        name: "Somali",
        members: &[
            ("Kenya", &["North Eastern Province"]),
            ("Ethiopia", &["Oromia", "Somali"]),
            ("Somalia", &["Bay", "Bakool", "Gedo"]),
            ("Djibouti", &["Ali Sabieh", "Dikhil"]),
            ("Uganda", &["Kitgum", "Kotido", "Moroto"]),
        ],
    },
];

/// Episystem containing a (country, subregion) pair, if any. Entities not
/// in any cluster are omitted from episystem aggregates but still count in
/// country and region aggregates.
pub fn episystem_for(country: &str, subregion: &str) -> Option<&'static str> {
    EPISYSTEMS.iter().find_map(|episystem| {
        episystem
            .members
            .iter()
            .any(|(c, subs)| *c == country && subs.iter().any(|s| *s == subregion))
            .then_some(episystem.name)
    })
}
