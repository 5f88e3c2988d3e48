//! Built-in Mallorca dataset.

use crate::model::{
    AccessLevel, Beach, BeachDraft, BeachType, Dish, DishDraft, HeritageDraft, HeritageSite,
    LocalMarket, Locality, LocalityDraft, LocalityType, MarketDraft, PriceRange, Restaurant,
    RestaurantDraft, Zone, ZoneDraft,
};
use crate::store::CatalogStore;
use mallorca_core::{Error, Result};
use std::collections::HashMap;
use tracing::debug;

const ZONES: [&str; 6] = [
    "Palma de Mallorca",
    "Sierra de Tramontana",
    "Levante",
    "Migjorn",
    "Llano de Mallorca",
    "Raiguer",
];

/// (locality, zone, type, coordinates)
const LOCALITIES: &[(&str, &str, LocalityType, Option<(f64, f64)>)] = &[
    ("Palma", "Palma de Mallorca", LocalityType::City, Some((39.5696, 2.6502))),
    ("Valldemossa", "Sierra de Tramontana", LocalityType::Town, Some((39.7106, 2.6224))),
    ("Deià", "Sierra de Tramontana", LocalityType::Town, Some((39.7486, 2.6483))),
    ("Sóller", "Sierra de Tramontana", LocalityType::Town, Some((39.7667, 2.7150))),
    ("Fornalutx", "Sierra de Tramontana", LocalityType::Town, None),
    ("Escorca", "Sierra de Tramontana", LocalityType::Town, None),
    ("Banyalbufar", "Sierra de Tramontana", LocalityType::Town, None),
    ("Estellencs", "Sierra de Tramontana", LocalityType::Town, None),
    ("Esporles", "Sierra de Tramontana", LocalityType::Town, None),
    ("Bunyola", "Sierra de Tramontana", LocalityType::Town, None),
    ("Puigpunyent", "Sierra de Tramontana", LocalityType::Town, None),
    ("Andratx", "Sierra de Tramontana", LocalityType::Town, Some((39.5756, 2.4200))),
    ("Calvià", "Sierra de Tramontana", LocalityType::Town, None),
    ("Pollença", "Sierra de Tramontana", LocalityType::Town, Some((39.8769, 3.0164))),
    ("Alcúdia", "Sierra de Tramontana", LocalityType::Town, Some((39.8531, 3.1214))),
    ("Artà", "Levante", LocalityType::Town, Some((39.6939, 3.3497))),
    ("Capdepera", "Levante", LocalityType::Town, Some((39.7025, 3.4350))),
    ("Son Servera", "Levante", LocalityType::Town, None),
    ("Manacor", "Levante", LocalityType::City, Some((39.5696, 3.2096))),
    ("Sant Llorenç des Cardassar", "Levante", LocalityType::Town, None),
    ("Felanitx", "Migjorn", LocalityType::Town, None),
    ("Santanyí", "Migjorn", LocalityType::Town, Some((39.3547, 3.1286))),
    ("Campos", "Migjorn", LocalityType::Town, Some((39.4308, 3.0194))),
    ("Ses Salines", "Migjorn", LocalityType::Town, None),
    ("Llucmajor", "Migjorn", LocalityType::City, Some((39.4903, 2.8906))),
    ("Petra", "Llano de Mallorca", LocalityType::Town, None),
    ("Santa Margalida", "Llano de Mallorca", LocalityType::Town, None),
    ("Muro", "Llano de Mallorca", LocalityType::Town, None),
    ("Sineu", "Llano de Mallorca", LocalityType::Town, Some((39.6425, 3.0106))),
    ("Porreres", "Llano de Mallorca", LocalityType::Town, None),
    ("Montuïri", "Llano de Mallorca", LocalityType::Town, None),
    ("Vilafranca de Bonany", "Llano de Mallorca", LocalityType::Town, None),
    ("Ariany", "Llano de Mallorca", LocalityType::Town, None),
    ("Lloret de Vistalegre", "Llano de Mallorca", LocalityType::Town, None),
    ("Costitx", "Llano de Mallorca", LocalityType::Town, None),
    ("Sant Joan", "Llano de Mallorca", LocalityType::Town, None),
    ("Maria de la Salut", "Llano de Mallorca", LocalityType::Town, None),
    ("Algaida", "Llano de Mallorca", LocalityType::Town, None),
    ("Llubí", "Llano de Mallorca", LocalityType::Town, None),
    ("Inca", "Raiguer", LocalityType::City, Some((39.7211, 2.9110))),
    ("Lloseta", "Raiguer", LocalityType::Town, None),
    ("Binissalem", "Raiguer", LocalityType::Town, None),
    ("Consell", "Raiguer", LocalityType::Town, None),
    ("Santa Maria del Camí", "Raiguer", LocalityType::Town, None),
    ("Marratxí", "Raiguer", LocalityType::Town, None),
    ("Selva", "Raiguer", LocalityType::Town, None),
    ("Mancor de la Vall", "Raiguer", LocalityType::Town, None),
    ("Búger", "Raiguer", LocalityType::Town, None),
    ("Campanet", "Raiguer", LocalityType::Town, None),
    ("Sa Pobla", "Raiguer", LocalityType::Town, None),
    ("Alaró", "Raiguer", LocalityType::Town, None),
    ("Santa Eugènia", "Raiguer", LocalityType::Town, None),
];

const IMAGE_BASE: &str = "https://mallorca-paraiso-web.s3.eu-central-1.amazonaws.com";

/// Builds a store holding the built-in dataset.
pub fn mallorca() -> Result<CatalogStore> {
    let store = CatalogStore::new();
    populate(&store)?;
    Ok(store)
}

/// Inserts the built-in dataset into `store`.
pub fn populate(store: &CatalogStore) -> Result<()> {
    let mut zones = HashMap::new();
    for name in ZONES {
        let zone: Zone = store.create(ZoneDraft::new(name))?;
        zones.insert(name, zone.id);
    }

    let mut localities = HashMap::new();
    for &(name, zone, locality_type, coords) in LOCALITIES {
        let zone_id = *zones
            .get(zone)
            .ok_or_else(|| Error::internal(format!("Unknown seed zone {}", zone)))?;
        let mut draft = LocalityDraft::new(name, locality_type, zone_id);
        if let Some((lat, lon)) = coords {
            draft = draft.at(lat, lon);
        }
        let locality: Locality = store.create(draft)?;
        localities.insert(name, locality.id);
    }

    let locality = |name: &str| {
        localities
            .get(name)
            .copied()
            .ok_or_else(|| Error::internal(format!("Unknown seed locality {}", name)))
    };

    for draft in beaches(&locality)? {
        store.create::<Beach>(draft)?;
    }
    for draft in restaurants() {
        store.create::<Restaurant>(draft)?;
    }
    for draft in heritage_sites() {
        store.create::<HeritageSite>(draft)?;
    }
    for draft in markets() {
        store.create::<LocalMarket>(draft)?;
    }
    for draft in dishes() {
        store.create::<Dish>(draft)?;
    }

    debug!(stats = ?store.stats(), "Seeded catalog");
    Ok(())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn beach(
    name: &str,
    slug: &str,
    description: &str,
    beach_type: BeachType,
    access: AccessLevel,
    services: &[&str],
    locality_id: i64,
    (latitude, longitude): (f64, f64),
) -> BeachDraft {
    BeachDraft {
        name: name.to_string(),
        description: description.to_string(),
        image: Some(format!("{}/beaches/{}.jpg", IMAGE_BASE, slug)),
        beach_type,
        access,
        services: strings(services),
        featured: true,
        locality_id,
        latitude: Some(latitude),
        longitude: Some(longitude),
    }
}

fn beaches(locality: &dyn Fn(&str) -> Result<i64>) -> Result<Vec<BeachDraft>> {
    Ok(vec![
        beach(
            "Playa de Alcúdia",
            "alcudia",
            "Una de las playas más largas de Mallorca, con aguas cristalinas y arena blanca.",
            BeachType::Sand,
            AccessLevel::Easy,
            &["parking", "duchas", "socorrista", "restaurantes", "hamacas", "deportes_acuaticos"],
            locality("Alcúdia")?,
            (39.8353, 3.1190),
        ),
        beach(
            "Cala Mesquida",
            "cala-mesquida",
            "Hermosa cala rodeada de dunas y pinos, ideal para el windsurf.",
            BeachType::Cove,
            AccessLevel::Easy,
            &["parking", "duchas", "socorrista", "restaurante"],
            locality("Capdepera")?,
            (39.7444, 3.4361),
        ),
        beach(
            "Es Trenc",
            "es-trenc",
            "Playa virgen con aspecto caribeño, famosa por sus aguas turquesas.",
            BeachType::Sand,
            AccessLevel::Moderate,
            &["parking", "chiringuitos", "hamacas"],
            locality("Campos")?,
            (39.3497, 2.9817),
        ),
        beach(
            "Cala Deià",
            "cala-deia",
            "Pequeña cala rocosa con aguas cristalinas, perfecta para el snorkel.",
            BeachType::Cove,
            AccessLevel::Difficult,
            &["restaurante"],
            locality("Deià")?,
            (39.7469, 2.6494),
        ),
        beach(
            "Playa de Palma",
            "playa-palma",
            "Extensa playa urbana con todos los servicios y entretenimiento.",
            BeachType::Sand,
            AccessLevel::Easy,
            &[
                "parking",
                "duchas",
                "socorrista",
                "restaurantes",
                "hamacas",
                "deportes_acuaticos",
                "wifi",
            ],
            locality("Palma")?,
            (39.5198, 2.7458),
        ),
        beach(
            "Cala Varques",
            "cala-varques",
            "Cala virgen de difícil acceso pero de extraordinaria belleza.",
            BeachType::Cove,
            AccessLevel::Difficult,
            &[],
            locality("Manacor")?,
            (39.5007, 3.2977),
        ),
    ])
}

fn restaurants() -> Vec<RestaurantDraft> {
    vec![
        RestaurantDraft {
            name: "Ca'n Joan de s'Aigo".to_string(),
            location: "Palma".to_string(),
            specialty: "Ensaïmada y chocolate".to_string(),
            price: PriceRange::Budget,
            reservation_required: false,
            url: Some("https://canjoandesaigo.com".to_string()),
            cuisine_type: "Cafetería".to_string(),
            description: Some("Granja histórica en el casco antiguo de Palma.".to_string()),
            schedule: Some("08:00-21:00".to_string()),
            phone: None,
            image: None,
            latitude: Some(39.5708),
            longitude: Some(2.6523),
        },
        RestaurantDraft {
            name: "Es Verger".to_string(),
            location: "Alaró".to_string(),
            specialty: "Paletilla de cordero".to_string(),
            price: PriceRange::Moderate,
            reservation_required: false,
            url: None,
            cuisine_type: "Mallorquina".to_string(),
            description: Some("Casa de payés en el camino al castillo de Alaró.".to_string()),
            schedule: Some("10:00-20:00".to_string()),
            phone: None,
            image: None,
            latitude: Some(39.7197),
            longitude: Some(2.7878),
        },
        RestaurantDraft {
            name: "Celler Sa Premsa".to_string(),
            location: "Palma".to_string(),
            specialty: "Frit mallorquí".to_string(),
            price: PriceRange::Moderate,
            reservation_required: false,
            url: None,
            cuisine_type: "Mallorquina".to_string(),
            description: None,
            schedule: None,
            phone: None,
            image: None,
            latitude: Some(39.5734),
            longitude: Some(2.6478),
        },
        RestaurantDraft {
            name: "Sa Fonda Deià".to_string(),
            location: "Deià".to_string(),
            specialty: "Tapas".to_string(),
            price: PriceRange::Moderate,
            reservation_required: false,
            url: None,
            cuisine_type: "Bar".to_string(),
            description: None,
            schedule: None,
            phone: None,
            image: None,
            latitude: None,
            longitude: None,
        },
        RestaurantDraft {
            name: "Es Racó d'es Teix".to_string(),
            location: "Deià".to_string(),
            specialty: "Cocina de autor".to_string(),
            price: PriceRange::Luxury,
            reservation_required: true,
            url: None,
            cuisine_type: "Alta cocina".to_string(),
            description: None,
            schedule: None,
            phone: None,
            image: None,
            latitude: Some(39.7478),
            longitude: Some(2.6478),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn heritage(
    name: &str,
    description: &str,
    period: &str,
    highlight: &str,
    schedule: &str,
    open_days: &str,
    address: &str,
    (latitude, longitude): (f64, f64),
) -> HeritageDraft {
    HeritageDraft {
        name: name.to_string(),
        description: description.to_string(),
        period: period.to_string(),
        highlight: highlight.to_string(),
        schedule: schedule.to_string(),
        open_days: open_days.to_string(),
        image: format!("{}/heritage/{}.jpg", IMAGE_BASE, slug(name)),
        address: address.to_string(),
        google_maps_url: format!("https://maps.google.com/?q={},{}", latitude, longitude),
        entrance_fee: None,
        accessibility: None,
        guided_tours: None,
        latitude: Some(latitude),
        longitude: Some(longitude),
    }
}

fn heritage_sites() -> Vec<HeritageDraft> {
    let mut cathedral = heritage(
        "Catedral de Mallorca",
        "Catedral gótica frente al mar, conocida como La Seu.",
        "Gótico",
        "Rosetón mayor y baldaquino de Gaudí",
        "10:00-17:15",
        "Lunes a sábado",
        "Plaça de la Seu, Palma",
        (39.5675, 2.6484),
    );
    cathedral.entrance_fee = Some("10€".to_string());
    cathedral.guided_tours = Some(true);

    vec![
        cathedral,
        heritage(
            "Castell de Bellver",
            "Castillo gótico de planta circular sobre la bahía de Palma.",
            "Gótico",
            "Planta circular",
            "10:00-19:00",
            "Martes a domingo",
            "Carrer de Camilo José Cela, Palma",
            (39.5638, 2.6198),
        ),
        heritage(
            "Real Cartuja de Valldemossa",
            "Antigua cartuja donde se alojaron Chopin y George Sand.",
            "Barroco",
            "Celdas de Chopin",
            "09:30-18:30",
            "Lunes a sábado",
            "Plaça Cartoixa, Valldemossa",
            (39.7107, 2.6224),
        ),
        heritage(
            "Santuari de Lluc",
            "Santuario en la Serra de Tramuntana, centro espiritual de la isla.",
            "Barroco",
            "Virgen de Lluc",
            "10:00-17:00",
            "Todos los días",
            "Plaça dels Peregrins, Escorca",
            (39.8225, 2.8850),
        ),
        heritage(
            "Capocorb Vell",
            "Poblado talayótico con torres y viviendas de la Edad del Bronce.",
            "Talayótico",
            "Talaiots",
            "10:00-17:00",
            "Viernes a miércoles",
            "Carretera Llucmajor-Cap Blanc, Llucmajor",
            (39.3773, 2.7869),
        ),
    ]
}

fn slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

fn market(
    name: &str,
    location: &str,
    address: &str,
    days: &str,
    hours: &str,
    coords: Option<(f64, f64)>,
) -> MarketDraft {
    MarketDraft {
        name: name.to_string(),
        location: location.to_string(),
        address: address.to_string(),
        google_maps_url: format!("https://maps.google.com/?q={}", address.replace(' ', "+")),
        days: days.to_string(),
        hours: hours.to_string(),
        description: None,
        image: None,
        latitude: coords.map(|(lat, _)| lat),
        longitude: coords.map(|(_, lon)| lon),
    }
}

fn markets() -> Vec<MarketDraft> {
    vec![
        market(
            "Mercat de l'Olivar",
            "Palma",
            "Plaça de l'Olivar, Palma",
            "Lunes a sábado",
            "07:00-14:30",
            Some((39.5722, 2.6525)),
        ),
        market(
            "Mercado de Sineu",
            "Sineu",
            "Plaça des Fossar, Sineu",
            "Miércoles",
            "08:00-13:30",
            Some((39.6425, 3.0106)),
        ),
        market(
            "Mercado de Santanyí",
            "Santanyí",
            "Plaça Major, Santanyí",
            "Miércoles y sábado",
            "08:00-13:00",
            Some((39.3547, 3.1286)),
        ),
        market(
            "Dijous Bo",
            "Inca",
            "Plaça de Santa Maria la Major, Inca",
            "Jueves",
            "08:00-13:30",
            Some((39.7211, 2.9110)),
        ),
        market(
            "Mercado de Pollença",
            "Pollença",
            "Plaça Major, Pollença",
            "Domingo",
            "08:00-13:30",
            None,
        ),
    ]
}

fn dish(
    name: &str,
    category: &str,
    description: &str,
    ingredients: &[&str],
    where_to_try: Option<(&str, f64, f64)>,
) -> DishDraft {
    DishDraft {
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        ingredients: strings(ingredients),
        image: format!("{}/food/{}.jpg", IMAGE_BASE, slug(name)),
        preparation: None,
        where_to_try: where_to_try.map(|(place, _, _)| place.to_string()),
        latitude: where_to_try.map(|(_, lat, _)| lat),
        longitude: where_to_try.map(|(_, _, lon)| lon),
    }
}

fn dishes() -> Vec<DishDraft> {
    vec![
        dish(
            "Ensaïmada",
            "Repostería",
            "Espiral de masa hojaldrada con manteca de cerdo.",
            &["harina", "azúcar", "huevos", "manteca de cerdo"],
            Some(("Ca'n Joan de s'Aigo", 39.5708, 2.6523)),
        ),
        dish(
            "Sobrasada",
            "Embutido",
            "Embutido curado de cerdo con pimentón.",
            &["carne de cerdo", "pimentón", "sal"],
            None,
        ),
        dish(
            "Tumbet",
            "Verduras",
            "Capas de patata, berenjena y pimiento fritos con salsa de tomate.",
            &["patata", "berenjena", "pimiento rojo", "tomate", "aceite de oliva"],
            None,
        ),
        dish(
            "Frit mallorquí",
            "Carnes",
            "Fritura de menudillos de cordero con patata y verduras.",
            &["menudillos de cordero", "patata", "pimiento", "cebolla", "hinojo"],
            Some(("Celler Sa Premsa", 39.5734, 2.6478)),
        ),
        dish(
            "Pa amb oli",
            "Entrantes",
            "Pan moreno con tomate de ramallet, aceite y sal.",
            &["pan moreno", "tomate de ramallet", "aceite de oliva", "sal"],
            None,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Page;
    use crate::model::{BeachFilter, LocalityFilter, ZoneFilter};

    #[test]
    fn test_seed_counts() {
        let store = mallorca().unwrap();
        let stats = store.stats();
        assert_eq!(stats.zones, 6);
        assert_eq!(stats.localities, LOCALITIES.len());
        assert_eq!(stats.beaches, 6);
        assert_eq!(stats.restaurants, 5);
        assert_eq!(stats.heritage_sites, 5);
        assert_eq!(stats.markets, 5);
        assert_eq!(stats.dishes, 5);
    }

    #[test]
    fn test_seed_beach_order_and_coordinates() {
        let store = mallorca().unwrap();
        let beaches = store.list::<Beach>(&BeachFilter::default(), Page::default());
        let names: Vec<&str> = beaches.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Playa de Alcúdia",
                "Cala Mesquida",
                "Es Trenc",
                "Cala Deià",
                "Playa de Palma",
                "Cala Varques",
            ]
        );
        assert_eq!(beaches[0].latitude, Some(39.8353));
        assert!(beaches[5].services.is_empty());
    }

    #[test]
    fn test_seed_beaches_link_to_localities() {
        let store = mallorca().unwrap();
        let es_trenc = store.get::<Beach>(3).unwrap();
        let campos = store.get::<Locality>(es_trenc.locality_id).unwrap();
        assert_eq!(campos.name, "Campos");

        let migjorn = store
            .list::<Zone>(&ZoneFilter::default(), Page::default())
            .into_iter()
            .find(|z| z.name == "Migjorn")
            .unwrap();
        assert_eq!(campos.zone_id, migjorn.id);

        let in_migjorn = LocalityFilter {
            zone_id: Some(migjorn.id),
            ..Default::default()
        };
        assert_eq!(store.count::<Locality>(&in_migjorn), 5);
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Frit mallorquí"), "frit-mallorqu-");
        assert_eq!(slug("Capocorb Vell"), "capocorb-vell");
    }
}
