use crate::photo::{Location, Photo, Position};

struct SeedPrint {
    id: &'static str,
    image_url: &'static str,
    caption: &'static str,
    captured_at: i64,
    latitude: f64,
    longitude: f64,
    city: &'static str,
    country: &'static str,
}

const SEED_PRINTS: &[SeedPrint] = &[
    SeedPrint {
        id: "seed-paris",
        image_url: "https://picsum.photos/seed/polaroid-paris/600/600",
        caption: "Morning light over the rooftops",
        captured_at: 1_714_550_400_000,
        latitude: 48.8566,
        longitude: 2.3522,
        city: "Paris",
        country: "France",
    },
    SeedPrint {
        id: "seed-tokyo",
        image_url: "https://picsum.photos/seed/polaroid-tokyo/600/600",
        caption: "Neon after the rain",
        captured_at: 1_714_636_800_000,
        latitude: 35.6762,
        longitude: 139.6503,
        city: "Tokyo",
        country: "Japan",
    },
    SeedPrint {
        id: "seed-new-york",
        image_url: "https://picsum.photos/seed/polaroid-nyc/600/600",
        caption: "Coffee, then the bridge",
        captured_at: 1_714_723_200_000,
        latitude: 40.7128,
        longitude: -74.0060,
        city: "New York",
        country: "United States",
    },
    SeedPrint {
        id: "seed-cape-town",
        image_url: "https://picsum.photos/seed/polaroid-capetown/600/600",
        caption: "Table Mountain wearing its cloud",
        captured_at: 1_714_809_600_000,
        latitude: -33.9249,
        longitude: 18.4241,
        city: "Cape Town",
        country: "South Africa",
    },
];

/// Curated example prints shown when no shared prints exist yet.
pub fn seed_photos() -> Vec<Photo> {
    SEED_PRINTS
        .iter()
        .map(|seed| Photo {
            id: seed.id.to_string(),
            image_data: seed.image_url.to_string(),
            captured_at: seed.captured_at,
            position: Position::default(),
            orientation: 0.0,
            caption: Some(seed.caption.to_string()),
            caption_pending: false,
            is_public: true,
            development_progress: 100.0,
            location: Some(
                Location::new(seed.latitude, seed.longitude)
                    .with_city(seed.city)
                    .with_country(seed.country),
            ),
        })
        .collect()
}
