/// A catalog entry before it is dealt into a deck
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTemplate {
    pub url: String,
    pub title: String,
    pub photographer: String,
}

impl ImageTemplate {
    pub fn new(url: &str, title: &str, photographer: &str) -> Self {
        Self {
            url: url.to_string(),
            title: title.to_string(),
            photographer: photographer.to_string(),
        }
    }
}

// (url, title, photographer). Some photos are reused under different titles.
const CURATED: [(&str, &str, &str); 10] = [
    (
        "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=800&h=1200&fit=crop",
        "Mountain Lake",
        "John Doe",
    ),
    (
        "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=800&h=1200&fit=crop",
        "Forest Path",
        "Jane Smith",
    ),
    (
        "https://images.unsplash.com/photo-1469474968028-56623f02e42e?w=800&h=1200&fit=crop",
        "Sunset Valley",
        "Mike Johnson",
    ),
    (
        "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=800&h=1200&fit=crop",
        "Ocean Waves",
        "Sarah Wilson",
    ),
    (
        "https://images.unsplash.com/photo-1518837695005-2083093ee35b?w=800&h=1200&fit=crop",
        "Desert Dunes",
        "Alex Brown",
    ),
    (
        "https://images.unsplash.com/photo-1501594907352-04cda38ebc29?w=800&h=1200&fit=crop",
        "Misty Lake",
        "Emma Davis",
    ),
    (
        "https://images.unsplash.com/photo-1472214103451-9374bd1c798e?w=800&h=1200&fit=crop",
        "Mountain Peak",
        "Chris Lee",
    ),
    (
        "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=800&h=1200&fit=crop",
        "Tropical Beach",
        "Lisa Garcia",
    ),
    (
        "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=800&h=1200&fit=crop",
        "City Skyline",
        "Tom Anderson",
    ),
    (
        "https://images.unsplash.com/photo-1469474968028-56623f02e42e?w=800&h=1200&fit=crop",
        "Northern Lights",
        "Anna Martinez",
    ),
];

/// The built-in deck source
pub fn default_catalog() -> Vec<ImageTemplate> {
    CURATED
        .iter()
        .map(|&(url, title, photographer)| ImageTemplate::new(url, title, photographer))
        .collect()
}
