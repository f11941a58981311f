use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::ImageTemplate;

/// A card in the current deck. `id` is its position in the shuffled order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub id: usize,
    pub url: String,
    pub title: String,
    pub photographer: String,
}

/// Deal a uniformly shuffled deck from `catalog`, numbering cards by position.
pub fn shuffle<R: Rng + ?Sized>(catalog: &[ImageTemplate], rng: &mut R) -> Vec<ImageRecord> {
    let mut order: Vec<&ImageTemplate> = catalog.iter().collect();
    order.shuffle(rng);

    order
        .into_iter()
        .enumerate()
        .map(|(id, template)| ImageRecord {
            id,
            url: template.url.clone(),
            title: template.title.clone(),
            photographer: template.photographer.clone(),
        })
        .collect()
}
