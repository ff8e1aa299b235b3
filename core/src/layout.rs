use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Which cards were dealt onto the board and the display order of each
/// column. Both columns always hold the same set of ids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchLayout {
    terms: Vec<CardId>,
    images: Vec<CardId>,
}

impl MatchLayout {
    /// Builds a layout directly from column orders.
    pub fn from_columns(terms: Vec<CardId>, images: Vec<CardId>) -> Result<Self> {
        if terms.len() != images.len() || terms.iter().any(|id| !images.contains(id)) {
            return Err(GameError::InvalidLayout);
        }
        Ok(Self { terms, images })
    }

    pub fn terms(&self) -> &[CardId] {
        &self.terms
    }

    pub fn images(&self) -> &[CardId] {
        &self.images
    }

    pub fn pair_count(&self) -> usize {
        self.terms.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.terms.iter().any(|term| term == id)
    }
}

/// Strategy for dealing cards onto the board.
pub trait LayoutGenerator {
    fn generate(self, definition: &MatchDefinition, config: MatchConfig) -> MatchLayout;
}

/// Deals a random subset of the catalog and shuffles the two columns
/// independently, so matching pairs never sit at the same row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, definition: &MatchDefinition, config: MatchConfig) -> MatchLayout {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);

        let mut ids: Vec<CardId> = definition
            .cards()
            .iter()
            .map(|card| card.id.clone())
            .collect();
        if ids.len() < config.max_pairs {
            log::warn!(
                "Card set smaller than the configured board, dealing {} pairs instead of {}",
                ids.len(),
                config.max_pairs
            );
        }
        ids.shuffle(&mut rng);
        ids.truncate(config.max_pairs);

        let mut terms = ids.clone();
        terms.shuffle(&mut rng);
        let mut images = ids;
        images.shuffle(&mut rng);

        MatchLayout { terms, images }
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    fn definition(count: usize) -> MatchDefinition {
        let cards = (0..count)
            .map(|i| MatchCard {
                id: format!("{i}"),
                title: format!("Wig {i}"),
                image: format!("https://cdn.test/{i}.jpg"),
            })
            .collect();
        MatchDefinition::new(None, cards).unwrap()
    }

    fn sorted(ids: &[CardId]) -> Vec<CardId> {
        let mut ids = ids.to_vec();
        ids.sort();
        ids
    }

    #[test]
    fn both_columns_hold_the_same_cards() {
        let definition = definition(12);
        let layout = RandomLayoutGenerator::new(3).generate(&definition, MatchConfig::default());

        assert_eq!(layout.pair_count(), 8);
        assert_eq!(sorted(layout.terms()), sorted(layout.images()));
        for id in layout.terms() {
            assert!(definition.card(id).is_some());
        }
    }

    #[test]
    fn the_same_seed_deals_the_same_board() {
        let definition = definition(12);
        let first = RandomLayoutGenerator::new(7).generate(&definition, MatchConfig::default());
        let second = RandomLayoutGenerator::new(7).generate(&definition, MatchConfig::default());

        assert_eq!(first, second);
    }

    #[test]
    fn a_small_card_set_deals_every_card() {
        let definition = definition(3);
        let layout = RandomLayoutGenerator::new(0).generate(&definition, MatchConfig::default());

        assert_eq!(layout.pair_count(), 3);
    }

    #[test]
    fn columns_with_different_cards_are_rejected() {
        let result = MatchLayout::from_columns(
            vec!["1".to_string(), "2".to_string()],
            vec!["1".to_string(), "3".to_string()],
        );
        assert_eq!(result, Err(GameError::InvalidLayout));

        let short = MatchLayout::from_columns(vec!["1".to_string()], vec![]);
        assert_eq!(short, Err(GameError::InvalidLayout));
    }

    #[test]
    fn explicit_columns_round_trip() {
        let layout = MatchLayout::from_columns(
            vec!["5".to_string(), "9".to_string()],
            vec!["9".to_string(), "5".to_string()],
        )
        .unwrap();

        assert!(layout.contains("5"));
        assert!(!layout.contains("7"));
        assert_eq!(layout.pair_count(), 2);
    }
}
