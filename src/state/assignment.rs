//! Random, collision-free word draws for a round.

use rand::{
    Rng, SeedableRng,
    rngs::StdRng,
    seq::{SliceRandom, index},
};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::{
    catalog::{CatalogError, WordCatalog},
    roster::{Player, UserId},
};

/// A `(category, word)` pair taken out of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DrawnWord {
    /// Category the word belongs to.
    pub category: String,
    /// The drawn word.
    pub word: String,
}

/// Binding of one player to the word they hold for the current round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    /// Player holding the word.
    pub player: UserId,
    /// Display name of the player at the time of the draw.
    pub player_name: String,
    /// Category of the assigned word.
    pub category: String,
    /// Assigned word.
    pub word: String,
}

/// Failures raised while drawing words.
#[derive(Debug, Error)]
pub enum DrawError {
    /// Fewer unused words remain than players to serve.
    #[error("not enough words left: {available} available, {required} required")]
    InsufficientWords {
        /// Unused words across every category.
        available: usize,
        /// Words the draw needed.
        required: usize,
    },
    /// Catalog bookkeeping rejected a drawn word.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Draws words uniformly over the combined pool of every category's unused words.
///
/// The generator is injected so draws are reproducible with a seeded [`StdRng`].
#[derive(Debug, Clone)]
pub struct AssignmentEngine<R = StdRng> {
    rng: R,
}

impl AssignmentEngine<StdRng> {
    /// Engine backed by a generator seeded from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Engine backed by a generator seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> AssignmentEngine<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw `count` distinct unused words and mark them as used.
    ///
    /// Every unused word has the same chance of being picked, so categories
    /// with more words left are drawn from proportionally more often. On
    /// failure the catalog is left untouched.
    pub fn draw(
        &mut self,
        catalog: &mut WordCatalog,
        count: usize,
    ) -> Result<Vec<DrawnWord>, DrawError> {
        let mut drawn = {
            let pool = catalog.available_pairs();
            debug!(available = pool.len(), required = count, "drawing words");
            if pool.len() < count {
                return Err(DrawError::InsufficientWords {
                    available: pool.len(),
                    required: count,
                });
            }

            index::sample(&mut self.rng, pool.len(), count)
                .into_iter()
                .map(|picked| {
                    let (category, word) = pool[picked];
                    DrawnWord {
                        category: category.to_owned(),
                        word: word.to_owned(),
                    }
                })
                .collect::<Vec<_>>()
        };
        drawn.shuffle(&mut self.rng);

        for DrawnWord { category, word } in &drawn {
            catalog.mark_used(category, word)?;
        }
        Ok(drawn)
    }

    /// Draw one word per player and bind them in roster order.
    pub fn assign(
        &mut self,
        catalog: &mut WordCatalog,
        players: &[Player],
    ) -> Result<Vec<Assignment>, DrawError> {
        let drawn = self.draw(catalog, players.len())?;
        Ok(players
            .iter()
            .zip(drawn)
            .map(|(player, DrawnWord { category, word })| Assignment {
                player: player.id,
                player_name: player.name.clone(),
                category,
                word,
            })
            .collect())
    }
}
