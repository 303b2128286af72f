//! # Room Archetype Catalogs
//!
//! Fixed pools of prefab room archetypes per level theme, plus the tile
//! palette each theme paints with.
//!
//! Every built-in theme lays out 16 archetypes the same way: indices 0-1 are
//! boss rooms, 2-11 enemy rooms and 12-15 item rooms.

use super::GenerationConfig;
use crate::map::{MaterialId, TilePalette};
use crate::{config, WarrenError, WarrenResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Level theme selecting archetype sizes and materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theme {
    Hotel,
    Subway,
    Hospital,
}

const HOTEL_SIZES: [(u32, u32); 16] = [
    (24, 22), (30, 22),
    (20, 20), (22, 18),
    (28, 22), (54, 20),
    (40, 38), (54, 30),
    (22, 15), (28, 16),
    (34, 22), (20, 14),
    (18, 14), (18, 10),
    (18, 14), (18, 10),
];

const SUBWAY_SIZES: [(u32, u32); 16] = [
    (46, 72), (58, 62),
    (40, 20), (20, 20),
    (38, 30), (38, 50),
    (38, 28), (26, 46),
    (38, 28), (38, 58),
    (68, 36), (30, 36),
    (30, 32), (32, 56),
    (30, 32), (30, 32),
];

// Hospital rooms have not been authored yet
const HOSPITAL_SIZES: [(u32, u32); 16] = [(0, 0); 16];

const BOSS_INDICES: std::ops::Range<usize> = 0..2;
const ENEMY_INDICES: std::ops::Range<usize> = 2..12;
const ITEM_INDICES: std::ops::Range<usize> = 12..16;

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Hotel, Theme::Subway, Theme::Hospital];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Hotel => "hotel",
            Theme::Subway => "subway",
            Theme::Hospital => "hospital",
        }
    }

    /// Builds the archetype pools for this theme.
    pub fn catalog(self) -> ArchetypeCatalog {
        let sizes = match self {
            Theme::Hotel => &HOTEL_SIZES,
            Theme::Subway => &SUBWAY_SIZES,
            Theme::Hospital => &HOSPITAL_SIZES,
        };
        let pool = |range: std::ops::Range<usize>| -> Vec<Archetype> {
            range
                .map(|index| Archetype::new(index, sizes[index].0, sizes[index].1))
                .collect()
        };
        ArchetypeCatalog {
            boss: pool(BOSS_INDICES),
            enemy: pool(ENEMY_INDICES),
            item: pool(ITEM_INDICES),
        }
    }

    /// Materials this theme paints each layer with.
    pub fn palette(self) -> TilePalette {
        let base = match self {
            Theme::Hotel => 0,
            Theme::Subway => 10,
            Theme::Hospital => 20,
        };
        TilePalette {
            floor: MaterialId(base),
            wall_lower: MaterialId(base + 1),
            wall_upper: MaterialId(base + 2),
            roof: MaterialId(base + 3),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = WarrenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| WarrenError::UnknownTheme(s.to_string()))
    }
}

/// A prefab room shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Archetype {
    /// Index into the theme's archetype table; keys room templates
    pub index: usize,
    pub width: u32,
    pub height: u32,
}

impl Archetype {
    pub fn new(index: usize, width: u32, height: u32) -> Self {
        Self {
            index,
            width,
            height,
        }
    }
}

/// Archetype pools rooms are drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchetypeCatalog {
    pub boss: Vec<Archetype>,
    pub enemy: Vec<Archetype>,
    pub item: Vec<Archetype>,
}

impl ArchetypeCatalog {
    /// Checks that the pools can satisfy the configured room counts and that
    /// every archetype has a usable size.
    pub fn validate(&self, config: &GenerationConfig) -> WarrenResult<()> {
        if self.boss.is_empty() {
            return Err(WarrenError::PoolExhausted {
                pool: "boss",
                requested: 1,
                available: 0,
            });
        }
        check_pool_len("item", self.item.len(), config.item_rooms)?;
        check_pool_len("enemy", self.enemy.len(), config.enemy_rooms)?;

        // A hallway cuts `hallway_width` cells into the upper room
        let min_side = config::MIN_ROOM_SIZE.max(config.hallway_width);
        let too_small = self
            .boss
            .iter()
            .chain(&self.enemy)
            .chain(&self.item)
            .find(|archetype| archetype.width < min_side || archetype.height < min_side);
        if let Some(archetype) = too_small {
            return Err(WarrenError::InvalidConfig(format!(
                "archetype {} is {}x{}, below the minimum side of {}",
                archetype.index, archetype.width, archetype.height, min_side
            )));
        }
        Ok(())
    }
}

/// Draws `count` distinct entries from `pool`, removing them from it.
///
/// Fails without touching the pool when it holds fewer than `count` entries.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use warren::draw_without_replacement;
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let mut pool = vec![12, 13, 14, 15];
/// let picked = draw_without_replacement("item", &mut pool, 2, &mut rng).unwrap();
/// assert_eq!(picked.len(), 2);
/// assert_eq!(pool.len(), 2);
/// assert!(draw_without_replacement("item", &mut pool, 3, &mut rng).is_err());
/// ```
pub fn draw_without_replacement<T, R: Rng + ?Sized>(
    pool_name: &'static str,
    pool: &mut Vec<T>,
    count: usize,
    rng: &mut R,
) -> WarrenResult<Vec<T>> {
    check_pool_len(pool_name, pool.len(), count)?;
    Ok((0..count)
        .map(|_| {
            let index = rng.gen_range(0..pool.len());
            pool.remove(index)
        })
        .collect())
}

fn check_pool_len(pool: &'static str, available: usize, requested: usize) -> WarrenResult<()> {
    if requested > available {
        return Err(WarrenError::PoolExhausted {
            pool,
            requested,
            available,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_theme_catalog_layout() {
        let catalog = Theme::Hotel.catalog();
        assert_eq!(catalog.boss.len(), 2);
        assert_eq!(catalog.enemy.len(), 10);
        assert_eq!(catalog.item.len(), 4);
        assert_eq!(catalog.boss[0], Archetype::new(0, 24, 22));
        assert_eq!(catalog.item[0].index, 12);
        assert!(catalog.validate(&GenerationConfig::new(1)).is_ok());
        assert!(Theme::Subway.catalog().validate(&GenerationConfig::new(1)).is_ok());
    }

    #[test]
    fn test_unauthored_theme_fails_validation() {
        let result = Theme::Hospital.catalog().validate(&GenerationConfig::new(1));
        assert!(matches!(result, Err(WarrenError::InvalidConfig(_))));
    }

    #[test]
    fn test_archetypes_must_fit_a_hallway() {
        let mut catalog = Theme::Hotel.catalog();
        catalog.enemy[3] = Archetype::new(5, 20, 3);
        let result = catalog.validate(&GenerationConfig::new(1));
        assert!(matches!(result, Err(WarrenError::InvalidConfig(_))));

        // Wide hallways raise the bar above the default minimum
        let catalog = Theme::Hotel.catalog();
        let wide = GenerationConfig {
            hallway_width: 12,
            min_adjacent_segment: 14,
            ..GenerationConfig::new(1)
        };
        assert!(matches!(
            catalog.validate(&wide),
            Err(WarrenError::InvalidConfig(_))
        ));
        assert!(Theme::Subway.catalog().validate(&wide).is_ok());
    }

    #[test]
    fn test_catalog_rejects_oversized_requests() {
        let catalog = Theme::Hotel.catalog();
        let config = GenerationConfig {
            enemy_rooms: 11,
            ..GenerationConfig::new(1)
        };
        assert!(matches!(
            catalog.validate(&config),
            Err(WarrenError::PoolExhausted {
                pool: "enemy",
                requested: 11,
                available: 10
            })
        ));

        let config = GenerationConfig {
            item_rooms: 5,
            ..GenerationConfig::new(1)
        };
        assert!(catalog.validate(&config).is_err());
    }

    #[test]
    fn test_draw_whole_pool_yields_every_entry_once() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut pool: Vec<usize> = (2..12).collect();
        let drawn = draw_without_replacement("enemy", &mut pool, 10, &mut rng).unwrap();
        assert!(pool.is_empty());
        let unique: HashSet<_> = drawn.iter().collect();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn test_draw_beyond_pool_is_rejected_untouched() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut pool = vec![1, 2, 3];
        let result = draw_without_replacement("item", &mut pool, 4, &mut rng);
        assert!(result.is_err());
        assert_eq!(pool, vec![1, 2, 3]);
    }

    #[test]
    fn test_theme_parsing_and_palettes() {
        assert_eq!("Subway".parse::<Theme>().unwrap(), Theme::Subway);
        assert_eq!(" hotel ".parse::<Theme>().unwrap(), Theme::Hotel);
        assert!(matches!(
            "castle".parse::<Theme>(),
            Err(WarrenError::UnknownTheme(_))
        ));
        assert_ne!(Theme::Hotel.palette(), Theme::Subway.palette());
        assert_eq!(Theme::Hotel.to_string(), "hotel");
    }
}
