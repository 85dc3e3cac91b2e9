//! Block batch generation
//!
//! Every level gets a brand new batch; nothing carries over from the last one.

use glam::Vec2;
use rand::Rng;

use super::state::{Block, BlockStatus, PowerUp, Rgb};
use crate::tuning::{BreakoutTuning, PongTuning};

/// Uniform random `#RRGGBB` color
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    Rgb([rng.random(), rng.random(), rng.random()])
}

/// Uniform over {none, flame, double_power, speed}
pub fn random_power<R: Rng + ?Sized>(rng: &mut R) -> Option<PowerUp> {
    match rng.random_range(0..4) {
        0 => None,
        1 => Some(PowerUp::Flame),
        2 => Some(PowerUp::DoublePower),
        _ => Some(PowerUp::Speed),
    }
}

/// Breakout grid, stored column-major (column 0 rows 0..n, then column 1, ...)
pub fn breakout_grid<R: Rng + ?Sized>(tuning: &BreakoutTuning, rng: &mut R) -> Vec<Block> {
    let size = Vec2::new(tuning.block_width, tuning.block_height);
    let mut blocks = Vec::with_capacity(tuning.block_count());
    for c in 0..tuning.block_columns {
        for r in 0..tuning.block_rows {
            let x = c as f32 * (tuning.block_width + tuning.block_padding) + tuning.block_offset_left;
            let y = r as f32 * (tuning.block_height + tuning.block_padding) + tuning.block_offset_top;
            blocks.push(Block {
                pos: Vec2::new(x, y),
                size,
                status: BlockStatus::Active,
                color: random_color(rng),
                power: random_power(rng),
            });
        }
    }
    blocks
}

/// Placement tries per pong block before an overlap is accepted
const SCATTER_ATTEMPTS: usize = 1000;

/// Pong blocks scattered uniformly inside a region centred on the field.
///
/// Each block is redrawn until it clears the ones already placed, so the
/// ball can never touch two blocks at once.
pub fn pong_scatter<R: Rng + ?Sized>(tuning: &PongTuning, rng: &mut R) -> Vec<Block> {
    let size = Vec2::new(tuning.block_width, tuning.block_height);
    let region = Vec2::new(tuning.block_region_width, tuning.block_region_height);
    let origin = (tuning.field() - region) / 2.0;
    let span = region - size;

    let mut blocks: Vec<Block> = Vec::with_capacity(tuning.block_count);
    for _ in 0..tuning.block_count {
        let mut pos = origin;
        let mut placed = false;
        for _ in 0..SCATTER_ATTEMPTS {
            pos = origin + Vec2::new(rng.random::<f32>() * span.x, rng.random::<f32>() * span.y);
            if !blocks.iter().any(|b| overlaps(b.pos, b.size, pos, size)) {
                placed = true;
                break;
            }
        }
        if !placed {
            log::warn!("Scatter region too crowded, block {} overlaps", blocks.len());
        }
        blocks.push(Block {
            pos,
            size,
            status: BlockStatus::Active,
            color: random_color(rng),
            power: None,
        });
    }
    blocks
}

/// Strict rectangle overlap; shared edges do not count
fn overlaps(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && b_pos.x < a_pos.x + a_size.x
        && a_pos.y < b_pos.y + b_size.y
        && b_pos.y < a_pos.y + a_size.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_grid_layout() {
        let tuning = BreakoutTuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let blocks = breakout_grid(&tuning, &mut rng);

        assert_eq!(blocks.len(), 35);
        assert!(blocks.iter().all(Block::is_active));
        // Column-major: index 1 is column 0, row 1
        assert_eq!(blocks[0].pos, Vec2::new(35.0, 30.0));
        assert_eq!(blocks[1].pos, Vec2::new(35.0, 60.0));
        assert_eq!(blocks[5].pos, Vec2::new(120.0, 30.0));
        assert_eq!(blocks[34].pos, Vec2::new(545.0, 150.0));
    }

    #[test]
    fn test_grid_colors_are_hex() {
        let mut rng = Pcg32::seed_from_u64(99);
        for block in breakout_grid(&BreakoutTuning::default(), &mut rng) {
            let hex = block.color.to_string();
            assert_eq!(hex.len(), 7);
            assert!(hex.starts_with('#'));
            assert!(hex[1..].chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_power_distribution_covers_all_tags() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut seen = [0usize; 4];
        for _ in 0..400 {
            let slot = match random_power(&mut rng) {
                None => 0,
                Some(PowerUp::Flame) => 1,
                Some(PowerUp::DoublePower) => 2,
                Some(PowerUp::Speed) => 3,
            };
            seen[slot] += 1;
        }
        assert!(seen.iter().all(|&n| n > 50), "skewed distribution: {seen:?}");
    }

    #[test]
    fn test_scatter_stays_in_region() {
        let tuning = PongTuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let blocks = pong_scatter(&tuning, &mut rng);

        assert_eq!(blocks.len(), tuning.block_count);
        for block in &blocks {
            assert!(block.is_active());
            assert!(block.power.is_none());
            assert!(block.pos.x >= 250.0 && block.pos.x + block.size.x <= 550.0);
            assert!(block.pos.y >= 100.0 && block.pos.y + block.size.y <= 300.0);
        }
    }

    #[test]
    fn test_scatter_never_overlaps() {
        let tuning = PongTuning::default();
        for seed in 0..50 {
            let blocks = pong_scatter(&tuning, &mut Pcg32::seed_from_u64(seed));
            for (i, a) in blocks.iter().enumerate() {
                for b in &blocks[i + 1..] {
                    assert!(
                        !overlaps(a.pos, a.size, b.pos, b.size),
                        "seed {seed}: {:?} overlaps {:?}",
                        a.pos,
                        b.pos
                    );
                }
            }
        }
    }

    #[test]
    fn test_crowded_scatter_still_fills_batch() {
        let tuning = PongTuning {
            block_count: 10,
            block_width: 300.0,
            block_height: 200.0,
            ..PongTuning::default()
        };
        let blocks = pong_scatter(&tuning, &mut Pcg32::seed_from_u64(5));
        assert_eq!(blocks.len(), 10);
    }

    #[test]
    fn test_same_seed_same_batch() {
        let tuning = BreakoutTuning::default();
        let a = breakout_grid(&tuning, &mut Pcg32::seed_from_u64(42));
        let b = breakout_grid(&tuning, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
