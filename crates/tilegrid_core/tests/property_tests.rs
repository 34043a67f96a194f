//! Property tests for persistence of arbitrary grid histories.

use proptest::prelude::*;
use tilegrid_core::prelude::*;
use tilegrid_test_utils::determinism::{apply_all, strategies::arb_op_sequence};
use tilegrid_test_utils::fixtures::{grid_with_config, sweep_until_idle};

const SIZE: u16 = 10;

fn flattened_tiles(grid: &LandscapeGrid) -> usize {
    (0..grid.height())
        .flat_map(|y| (0..grid.width()).map(move |x| (x, y)))
        .filter(|&(x, y)| grid.landscape_type(x, y) == LandscapeType::Flattened)
        .count()
}

// =============================================================================
// Snapshot restore
// =============================================================================

proptest! {
    #[test]
    fn test_restore_keeps_durable_state(ops in arb_op_sequence(SIZE, SIZE, 120)) {
        let config = GridConfig::new(SIZE, SIZE).with_seed(17);
        let mut grid = grid_with_config(&config);
        apply_all(&mut grid, &ops);

        let restored = LandscapeGrid::from_bytes(&grid.to_bytes().unwrap(), &config).unwrap();
        prop_assert_eq!(restored.snapshot(), grid.snapshot());
    }

    #[test]
    fn test_restore_queues_every_flattened_tile(ops in arb_op_sequence(SIZE, SIZE, 120)) {
        let config = GridConfig::new(SIZE, SIZE).with_seed(17);
        let mut grid = grid_with_config(&config);
        apply_all(&mut grid, &ops);

        let mut restored = LandscapeGrid::from_bytes(&grid.to_bytes().unwrap(), &config).unwrap();
        prop_assert_eq!(restored.decay_queue_len(), flattened_tiles(&restored));

        // restored counters start at 0 and nothing is protected
        let sweeps = sweep_until_idle(&mut restored, 100);
        prop_assert!(sweeps <= 30, "took {} sweeps", sweeps);
        prop_assert_eq!(restored.decay_queue_len(), 0);
    }
}
