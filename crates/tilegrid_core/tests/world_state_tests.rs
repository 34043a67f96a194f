//! World state tests across terrain, resources, blocking and persistence.

use tilegrid_core::prelude::*;
use tilegrid_test_utils::determinism::{apply_all, verify_determinism, GridOp};
use tilegrid_test_utils::fixtures::{grid, grid_with_config, paint_rect, tread_path, ChangeLog};

// =============================================================================
// Change notifications
// =============================================================================

#[test]
fn test_notifications_follow_mutation_order() {
    let mut grid = grid(10, 10);
    let log = ChangeLog::attach(&mut grid);

    grid.set_height_at(2, 2, 4);
    grid.set_landscape_type(3, 3, LandscapeType::Mountain, false);
    grid.set_resource(3, 3, ResourceType::Coal, 8);
    assert!(grid.try_consume_one(TilePos::new(3, 3), ResourceType::Coal));
    grid.set_blocked_partition(5, 5, 2);
    assert!(!grid.try_consume_one(TilePos::new(3, 3), ResourceType::IronOre));

    assert_eq!(
        log.events(),
        vec![(2, 2, 1), (3, 3, 1), (3, 3, 1), (3, 3, 1)]
    );
}

#[test]
fn test_rejected_operations_are_silent() {
    let mut grid = grid(10, 10);
    paint_rect(&mut grid, 0, 0, 10, 2, LandscapeType::Water5);
    let log = ChangeLog::attach(&mut grid);

    assert!(!grid.set_landscape_type(4, 2, LandscapeType::Flattened, true));
    assert!(!grid.try_cursing_location(TilePos::new(4, 4)));
    assert!(!grid.try_summon_fish(TilePos::new(4, 0)));
    assert!(!grid.try_consume_one(TilePos::new(4, 4), ResourceType::Coal));
    assert!(log.is_empty());
}

// =============================================================================
// Resources and spells
// =============================================================================

#[test]
fn test_mining_a_mountain() {
    let mut grid = grid(10, 10);
    paint_rect(&mut grid, 4, 4, 3, 3, LandscapeType::Mountain);
    let deposit: Vec<TilePos> = (4..7)
        .flat_map(|y| (4..7).map(move |x| TilePos::new(x, y)))
        .collect();
    for pos in &deposit {
        grid.set_resource(pos.x, pos.y, ResourceType::IronOre, 10);
    }
    assert_eq!(
        grid.sum_resource(ResourceType::IronOre, deposit.iter().copied()),
        90
    );

    let mut mined = 0;
    for pos in &deposit {
        while grid.try_consume_one(*pos, ResourceType::IronOre) {
            mined += 1;
        }
    }
    assert_eq!(mined, 90);
    assert_eq!(
        grid.sum_resource(ResourceType::IronOre, deposit.iter().copied()),
        0
    );
}

#[test]
fn test_curse_and_summon_with_custom_tuning() {
    let config = GridConfig::new(10, 10).with_spells(SpellTuning {
        curse_mountain_percent: 25,
        summon_fish_amount: 3,
    });
    let mut grid = grid_with_config(&config);
    grid.set_landscape_type(2, 2, LandscapeType::Mountain, false);
    grid.set_resource(2, 2, ResourceType::GoldOre, 15);
    grid.set_landscape_type(7, 7, LandscapeType::Water1, false);

    assert!(grid.try_cursing_location(TilePos::new(2, 2)));
    // 15 * 0.25 = 3.75, truncated
    assert_eq!(grid.resource_amount(2, 2), 3);

    for _ in 0..4 {
        assert!(grid.try_summon_fish(TilePos::new(7, 7)));
    }
    assert_eq!(grid.resource_type(7, 7), ResourceType::Fish);
    assert_eq!(grid.resource_amount(7, 7), 12);
}

// =============================================================================
// Blocking
// =============================================================================

fn reachable(provider: &dyn BlockingProvider, tiles: &[(u16, u16)]) -> usize {
    tiles.iter().filter(|&&(x, y)| !provider.is_blocked(x, y)).count()
}

#[test]
fn test_grid_as_blocking_provider() {
    let mut grid = grid(6, 6);
    for x in 0..6 {
        grid.set_blocked_partition(x, 0, 1);
    }
    grid.set_blocked_partition(2, 0, 0);

    let row: Vec<(u16, u16)> = (0..6).map(|x| (x, 0)).collect();
    assert_eq!(reachable(&grid, &row), 5);
}

// =============================================================================
// Config and persistence
// =============================================================================

#[test]
fn test_config_file_to_grid_to_snapshot_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("grid.ron");
    std::fs::write(
        &config_path,
        "GridConfig(width: 24, height: 16, seed: 99, spells: SpellTuning(summon_fish_amount: 4))",
    )
    .unwrap();

    let config = GridConfig::load(&config_path).unwrap();
    assert_eq!(config.spells.curse_mountain_percent, 50);
    let mut grid = LandscapeGrid::new(&config).unwrap();

    grid.set_landscape_type(3, 3, LandscapeType::Water1, false);
    grid.try_summon_fish(TilePos::new(3, 3));
    grid.set_height_at(20, 15, -3);
    grid.set_blocked_partition(10, 10, 6);
    tread_path(&mut grid, &[TilePos::new(12, 8)], 7);

    let snapshot_path = dir.path().join("grid.bin");
    grid.snapshot().save(&snapshot_path).unwrap();
    let restored =
        LandscapeGrid::from_snapshot(GridSnapshot::load(&snapshot_path).unwrap(), &config).unwrap();

    assert_eq!(restored.resource_amount(3, 3), 4);
    assert_eq!(restored.height_at(20, 15), -3);
    assert_eq!(restored.blocked_partition(10, 10), 6);
    assert_eq!(restored.landscape_type(12, 8), LandscapeType::Flattened);
    assert_eq!(restored.snapshot(), grid.snapshot());
}

#[test]
fn test_restored_grids_continue_in_lockstep() {
    let config = GridConfig::new(16, 16).with_seed(3);
    let mut original = grid_with_config(&config);
    apply_all(
        &mut original,
        &[
            GridOp::SetHeight(1, 1, 5),
            GridOp::FlattenTowards(8, 8, 0),
            GridOp::SetResource(2, 2, ResourceType::Coal, 5),
        ],
    );
    let bytes = original.to_bytes().unwrap();

    let mut a = LandscapeGrid::from_bytes(&bytes, &config).unwrap();
    let mut b = LandscapeGrid::from_bytes(&bytes, &config).unwrap();
    let tail = [
        GridOp::Unprotect(8, 8),
        GridOp::WalkOn(4, 4),
        GridOp::DecaySweep,
        GridOp::DecaySweep,
    ];
    apply_all(&mut a, &tail);
    apply_all(&mut b, &tail);

    assert_eq!(a.state_hash(), b.state_hash());
}

#[test]
fn test_mixed_script_is_deterministic() {
    let mut ops = Vec::new();
    for i in 0..200u16 {
        ops.push(GridOp::WalkOn(i % 7 + 3, i % 5 + 3));
        if i % 17 == 0 {
            ops.push(GridOp::SetLandscape {
                x: i % 11,
                y: i % 13,
                landscape: LandscapeType::Desert,
                checked: true,
            });
        }
        if i % 23 == 0 {
            ops.push(GridOp::FlattenTowards(i % 9, i % 4, 1));
            ops.push(GridOp::Unprotect(i % 9, i % 4));
        }
        if i % 5 == 0 {
            ops.push(GridOp::DecaySweep);
        }
    }

    verify_determinism(4, &GridConfig::new(16, 16).with_seed(11), &ops).assert_deterministic();
}
