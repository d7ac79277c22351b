use std::collections::VecDeque;

use fog_maze_core::{
    CellCoord, Command, Direction, Event, Level, LevelCode, LevelError, LevelSource,
    ViewportConfig,
};
use fog_maze_system_levels::{CatalogError, LevelCatalog};
use fog_maze_world::{self as world, query, World};

const PACK: &str = r#"
[[levels]]
rows = ["010", "009"]

[[levels]]
rows = ["0000", "1109"]
"#;

#[test]
fn toml_pack_loads_levels_in_order() {
    let catalog = LevelCatalog::from_toml_str(PACK).expect("pack parses");

    assert_eq!(catalog.len(), 2);
    let first = catalog.level(0).expect("first level");
    assert_eq!((first.width(), first.height()), (3, 2));
    assert_eq!(first.exit(), CellCoord::new(2, 1));
    let second = catalog.level(1).expect("second level");
    assert_eq!(second.exit(), CellCoord::new(3, 1));
}

#[test]
fn toml_pack_rejects_missing_exit() {
    let error = LevelCatalog::from_toml_str("[[levels]]\nrows = [\"00\", \"01\"]\n")
        .expect_err("no exit");

    assert!(matches!(
        error,
        CatalogError::Level(LevelError::MissingExit { level: 0 })
    ));
}

#[test]
fn toml_pack_rejects_malformed_documents() {
    let error = LevelCatalog::from_toml_str("levels = 3").expect_err("wrong shape");
    assert!(matches!(error, CatalogError::Parse(_)));
}

#[test]
fn pack_is_read_from_disk() {
    let path = std::env::temp_dir().join(format!("fog-maze-pack-{}.toml", std::process::id()));
    std::fs::write(&path, PACK).expect("write pack");

    let catalog = LevelCatalog::from_path(&path).expect("pack loads");
    std::fs::remove_file(&path).expect("remove pack");

    assert_eq!(catalog.levels().len(), 2);
}

#[test]
fn missing_pack_reports_the_path() {
    let error = LevelCatalog::from_path("does/not/exist.toml").expect_err("missing file");
    assert!(error.to_string().contains("does/not/exist.toml"));
}

#[test]
fn every_builtin_level_can_be_completed() {
    let catalog = LevelCatalog::builtin().expect("built-in levels are valid");
    let levels: Vec<Level> = catalog.levels().to_vec();
    let mut world =
        World::new(ViewportConfig::default(), Box::new(catalog)).expect("world builds");

    for (index, level) in levels.iter().enumerate() {
        assert_eq!(query::level_index(&world), index);
        let path = shortest_route(level);
        let mut events = Vec::new();
        for direction in &path {
            world::apply(
                &mut world,
                Command::Move {
                    direction: *direction,
                },
                &mut events,
            );
        }

        assert!(
            events.contains(&Event::ExitReached { level: index }),
            "level {index} exit was not reached"
        );
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::PlayerBlocked { .. })));
    }

    assert!(query::is_finished(&world));
    assert_eq!(query::level_index(&world), levels.len() - 1);
}

fn shortest_route(level: &Level) -> Vec<Direction> {
    let start = CellCoord::new(0, 0);
    let cells = level.cells();
    let mut came_from = vec![None; cells.cells().len()];
    let index = |cell: CellCoord| (cell.row() * level.width() + cell.column()) as usize;
    let mut queue = VecDeque::from([start]);

    while let Some(cell) = queue.pop_front() {
        if cell == level.exit() {
            break;
        }
        for direction in Direction::ALL {
            let Some(next) = cell.step(direction) else {
                continue;
            };
            let walkable = matches!(
                cells.get(next),
                Some(LevelCode::Open) | Some(LevelCode::Exit)
            );
            if walkable && next != start && came_from[index(next)].is_none() {
                came_from[index(next)] = Some((cell, direction));
                queue.push_back(next);
            }
        }
    }

    let mut route = Vec::new();
    let mut cursor = level.exit();
    while let Some((previous, direction)) = came_from[index(cursor)] {
        route.push(direction);
        cursor = previous;
    }
    route.reverse();
    assert!(!route.is_empty(), "exit unreachable");
    route
}
