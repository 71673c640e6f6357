//! Placement tests: zone geometry, packing and command emission

use boardplan::layout::footprints::{ComponentSize, FootprintSizeTable};
use boardplan::layout::zone_policy::ZonePolicy;
use boardplan::layout::zones::{zone_bounds_by_name, BoardGeometry};
use boardplan::prelude::*;
use boardplan::{classify_component, pack, to_commands, zone_bounds, BlockType, BoardZone, GridPacker};
use std::sync::Arc;
use std::thread;

const EPS: f64 = 1e-9;

fn sample_components() -> Vec<ComponentRecord> {
    vec![
        ComponentRecord::new("U1").with_footprint("TQFP-64").with_description("ATmega2560 MCU"),
        ComponentRecord::new("U2").with_footprint("SOIC-8").with_description("RS485 transceiver"),
        ComponentRecord::new("Q1").with_footprint("SOT-23"),
        ComponentRecord::new("F1").with_footprint("1206"),
        ComponentRecord::new("X1").with_value("32.768kHz"),
        ComponentRecord::new("P1"),
        ComponentRecord::new("R1").with_footprint("0402"),
        ComponentRecord::new("C1").with_footprint("0603"),
        ComponentRecord::new("TP1"),
    ]
}

#[test]
fn test_grid_zones_partition_usable_area() {
    let boards = [(100.0, 80.0, 5.0), (50.0, 50.0, 2.5), (333.3, 17.0, 1.0), (12.0, 40.0, 0.0)];

    for (w, h, m) in boards {
        let usable = BoardGeometry::new(w, h, m).usable_area();
        let cells: Vec<_> = BoardZone::GRID.iter().map(|z| zone_bounds(*z, w, h, m)).collect();

        for (i, a) in cells.iter().enumerate() {
            for b in cells.iter().skip(i + 1) {
                assert!(!a.overlaps(b), "Grid cells must not overlap on {}x{} board", w, h);
            }
            assert!(a.x_min >= usable.x_min - EPS && a.x_max <= usable.x_max + EPS);
            assert!(a.y_min >= usable.y_min - EPS && a.y_max <= usable.y_max + EPS);
        }

        let total: f64 = cells.iter().map(|c| c.area()).sum();
        assert!(
            (total - usable.area()).abs() < 1e-6,
            "Cells should cover the usable area of a {}x{} board",
            w,
            h
        );
    }
}

#[test]
fn test_edge_strips_span_usable_area() {
    let left = zone_bounds(BoardZone::LeftEdge, 100.0, 80.0, 5.0);
    assert_eq!(left.as_tuple(), (5.0, 5.0, 15.0, 75.0));

    let top = zone_bounds(BoardZone::TopEdge, 100.0, 80.0, 5.0);
    assert_eq!(top.as_tuple(), (5.0, 65.0, 95.0, 75.0));

    // Strips overlay the grid
    let top_left = zone_bounds(BoardZone::TopLeft, 100.0, 80.0, 5.0);
    assert!(left.overlaps(&top_left));
}

#[test]
fn test_unknown_zone_name_falls_back_to_usable_area() {
    let bounds = zone_bounds_by_name("mezzanine", 100.0, 80.0, 5.0);
    assert_eq!(bounds.as_tuple(), (5.0, 5.0, 95.0, 75.0));

    let named = zone_bounds_by_name("bottom-right", 100.0, 80.0, 5.0);
    assert_eq!(named, zone_bounds(BoardZone::BottomRight, 100.0, 80.0, 5.0));
}

#[test]
fn test_r_and_c_always_passive() {
    let values = ["", "10k", "100nF", "LED", "STM32"];
    let descriptions = ["", "Status LED", "USB ESD", "LDO regulator"];
    let footprints = ["", "0402", "BGA"];

    for prefix in ["R", "C", "r", "c"] {
        for value in values {
            for description in descriptions {
                for footprint in footprints {
                    let designator = format!("{}12", prefix);
                    assert_eq!(
                        classify_component(&designator, value, description, footprint),
                        BlockType::Passive
                    );
                }
            }
        }
    }
}

#[test]
fn test_every_component_placed_once() {
    let components = sample_components();
    let placements = pack(&components, 100.0, 80.0);

    assert_eq!(placements.len(), components.len());
    for comp in &components {
        let count = placements.iter().filter(|p| p.designator == comp.designator).count();
        assert_eq!(count, 1, "{} should be placed exactly once", comp.designator);
    }
}

#[test]
fn test_blocks_follow_declaration_order() {
    let placements = pack(&sample_components(), 100.0, 80.0);
    let blocks: Vec<_> = placements.iter().map(|p| p.block_name.as_str()).collect();
    assert_eq!(
        blocks,
        vec![
            "mcu",
            "interface",
            "analog",
            "protection",
            "timing",
            "connector",
            "passive",
            "passive",
            "other",
        ]
    );
}

#[test]
fn test_placements_inside_assigned_zone() {
    let packer = GridPacker::default();
    let outcome = packer.pack_with_report(&sample_components());
    assert!(outcome.overflows.is_empty());

    let policy = ZonePolicy::default();
    for placement in &outcome.placements {
        let block = BlockType::ALL
            .iter()
            .find(|b| b.as_str() == placement.block_name)
            .copied()
            .unwrap();
        let bounds = packer.geometry().zone_bounds(policy.zone_for(block));
        assert!(placement.x > bounds.x_min && placement.x < bounds.x_max);
        assert!(placement.y > bounds.y_min && placement.y < bounds.y_max);
    }
}

#[test]
fn test_pack_is_idempotent() {
    let components = sample_components();
    let first = serde_json::to_string(&pack(&components, 120.0, 90.0)).unwrap();
    let second = serde_json::to_string(&pack(&components, 120.0, 90.0)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_concurrent_packing_is_deterministic() {
    let components = Arc::new(sample_components());
    let expected = pack(&components, 100.0, 80.0);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let components = Arc::clone(&components);
            thread::spawn(move || GridPacker::default().pack(&components))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_board_size_changes_coordinates() {
    let components = vec![ComponentRecord::new("R1").with_footprint("0402")];
    let small = pack(&components, 100.0, 80.0);
    let large = pack(&components, 200.0, 160.0);
    assert_ne!(small[0].x, large[0].x);
    assert_ne!(small[0].y, large[0].y);
}

#[test]
fn test_custom_footprint_table() {
    let sizes = FootprintSizeTable::default().with_footprint("SOT-223", ComponentSize::new(6.5, 3.5));
    let packer = GridPacker::default().with_sizes(sizes);
    let placements = packer.pack(&[ComponentRecord::new("U1")
        .with_footprint("SOT-223")
        .with_description("LDO regulator")]);

    // Bottom-left cell starts at x = 5, top at 5 + 70 / 3
    assert_eq!(placements[0].x, 10.25);
    assert_eq!(placements[0].y, 24.58);
}

#[test]
fn test_commands_preserve_order() {
    let placements = pack(&sample_components(), 100.0, 80.0);
    let commands = to_commands(&placements);
    let designators: Vec<_> = commands.iter().map(|c| c.parameters.designator.as_str()).collect();
    let expected: Vec<_> = placements.iter().map(|p| p.designator.as_str()).collect();
    assert_eq!(designators, expected);

    let json = serde_json::to_value(&commands[0]).unwrap();
    assert_eq!(json["command"], "move_component");
    assert_eq!(json["parameters"]["layer"], "Top");
    assert_eq!(json["parameters"]["rotation"], 0.0);
}
