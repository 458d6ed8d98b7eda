//! Road registry and the road connector.
//!
//! The connector finds the fewest new road cells that link a footprint to the
//! existing network. A cell counts as connected when it sits on the board's
//! outer ring or touches a road, either on the board or in the registry.

use crate::land::*;
use crate::location::*;
use fnv::FnvHashSet;
use pathfinding::directed::bfs::bfs;
use serde::{Deserialize, Serialize};

/// Road cells the engine has caused to be built. Only ever grows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadRegistry {
    cells: FnvHashSet<Location>,
}

impl RoadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, loc: &Location) -> bool {
        self.cells.contains(loc)
    }

    pub fn insert(&mut self, loc: Location) -> bool {
        self.cells.insert(loc)
    }

    pub fn extend<I: IntoIterator<Item = Location>>(&mut self, cells: I) {
        self.cells.extend(cells);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> + '_ {
        self.cells.iter()
    }

    pub fn is_superset(&self, other: &RoadRegistry) -> bool {
        self.cells.is_superset(&other.cells)
    }
}

/// A road cell on the board or in the registry.
pub fn is_existing_road(loc: Location, land: &dyn LandView, registry: &RoadRegistry) -> bool {
    land.is_road(loc) || registry.contains(&loc)
}

/// A cell from which the rest of the network can be reached.
fn is_road_accessible(loc: Location, land: &dyn LandView, registry: &RoadRegistry) -> bool {
    land.on_perimeter(loc)
        || loc
            .neighbors()
            .iter()
            .any(|n| is_existing_road(*n, land, registry))
}

/// Shortest set of new road cells linking `footprint` to the network.
///
/// Returns `Some` with an empty set if the footprint already touches road or
/// the perimeter, `Some(path)` for the cells to build, and `None` when every
/// route is blocked.
pub fn find_shortest_road(
    footprint: &[Location],
    land: &dyn LandView,
    registry: &RoadRegistry,
) -> Option<FnvHashSet<Location>> {
    if footprint
        .iter()
        .any(|c| is_road_accessible(*c, land, registry))
    {
        return Some(FnvHashSet::default());
    }

    let footprint_cells: FnvHashSet<Location> = footprint.iter().copied().collect();
    let passable = |loc: &Location| {
        land.unoccupied(*loc) && !registry.contains(loc) && !footprint_cells.contains(loc)
    };

    // `None` is a virtual source standing for the whole footprint, so a single
    // search covers every starting cell.
    let path = bfs(
        &None,
        |node: &Option<Location>| -> Vec<Option<Location>> {
            match node {
                None => neighbors_of(footprint)
                    .into_iter()
                    .filter(|n| passable(n))
                    .map(Some)
                    .collect(),
                Some(loc) => loc
                    .neighbors()
                    .into_iter()
                    .filter(|n| passable(n))
                    .map(Some)
                    .collect(),
            }
        },
        |node: &Option<Location>| match node {
            None => false,
            Some(loc) => is_road_accessible(*loc, land, registry),
        },
    )?;

    Some(path.into_iter().flatten().collect())
}

/// Whether the footprint can reach the network once `road` is built: it
/// touches existing road, the perimeter, or one of the new road cells.
pub fn has_road_connection(
    footprint: &[Location],
    land: &dyn LandView,
    registry: &RoadRegistry,
    road: &FnvHashSet<Location>,
) -> bool {
    footprint.iter().any(|cell| {
        land.on_perimeter(*cell)
            || cell
                .neighbors()
                .iter()
                .any(|n| road.contains(n) || is_existing_road(*n, land, registry))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::Shape;

    fn cells(list: &[(i32, i32)]) -> Vec<Location> {
        list.iter().map(|&(r, c)| Location::new(r, c)).collect()
    }

    #[test]
    fn perimeter_footprint_needs_no_road() {
        let land = Land::new(6);
        let registry = RoadRegistry::new();

        let road = find_shortest_road(&cells(&[(0, 2), (1, 2)]), &land, &registry).unwrap();

        assert!(road.is_empty());
    }

    #[test]
    fn footprint_touching_registry_needs_no_road() {
        let land = Land::new(7);
        let mut registry = RoadRegistry::new();
        registry.insert(Location::new(2, 3));

        let road = find_shortest_road(&cells(&[(3, 3)]), &land, &registry).unwrap();

        assert!(road.is_empty());
    }

    #[test]
    fn interior_footprint_gets_shortest_path_to_edge() {
        let land = Land::new(9);
        let registry = RoadRegistry::new();
        let footprint =
            Shape::new([(0, 0), (0, 1), (1, 0), (1, 1)]).footprint_at(Location::new(3, 3));

        let road = find_shortest_road(&footprint, &land, &registry).unwrap();

        // Top edge is closest: rows 2, 1 and the ring cell at row 0.
        assert_eq!(road.len(), 3);
        assert!(road.contains(&Location::new(0, 3)) || road.contains(&Location::new(0, 4)));
        assert!(road.iter().all(|c| land.unoccupied(*c)));
        assert!(has_road_connection(&footprint, &land, &registry, &road));
    }

    #[test]
    fn prefers_nearby_board_road_over_edge() {
        let land = Land::parse(&[
            ".........",
            ".........",
            ".........",
            ".........",
            "....#....",
            ".........",
            ".........",
            ".........",
            ".........",
        ])
        .unwrap();
        let registry = RoadRegistry::new();

        let road = find_shortest_road(&cells(&[(4, 2)]), &land, &registry).unwrap();

        assert_eq!(road.len(), 1);
        assert!(road.contains(&Location::new(4, 3)));
    }

    #[test]
    fn sealed_footprint_is_infeasible() {
        let land = Land::parse(&[
            ".......",
            ".rrrrr.",
            ".r...r.",
            ".r...r.",
            ".r...r.",
            ".rrrrr.",
            ".......",
        ])
        .unwrap();
        let registry = RoadRegistry::new();

        assert!(find_shortest_road(&cells(&[(3, 3)]), &land, &registry).is_none());
        assert!(!has_road_connection(
            &cells(&[(3, 3)]),
            &land,
            &registry,
            &FnvHashSet::default()
        ));
    }

    #[test]
    fn registry_only_grows() {
        let mut registry = RoadRegistry::new();
        registry.extend(cells(&[(0, 0), (0, 1)]));
        let before = registry.clone();
        registry.extend(cells(&[(0, 1), (0, 2)]));

        assert_eq!(registry.len(), 3);
        assert!(registry.is_superset(&before));
    }
}
