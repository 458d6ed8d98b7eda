//! Cutoff analysis: how many empty cells a move would seal off from the road
//! network.
//!
//! Every cell a move consumes (footprint, road, park, pond) is treated as
//! built. The empty cells bordering that construction are grouped into
//! 4-connected components of empty, unconsumed cells. A component stays
//! reachable if one of its cells is on the perimeter, or touches a road on the
//! board or in the move's new road set.

use crate::land::*;
use crate::location::*;
use crate::moves::Move;
use fnv::FnvHashSet;

/// Total number of cells in components the move would cut off.
pub fn count_cells_cut_off(mv: &Move, land: &dyn LandView) -> usize {
    cutoff_components(mv, land).iter().map(Vec::len).sum()
}

/// The individual components the move would cut off, each in discovery
/// order.
pub fn cutoff_components(mv: &Move, land: &dyn LandView) -> Vec<Vec<Location>> {
    let consumed = mv.consumed();
    let mut border: Vec<Location> = consumed.iter().copied().collect();
    border.sort();
    let border = neighbors_of(&border);

    let mut assigned: FnvHashSet<Location> = FnvHashSet::default();
    let mut cut_off = Vec::new();

    for start in border {
        if assigned.contains(&start) || !is_open(start, land, &consumed) {
            continue;
        }

        let component = connected_empty_cells(start, land, &consumed);
        assigned.extend(component.iter().copied());

        if !is_connected_to_road(&component, land, &mv.road) {
            cut_off.push(component);
        }
    }

    cut_off
}

#[inline]
fn is_open(loc: Location, land: &dyn LandView, consumed: &FnvHashSet<Location>) -> bool {
    land.unoccupied(loc) && !consumed.contains(&loc)
}

/// Depth-first collection of the empty, unconsumed cells reachable from
/// `start`.
fn connected_empty_cells(
    start: Location,
    land: &dyn LandView,
    consumed: &FnvHashSet<Location>,
) -> Vec<Location> {
    let mut visited: FnvHashSet<Location> = FnvHashSet::default();
    let mut stack = vec![start];
    let mut component = Vec::new();
    visited.insert(start);

    while let Some(cell) = stack.pop() {
        component.push(cell);

        for n in cell.neighbors() {
            if is_open(n, land, consumed) && visited.insert(n) {
                stack.push(n);
            }
        }
    }

    component
}

fn is_connected_to_road(
    component: &[Location],
    land: &dyn LandView,
    new_road: &FnvHashSet<Location>,
) -> bool {
    component.iter().any(|cell| {
        land.on_perimeter(*cell)
            || cell
                .neighbors()
                .iter()
                .any(|n| land.is_road(*n) || new_road.contains(n))
    })
}
