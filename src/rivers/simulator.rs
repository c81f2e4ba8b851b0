//! Spring placement and downhill river tracing.

use std::collections::HashSet;

use log::debug;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::config::RiverConfig;
use super::network::{RiverId, SegmentId};
use crate::error::GenerationError;
use crate::noise::seeded_rng;
use crate::pipeline::Generator;
use crate::world::{CellAddress, HeightCell, HeightWorld, RainfallCell, RiverCell, RiverWorld};

const SPRING_STREAM: &str = "springs";
const RIVER_STREAM: &str = "rivers";

/// How the trace from one spring ended.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceOutcome {
    /// The path reached a cell below sea level; the ocean cell is the last entry.
    ReachedOcean(Vec<CellAddress>),
    /// The path ran into an existing river at `confluence`.
    Merged {
        path: Vec<CellAddress>,
        confluence: SegmentId,
    },
    /// No in-range, unvisited, non-uphill neighbour was left.
    DeadEnd,
    /// The path ended before reaching the minimum length.
    TooShort,
}

/// Counts of how every spring's trace ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiverStats {
    pub springs: usize,
    pub reached_ocean: usize,
    pub merged: usize,
    pub dead_ends: usize,
    pub too_short: usize,
}

impl RiverStats {
    /// Rivers kept in the network.
    pub fn accepted(&self) -> usize {
        self.reached_ocean + self.merged
    }
}

/// Places springs in proportion to rainfall and runs each one downhill.
#[derive(Debug, Clone, Default)]
pub struct SimpleRiverSimulator {
    pub config: RiverConfig,
}

impl SimpleRiverSimulator {
    pub fn new(config: RiverConfig) -> Self {
        Self { config }
    }

    /// Picks spring locations over land.
    ///
    /// Each land cell, visited column by column, becomes a spring with
    /// probability `rainfall * spring_chance_modifier`.
    pub fn place_springs<W>(&self, world: &W) -> Vec<CellAddress>
    where
        W: HeightWorld,
        W::Cell: HeightCell + RainfallCell,
    {
        let mut rng = seeded_rng(world.seed(), SPRING_STREAM);
        let mut springs = Vec::new();

        for x in 0..world.width() {
            for y in 0..world.height() {
                if world.is_ocean(x, y) {
                    continue;
                }
                let chance = world.cell(x, y).rainfall() as f64 * self.config.spring_chance_modifier;
                if rng.random::<f64>() <= chance {
                    springs.push(CellAddress::new(x as i32, y as i32));
                }
            }
        }

        springs
    }

    /// Walks downhill from `spring` without modifying the world.
    ///
    /// Every trace draws from a freshly seeded stream, so two springs facing
    /// the same choices make the same picks.
    ///
    /// # Arguments
    /// * `world` - World to trace over; existing river segments are merge targets
    /// * `spring` - Land cell the river rises at
    ///
    /// # Returns
    /// Where the walk ended, with the path when it is worth keeping
    pub fn trace_river<W>(&self, world: &W, spring: CellAddress) -> TraceOutcome
    where
        W: HeightWorld,
        W::Cell: HeightCell + RiverCell,
    {
        let mut rng = seeded_rng(world.seed(), RIVER_STREAM);
        let min_length = self.config.min_length;

        let mut path = Vec::new();
        let mut visited = HashSet::new();
        let mut current = spring;

        loop {
            let (x, y) = (current.x as usize, current.y as usize);
            if world.is_ocean(x, y) {
                path.push(current);
                break;
            }

            if let Some(confluence) = world.cell(x, y).river_segment() {
                if path.len() >= min_length {
                    return TraceOutcome::Merged { path, confluence };
                }
                return TraceOutcome::TooShort;
            }

            path.push(current);
            visited.insert(current);

            match pick_next_location(world, current, &visited, &mut rng) {
                Some(next) => current = next,
                None => return TraceOutcome::DeadEnd,
            }
        }

        if path.len() < min_length {
            TraceOutcome::TooShort
        } else {
            TraceOutcome::ReachedOcean(path)
        }
    }

    /// Registers a finished trace on the world.
    ///
    /// Returns the new river's id, or `None` for outcomes that are discarded.
    pub fn commit<W>(&self, world: &mut W, outcome: TraceOutcome) -> Option<RiverId>
    where
        W: RiverWorld,
        W::Cell: RiverCell,
    {
        match outcome {
            TraceOutcome::ReachedOcean(path) => commit_path(world, &path).map(|(river, _)| river),
            TraceOutcome::Merged { path, confluence } => {
                let (river, last) = commit_path(world, &path)?;
                let network = world.rivers_mut();
                network.set_downstream(last, confluence);
                let parent = network.segment(confluence).river();
                network.set_tributary_of(river, parent);
                network.add_flow(confluence, 1);
                Some(river)
            }
            TraceOutcome::DeadEnd | TraceOutcome::TooShort => None,
        }
    }

    /// Places springs and traces every one of them, in placement order.
    pub fn simulate<W>(&self, world: &mut W) -> RiverStats
    where
        W: HeightWorld + RiverWorld,
        W::Cell: HeightCell + RainfallCell + RiverCell,
    {
        let springs = self.place_springs(world);
        let mut stats = RiverStats {
            springs: springs.len(),
            ..Default::default()
        };

        for spring in springs {
            let outcome = self.trace_river(world, spring);
            match &outcome {
                TraceOutcome::ReachedOcean(_) => stats.reached_ocean += 1,
                TraceOutcome::Merged { .. } => stats.merged += 1,
                TraceOutcome::DeadEnd => stats.dead_ends += 1,
                TraceOutcome::TooShort => stats.too_short += 1,
            }
            self.commit(world, outcome);
        }

        stats
    }
}

impl<W> Generator<W> for SimpleRiverSimulator
where
    W: HeightWorld + RiverWorld,
    W::Cell: HeightCell + RainfallCell + RiverCell,
{
    fn name(&self) -> &str {
        "Simple River Simulator"
    }

    fn run_generation(&self, world: &mut W) -> Result<(), GenerationError> {
        self.config.validate()?;
        let stats = self.simulate(world);
        debug!(
            "{} springs: {} reached the ocean, {} merged, {} dead ends, {} too short",
            stats.springs, stats.reached_ocean, stats.merged, stats.dead_ends, stats.too_short
        );
        Ok(())
    }
}

/// Appends `path` as a new river. Cells already holding a segment keep it.
fn commit_path<W>(world: &mut W, path: &[CellAddress]) -> Option<(RiverId, SegmentId)>
where
    W: RiverWorld,
    W::Cell: RiverCell,
{
    if path.is_empty() {
        return None;
    }

    let river = world.rivers_mut().add_river();
    let mut previous = None;
    for &address in path {
        let segment = world.rivers_mut().add_segment(river, address, previous);
        let cell = world.cell_mut(address.x as usize, address.y as usize);
        if cell.river_segment().is_none() {
            cell.set_river_segment(segment);
        }
        previous = Some(segment);
    }

    previous.map(|last| (river, last))
}

/// Chooses the next cell of a river's course.
///
/// An adjacent ocean always wins. Otherwise only neighbours no higher than the
/// current cell qualify; the first one already carrying a river is taken so
/// the trace merges, and failing that one is picked at random.
fn pick_next_location<W>(
    world: &W,
    current: CellAddress,
    visited: &HashSet<CellAddress>,
    rng: &mut ChaCha8Rng,
) -> Option<CellAddress>
where
    W: HeightWorld,
    W::Cell: HeightCell + RiverCell,
{
    let mut eligible = Vec::with_capacity(4);
    let mut oceans = Vec::with_capacity(4);

    for n in current.orthogonal_neighbors() {
        if !world.in_range(n.x, n.y) || visited.contains(&n) {
            continue;
        }
        eligible.push(n);
        if world.is_ocean(n.x as usize, n.y as usize) {
            oceans.push(n);
        }
    }

    if !oceans.is_empty() {
        return Some(oceans[rng.random_range(0..oceans.len())]);
    }

    let current_height = world.cell(current.x as usize, current.y as usize).height();
    eligible.retain(|n| world.cell(n.x as usize, n.y as usize).height() <= current_height);

    if let Some(&joined) = eligible
        .iter()
        .find(|n| world.cell(n.x as usize, n.y as usize).river_segment().is_some())
    {
        return Some(joined);
    }

    if eligible.is_empty() {
        return None;
    }
    Some(eligible[rng.random_range(0..eligible.len())])
}
