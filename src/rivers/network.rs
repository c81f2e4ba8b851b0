//! Arena storage for rivers and their segments.
//!
//! Segments link to each other through [`SegmentId`] indices rather than
//! owning pointers, so the upstream/downstream graph has no reference cycles.

use crate::world::CellAddress;

/// Stable handle to a segment inside a [`RiverNetwork`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(usize);

/// Stable handle to a river inside a [`RiverNetwork`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RiverId(usize);

impl SegmentId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl RiverId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One cell of a river's course.
#[derive(Debug, Clone, PartialEq)]
pub struct RiverSegment {
    river: RiverId,
    location: CellAddress,
    /// Starts at 1; grows by one for each tributary merged upstream.
    pub flow: u32,
    upstream: Vec<SegmentId>,
    downstream: Option<SegmentId>,
}

impl RiverSegment {
    pub fn river(&self) -> RiverId {
        self.river
    }

    pub fn location(&self) -> CellAddress {
        self.location
    }

    /// Segments draining into this one. More than one only at a confluence.
    pub fn upstream(&self) -> &[SegmentId] {
        &self.upstream
    }

    pub fn downstream(&self) -> Option<SegmentId> {
        self.downstream
    }
}

/// A river: its segments from spring to terminus.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct River {
    segments: Vec<SegmentId>,
    tributary_of: Option<RiverId>,
}

impl River {
    /// Segments in course order, spring first.
    pub fn segments(&self) -> &[SegmentId] {
        &self.segments
    }

    /// The river this one drains into, if it is a tributary.
    pub fn tributary_of(&self) -> Option<RiverId> {
        self.tributary_of
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Owns every river and segment built for a world.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiverNetwork {
    rivers: Vec<River>,
    segments: Vec<RiverSegment>,
}

impl RiverNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rivers.is_empty()
    }

    pub fn river_count(&self) -> usize {
        self.rivers.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn river(&self, id: RiverId) -> &River {
        &self.rivers[id.0]
    }

    pub fn segment(&self, id: SegmentId) -> &RiverSegment {
        &self.segments[id.0]
    }

    pub fn rivers(&self) -> impl Iterator<Item = (RiverId, &River)> + '_ {
        self.rivers.iter().enumerate().map(|(i, r)| (RiverId(i), r))
    }

    /// Creates an empty river and returns its handle.
    pub fn add_river(&mut self) -> RiverId {
        self.rivers.push(River::default());
        RiverId(self.rivers.len() - 1)
    }

    /// Appends a segment at `location` to `river`.
    ///
    /// # Arguments
    /// * `river` - River the segment belongs to
    /// * `location` - Cell the segment occupies
    /// * `previous` - Upstream segment to link to the new one, if any
    ///
    /// # Returns
    /// Handle of the new segment
    pub fn add_segment(
        &mut self,
        river: RiverId,
        location: CellAddress,
        previous: Option<SegmentId>,
    ) -> SegmentId {
        let id = SegmentId(self.segments.len());
        self.segments.push(RiverSegment {
            river,
            location,
            flow: 1,
            upstream: Vec::new(),
            downstream: None,
        });
        self.rivers[river.0].segments.push(id);

        if let Some(previous) = previous {
            self.set_downstream(previous, id);
        }

        id
    }

    /// Points `segment` at `downstream`, keeping both upstream lists consistent.
    pub fn set_downstream(&mut self, segment: SegmentId, downstream: SegmentId) {
        if let Some(old) = self.segments[segment.0].downstream {
            self.segments[old.0].upstream.retain(|&s| s != segment);
        }
        self.segments[segment.0].downstream = Some(downstream);
        let upstream = &mut self.segments[downstream.0].upstream;
        if !upstream.contains(&segment) {
            upstream.push(segment);
        }
    }

    pub fn set_tributary_of(&mut self, river: RiverId, parent: RiverId) {
        self.rivers[river.0].tributary_of = Some(parent);
    }

    /// Adds `flow` to `from` and every segment downstream of it.
    pub fn add_flow(&mut self, from: SegmentId, flow: u32) {
        let mut current = Some(from);
        while let Some(id) = current {
            let segment = &mut self.segments[id.0];
            segment.flow += flow;
            current = segment.downstream;
        }
    }

    /// Follows downstream links from `from` to the final segment.
    pub fn terminus(&self, from: SegmentId) -> SegmentId {
        let mut current = from;
        while let Some(next) = self.segments[current.0].downstream {
            current = next;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_river(network: &mut RiverNetwork, y: i32, len: i32) -> (RiverId, Vec<SegmentId>) {
        let river = network.add_river();
        let mut previous = None;
        let mut ids = Vec::new();
        for x in 0..len {
            let id = network.add_segment(river, CellAddress::new(x, y), previous);
            ids.push(id);
            previous = Some(id);
        }
        (river, ids)
    }

    #[test]
    fn segments_link_in_course_order() {
        let mut network = RiverNetwork::new();
        let (river, ids) = straight_river(&mut network, 0, 4);

        assert_eq!(network.river(river).segments(), &ids[..]);
        assert_eq!(network.segment(ids[0]).upstream(), &[] as &[SegmentId]);
        assert_eq!(network.segment(ids[0]).downstream(), Some(ids[1]));
        assert_eq!(network.segment(ids[1]).upstream(), &[ids[0]]);
        assert_eq!(network.segment(ids[3]).downstream(), None);
        assert_eq!(network.terminus(ids[0]), ids[3]);
        assert!(ids.iter().all(|&id| network.segment(id).flow == 1));
    }

    #[test]
    fn relinking_downstream_keeps_upstream_lists_consistent() {
        let mut network = RiverNetwork::new();
        let (_, a) = straight_river(&mut network, 0, 3);
        let (_, b) = straight_river(&mut network, 1, 3);

        network.set_downstream(a[1], b[2]);

        assert_eq!(network.segment(a[1]).downstream(), Some(b[2]));
        assert!(network.segment(a[2]).upstream().is_empty());
        assert_eq!(network.segment(b[2]).upstream(), &[b[1], a[1]]);
    }

    #[test]
    fn add_flow_runs_to_terminus() {
        let mut network = RiverNetwork::new();
        let (_, ids) = straight_river(&mut network, 0, 5);

        network.add_flow(ids[2], 1);

        let flows: Vec<u32> = ids.iter().map(|&id| network.segment(id).flow).collect();
        assert_eq!(flows, vec![1, 1, 2, 2, 2]);
    }
}
