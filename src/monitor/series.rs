use std::collections::VecDeque;

pub const DEFAULT_CAPACITY: usize = 60;

/// One chart sample. All fields are finite; percentages live in `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesPoint {
    pub t_secs: f64,
    pub cpu_pct: f64,
    pub mem_pct: f64,
}

impl SeriesPoint {
    fn is_well_formed(&self) -> bool {
        self.t_secs.is_finite()
            && self.cpu_pct.is_finite()
            && self.mem_pct.is_finite()
            && (0.0..=100.0).contains(&self.cpu_pct)
            && (0.0..=100.0).contains(&self.mem_pct)
    }
}

/// Bounded chronological history backing the chart. Size never exceeds the
/// capacity fixed at construction; timestamps are strictly increasing at
/// all times.
#[derive(Debug)]
pub struct RollingSeries {
    points: VecDeque<SeriesPoint>,
    capacity: usize,
}

impl RollingSeries {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        RollingSeries {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a point, evicting the oldest when full. Points that are not
    /// well-formed, or whose timestamp does not advance past the newest
    /// entry, are dropped so the buffer invariants hold unconditionally.
    pub fn append(&mut self, point: SeriesPoint) {
        if !point.is_well_formed() {
            debug_assert!(false, "malformed series point: {point:?}");
            return;
        }
        if let Some(last) = self.points.back()
            && point.t_secs <= last.t_secs
        {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    /// Copy of the buffer in chronological order.
    pub fn snapshot(&self) -> Vec<SeriesPoint> {
        self.points.iter().copied().collect()
    }

    pub fn last(&self) -> Option<&SeriesPoint> {
        self.points.back()
    }

    /// Empties the buffer; capacity is unchanged and any finite timestamp
    /// is accepted afterwards.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for RollingSeries {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
