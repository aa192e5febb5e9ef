//! Mission segment vocabulary and per-flight segment times.

use std::fmt;

// ── SegmentKind ───────────────────────────────────────────────────────────────

/// The eleven segments of one revenue flight, in flight order.
///
/// Reserve segments (loiter, divert) are sized by the upstream energy
/// analysis but never flown on the common-case path, which is why a profile
/// stores `Option<f64>` per segment: an absent segment simply contributes
/// nothing to the flight time.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentKind {
    DepartTaxi,
    HoverClimb,
    TransClimb,
    DepartProc,
    AccelClimb,
    Cruise,
    DecelDescend,
    ArriveProc,
    TransDescend,
    HoverDescend,
    ArriveTaxi,
}

impl SegmentKind {
    /// All segments in flight order.
    pub const ALL: [SegmentKind; 11] = [
        SegmentKind::DepartTaxi,
        SegmentKind::HoverClimb,
        SegmentKind::TransClimb,
        SegmentKind::DepartProc,
        SegmentKind::AccelClimb,
        SegmentKind::Cruise,
        SegmentKind::DecelDescend,
        SegmentKind::ArriveProc,
        SegmentKind::TransDescend,
        SegmentKind::HoverDescend,
        SegmentKind::ArriveTaxi,
    ];

    /// Position within [`Self::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SegmentKind::DepartTaxi => "depart_taxi",
            SegmentKind::HoverClimb => "hover_climb",
            SegmentKind::TransClimb => "trans_climb",
            SegmentKind::DepartProc => "depart_proc",
            SegmentKind::AccelClimb => "accel_climb",
            SegmentKind::Cruise => "cruise",
            SegmentKind::DecelDescend => "decel_descend",
            SegmentKind::ArriveProc => "arrive_proc",
            SegmentKind::TransDescend => "trans_descend",
            SegmentKind::HoverDescend => "hover_descend",
            SegmentKind::ArriveTaxi => "arrive_taxi",
        };
        f.write_str(name)
    }
}

// ── MissionProfile ────────────────────────────────────────────────────────────

/// Per-segment flight times [s] for one mission, indexed by [`SegmentKind`].
///
/// A `None` entry means the segment is not flown by this profile; sums
/// silently exclude it rather than failing, because not every flight profile
/// uses every segment.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MissionProfile {
    durations_s: [Option<f64>; 11],
}

impl MissionProfile {
    /// An empty profile — every segment absent.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a profile from `(segment, seconds)` pairs.  Later pairs
    /// overwrite earlier ones for the same segment.
    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = (SegmentKind, f64)>,
    {
        let mut profile = Self::empty();
        for (kind, secs) in segments {
            profile.set(kind, secs);
        }
        profile
    }

    /// Set one segment's duration [s].
    pub fn set(&mut self, kind: SegmentKind, secs: f64) {
        self.durations_s[kind.index()] = Some(secs);
    }

    /// One segment's duration [s], if flown.
    #[inline]
    pub fn get(&self, kind: SegmentKind) -> Option<f64> {
        self.durations_s[kind.index()]
    }

    /// Total flight time [h]: the sum of all present segments.
    pub fn flight_duration_hr(&self) -> f64 {
        self.durations_s.iter().flatten().sum::<f64>() / 3_600.0
    }

    /// Elapsed time [h] from departure through the end of `last` (inclusive),
    /// summing only present segments.
    ///
    /// This is the attach window arithmetic: a takeoff ABU that rides
    /// "through accel_climb" detaches `offset_through_hr(AccelClimb)` hours
    /// after departure.
    pub fn offset_through_hr(&self, last: SegmentKind) -> f64 {
        self.durations_s[..=last.index()]
            .iter()
            .flatten()
            .sum::<f64>()
            / 3_600.0
    }

    /// Elapsed time [h] from departure to the *start* of `kind`.
    pub fn offset_to_hr(&self, kind: SegmentKind) -> f64 {
        self.durations_s[..kind.index()]
            .iter()
            .flatten()
            .sum::<f64>()
            / 3_600.0
    }
}
