//! `AbuPool` — a fixed-size arena of units plus a FIFO wait queue.
//!
//! # Why an arena
//!
//! The pool is the simulator's one genuinely shared mutable resource.
//! Holding the units in a `Vec` indexed by `AbuId` (instead of a map keyed
//! by ad-hoc indices) makes every lookup O(1), keeps iteration order equal
//! to unit-index order — which *is* the tie-break rule when several units
//! free up at the same instant — and lets the conservation invariant be
//! checked by summing four counters against `units.len()`.
//!
//! # Queue discipline
//!
//! Acquisitions are strictly FIFO: a request that cannot be met immediately
//! is appended, and freed units are only ever offered to the oldest waiting
//! request.  A head request that needs more units than are idle blocks the
//! queue (no later request may overtake it), so there is no priority
//! inversion and no preemption of in-flight acquisitions.

use std::collections::VecDeque;

use abu_charge::{charge_time, BatteryPack, ChargeEvent, Charger};
use abu_core::{AbuId, FlightId, SimTime};

use crate::{AbuState, AbuUnit, PoolError, PoolResult};

// ── Request / grant records ───────────────────────────────────────────────────

/// One queued acquisition request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingRequest {
    pub flight: FlightId,
    pub units: usize,
    pub requested_at: SimTime,
}

/// A request the pool satisfied — either immediately or from the queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrantedRequest {
    pub flight: FlightId,
    pub units: Vec<AbuId>,
    pub requested_at: SimTime,
}

/// Result of [`AbuPool::acquire`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AcquireOutcome {
    /// Units transitioned to `Attached`; acquisition succeeded with zero wait.
    Granted(Vec<AbuId>),
    /// Not enough idle units (or older requests are still waiting); the
    /// request was appended to the FIFO queue.
    Queued,
}

/// Per-state unit counts, for invariant checks and utilization metrics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StateCounts {
    pub idle: usize,
    pub attached: usize,
    pub returning: usize,
    pub charging: usize,
}

impl StateCounts {
    /// Sum across all states — must always equal the pool size.
    pub fn total(&self) -> usize {
        self.idle + self.attached + self.returning + self.charging
    }
}

// ── AbuPool ───────────────────────────────────────────────────────────────────

/// A fixed-size pool of interchangeable ABU units at one ground node.
///
/// The pool does not know *which* ground node — the scheduler keys its pools
/// by role; the pool only runs the unit lifecycle and the queue discipline.
#[derive(Clone, Debug)]
pub struct AbuPool {
    charger: Charger,
    soc_target: f64,
    soc_cc_to_cv: f64,
    units: Vec<AbuUnit>,
    queue: VecDeque<PendingRequest>,
}

impl AbuPool {
    /// Build a pool of `size` identical units, all `IdleCharged` at the
    /// target SOC.
    ///
    /// `pack_template` supplies the electrical parameters; its SOC is
    /// overwritten with `soc_target` because a day starts with every unit
    /// fully readied.
    pub fn new(
        size: usize,
        pack_template: BatteryPack,
        charger: Charger,
        soc_target: f64,
        soc_cc_to_cv: f64,
    ) -> PoolResult<Self> {
        if size == 0 {
            return Err(PoolError::EmptySize(size));
        }
        let mut template = pack_template;
        template.set_soc(soc_target)?;
        let units = (0..size)
            .map(|i| AbuUnit::new(AbuId(i as u32), template.clone()))
            .collect();
        Ok(Self {
            charger,
            soc_target,
            soc_cc_to_cv,
            units,
            queue: VecDeque::new(),
        })
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn size(&self) -> usize {
        self.units.len()
    }

    pub fn unit(&self, id: AbuId) -> PoolResult<&AbuUnit> {
        self.units.get(id.index()).ok_or(PoolError::UnknownUnit(id))
    }

    /// All units, in unit-index order.
    pub fn units(&self) -> &[AbuUnit] {
        &self.units
    }

    /// Number of requests currently waiting.
    pub fn pending_requests(&self) -> usize {
        self.queue.len()
    }

    /// Per-state counts.  `counts().total() == size()` is the pool
    /// conservation invariant; every mutating method upholds it.
    pub fn counts(&self) -> StateCounts {
        let mut c = StateCounts::default();
        for unit in &self.units {
            match unit.state {
                AbuState::IdleCharged => c.idle += 1,
                AbuState::Attached { .. } => c.attached += 1,
                AbuState::Returning => c.returning += 1,
                AbuState::Charging => c.charging += 1,
            }
        }
        c
    }

    // ── State transitions ─────────────────────────────────────────────────

    /// Request `n` units for `flight`.
    ///
    /// Grants immediately (units → `Attached`, ascending index order) when
    /// `n` units are idle *and* no older request is waiting; otherwise the
    /// request joins the FIFO queue and is granted later by
    /// [`complete_charge`][Self::complete_charge].
    pub fn acquire(
        &mut self,
        flight: FlightId,
        n: usize,
        now: SimTime,
    ) -> PoolResult<AcquireOutcome> {
        if n > self.units.len() {
            return Err(PoolError::RequestExceedsPool {
                requested: n,
                size: self.units.len(),
            });
        }
        if self.queue.is_empty() && self.idle_ids().len() >= n {
            let ids = self.attach_first_idle(flight, n);
            debug_assert_eq!(self.counts().total(), self.size());
            return Ok(AcquireOutcome::Granted(ids));
        }
        self.queue.push_back(PendingRequest {
            flight,
            units: n,
            requested_at: now,
        });
        Ok(AcquireOutcome::Queued)
    }

    /// The aircraft detached `unit`: `Attached → Returning`.  The unit
    /// touches down at its pad `transit` later.
    pub fn release_to_returning(
        &mut self,
        id: AbuId,
        now: SimTime,
        transit: SimTime,
    ) -> PoolResult<()> {
        let unit = self.unit_mut(id)?;
        if !matches!(unit.state, AbuState::Attached { .. }) {
            return Err(PoolError::InvalidTransition {
                unit: id,
                action: "release to returning",
                state: unit.state.name(),
            });
        }
        unit.state = AbuState::Returning;
        unit.ready_at = now + transit;
        Ok(())
    }

    /// The unit landed back at its pad: `Returning → Charging`.
    ///
    /// Sets the pack to its post-mission SOC and computes the recharge
    /// analytically; `ready_at` becomes the charge-completion instant and the
    /// phase breakdown is returned so the scheduler can queue that event.
    pub fn complete_return(
        &mut self,
        id: AbuId,
        now: SimTime,
        post_mission_soc: f64,
    ) -> PoolResult<ChargeEvent> {
        let soc_target = self.soc_target;
        let soc_cc_to_cv = self.soc_cc_to_cv;
        let charger = self.charger;
        let unit = self.unit_mut(id)?;
        if unit.state != AbuState::Returning {
            return Err(PoolError::InvalidTransition {
                unit: id,
                action: "complete return",
                state: unit.state.name(),
            });
        }
        unit.pack.set_soc(post_mission_soc)?;
        let event = charge_time(&unit.pack, &charger, post_mission_soc, soc_target, soc_cc_to_cv)?;
        unit.state = AbuState::Charging;
        unit.ready_at = now + SimTime::from_hours(event.t_total_hr);
        Ok(event)
    }

    /// The recharge finished: `Charging → IdleCharged`, then service the
    /// wait queue.
    ///
    /// Requests are granted oldest-first; a head request that is still short
    /// of units stays queued (and keeps blocking younger requests) until a
    /// later completion fully satisfies it.  Returns every request this
    /// completion unblocked.
    pub fn complete_charge(&mut self, id: AbuId) -> PoolResult<Vec<GrantedRequest>> {
        let soc_target = self.soc_target;
        let unit = self.unit_mut(id)?;
        if unit.state != AbuState::Charging {
            return Err(PoolError::InvalidTransition {
                unit: id,
                action: "complete charge",
                state: unit.state.name(),
            });
        }
        unit.pack.set_soc(soc_target)?;
        unit.state = AbuState::IdleCharged;

        let mut granted = Vec::new();
        while let Some(head) = self.queue.front().copied() {
            if self.idle_ids().len() < head.units {
                break;
            }
            self.queue.pop_front();
            let ids = self.attach_first_idle(head.flight, head.units);
            granted.push(GrantedRequest {
                flight: head.flight,
                units: ids,
                requested_at: head.requested_at,
            });
        }
        debug_assert_eq!(self.counts().total(), self.size());
        Ok(granted)
    }

    /// Reset every unit to `IdleCharged` at the target SOC and clear the
    /// queue, for the next independent sweep point.
    pub fn reset(&mut self) -> PoolResult<()> {
        let soc_target = self.soc_target;
        for unit in &mut self.units {
            unit.state = AbuState::IdleCharged;
            unit.ready_at = SimTime::ZERO;
            unit.pack.set_soc(soc_target)?;
        }
        self.queue.clear();
        Ok(())
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn unit_mut(&mut self, id: AbuId) -> PoolResult<&mut AbuUnit> {
        self.units
            .get_mut(id.index())
            .ok_or(PoolError::UnknownUnit(id))
    }

    /// Idle unit IDs in ascending index order — the deterministic offer
    /// order when several units are ready at the same instant.
    fn idle_ids(&self) -> Vec<AbuId> {
        self.units
            .iter()
            .filter(|u| u.is_idle())
            .map(|u| u.id)
            .collect()
    }

    /// Attach the first `n` idle units (ascending index) to `flight`.
    fn attach_first_idle(&mut self, flight: FlightId, n: usize) -> Vec<AbuId> {
        let mut ids = Vec::with_capacity(n);
        for unit in &mut self.units {
            if ids.len() == n {
                break;
            }
            if unit.is_idle() {
                unit.state = AbuState::Attached { flight };
                ids.push(unit.id);
            }
        }
        debug_assert_eq!(ids.len(), n, "caller must check idle count first");
        ids
    }
}
