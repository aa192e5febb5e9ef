//! The `EventScheduler` and its event loop.

use abu_charge::{charge_time, BatteryPack, ChargeEvent};
use abu_core::{AbuId, FlightId, PoolRole, SimTime};
use abu_flight::{AbuDraw, FlightCycleModel};
use abu_pool::{AbuPool, AcquireOutcome};

use crate::event::{Event, EventQueue};
use crate::timeline::{ActorKind, EventTag, FlightRecord, TimelineEntry};
use crate::{SimError, SimObserver, SimParams, SimResult};

// ── Per-cycle bookkeeping ─────────────────────────────────────────────────────

/// A granted per-pool acquisition: which units, and when the grant landed.
#[derive(Clone, Debug)]
struct Granted {
    units: Vec<AbuId>,
    at: SimTime,
}

/// The flight currently working through its turnaround (requested but not
/// yet departed).
#[derive(Clone, Debug)]
struct PendingFlight {
    flight: FlightId,
    /// When the acquisition requests were issued (ground ops complete).
    requested_at: SimTime,
    /// Main pack recharged — the aircraft itself is go.
    pack_ready: bool,
    /// Per-role grants; an inactive role is simply never consulted.
    granted: [Option<Granted>; 2],
}

/// The flight currently airborne.
#[derive(Clone, Debug)]
struct ActiveFlight {
    flight: FlightId,
    depart: SimTime,
    abus: [Vec<AbuId>; 2],
    wait_hr: [f64; 2],
}

// ── DayResult ─────────────────────────────────────────────────────────────────

/// Everything one operating-day run produces, beyond what the observer saw.
///
/// `n_flights_completed == 0` is a reported outcome (the horizon was too
/// short for even one cycle), not an error.
#[derive(Clone, Debug)]
pub struct DayResult {
    /// Completed flights, in chronological order.
    pub flights: Vec<FlightRecord>,
    pub n_flights_completed: usize,
    pub horizon: SimTime,
    /// Total airborne time [h].
    pub t_flight_day_hr: f64,
    /// Block time of one flight [h].
    pub t_flight_hr: f64,
    /// Main-pack recharge duration per cycle [h].
    pub t_charge_hr_main: f64,
    /// One unconstrained cycle: flight + max(ground ops, main charge) [h].
    pub t_cycle_nominal_hr: f64,
    /// Flights the day would fit with unlimited ABUs.
    pub n_flights_nominal_no_abu_limit: usize,
    /// Main-pack CC-CV breakdown (identical every cycle).
    pub main_charge: ChargeEvent,
    /// Per-role ABU CC-CV breakdown (identical every cycle; `None` for a
    /// role the mode doesn't fly).
    pub abu_charge: [Option<ChargeEvent>; 2],
}

// ── EventScheduler ────────────────────────────────────────────────────────────

/// Single-threaded, event-driven simulation of one aircraft cycling against
/// one or two ABU pools across a bounded operating day.
///
/// All state transitions are applied sequentially in simulated-time order;
/// "waiting" is a queued future event, never a blocked thread.  The pools'
/// unit-state tables are touched only from `apply`, so the single-writer
/// discipline holds by construction.  Rerunning the same scheduler replays
/// the identical event sequence — `run` resets all day state on entry.
pub struct EventScheduler {
    params: SimParams,
    horizon: SimTime,
    model: FlightCycleModel,
    main_pack: BatteryPack,
    pools: [Option<AbuPool>; 2],
    queue: EventQueue,

    // Per-cycle constants, precomputed at construction.
    flight_duration: SimTime,
    main_charge: ChargeEvent,
    abu_charge: [Option<ChargeEvent>; 2],
    post_mission_soc: [Option<f64>; 2],
    transit: [SimTime; 2],
    detach_offset: [SimTime; 2],

    // Day state.
    pending: Option<PendingFlight>,
    active: Option<ActiveFlight>,
    flights: Vec<FlightRecord>,
    next_flight: u32,
}

impl EventScheduler {
    /// Validate `params`, check single-flight feasibility, and precompute the
    /// per-cycle constants.
    ///
    /// Fails with [`SimError::Config`] on malformed input and
    /// [`SimError::Infeasible`] when one flight cannot fit in the packs —
    /// sweep drivers screen the latter out before constructing.
    pub fn new(params: SimParams) -> SimResult<Self> {
        params.validate()?;
        params.check_feasible()?;

        let horizon = SimTime::from_hours(params.horizon_hr);

        let mut model = FlightCycleModel::new(params.profile.clone(), params.e_flight_main_kwh);
        for role in params.active_roles() {
            let rp = params.role(role);
            model = model.with_abu_draw(
                role,
                AbuDraw {
                    e_mission_kwh: rp.e_mission_kwh_per_abu,
                    e_ops_kwh: rp.e_ops_kwh_per_abu,
                },
            );
        }
        let flight_duration = SimTime::from_hours(model.flight_duration_hr());

        let main_pack = BatteryPack::new(
            params.main_pack.nominal_voltage_v,
            params.main_pack.capacity_kwh,
            params.max_c_rate,
            params.soc_target,
        )?;
        let soc_after_flight =
            params.soc_target - params.e_flight_main_kwh / params.main_pack.capacity_kwh;
        let main_charge = charge_time(
            &main_pack,
            &params.charger,
            soc_after_flight,
            params.soc_target,
            params.soc_cc_to_cv,
        )?;

        let mut pools = [None, None];
        let mut abu_charge = [None, None];
        let mut post_mission_soc = [None, None];
        let mut transit = [SimTime::ZERO; 2];
        let mut detach_offset = [SimTime::ZERO; 2];
        for role in params.active_roles() {
            let rp = params.role(role);
            let i = role.index();
            let pack = BatteryPack::new(
                params.abu_pack.nominal_voltage_v,
                params.abu_pack.capacity_kwh,
                params.max_c_rate,
                params.soc_target,
            )?;
            let soc = model
                .post_mission_soc(role, params.soc_target, params.abu_pack.capacity_kwh)
                .ok_or_else(|| {
                    SimError::Infeasible(format!("{role} ABU draw exceeds its pack"))
                })?;
            abu_charge[i] = Some(charge_time(
                &pack,
                &params.charger,
                soc,
                params.soc_target,
                params.soc_cc_to_cv,
            )?);
            post_mission_soc[i] = Some(soc);
            transit[i] = SimTime::from_hours(rp.kinematics.transit_time_hr());
            detach_offset[i] =
                SimTime::from_hours(params.profile.offset_through_hr(rp.detach_through));
            pools[i] = Some(AbuPool::new(
                rp.pool_size,
                pack,
                params.charger,
                params.soc_target,
                params.soc_cc_to_cv,
            )?);
        }

        Ok(Self {
            params,
            horizon,
            model,
            main_pack,
            pools,
            queue: EventQueue::new(),
            flight_duration,
            main_charge,
            abu_charge,
            post_mission_soc,
            transit,
            detach_offset,
            pending: None,
            active: None,
            flights: Vec::new(),
            next_flight: 0,
        })
    }

    /// The configuration this scheduler runs.
    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Read access to one pool (for invariant checks in tests and metrics).
    pub fn pool(&self, role: PoolRole) -> Option<&AbuPool> {
        self.pools[role.index()].as_ref()
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Simulate one operating day.
    ///
    /// Day state (pools, packs, queue, flight log) is reset on entry, so
    /// calling `run` twice replays the identical day — the determinism the
    /// test fixtures rely on.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<DayResult> {
        self.reset_day()?;

        // First cycle: ground ops from t = 0, main pack already full.
        self.begin_turnaround(SimTime::ZERO, 0.0);

        loop {
            match self.queue.next_time() {
                Some(t) if t <= self.horizon => {
                    let Some((now, events)) = self.queue.pop_next() else {
                        break;
                    };
                    for event in events {
                        self.apply(now, event, observer)?;
                    }
                }
                // Horizon exhausted or nothing left that can change state.
                _ => break,
            }
        }

        observer.on_day_end(self.horizon, self.flights.len());
        Ok(self.day_result())
    }

    // ── Day lifecycle ─────────────────────────────────────────────────────

    fn reset_day(&mut self) -> SimResult<()> {
        self.queue.clear();
        self.flights.clear();
        self.pending = None;
        self.active = None;
        self.next_flight = 0;
        self.main_pack.set_soc(self.params.soc_target)?;
        for pool in self.pools.iter_mut().flatten() {
            pool.reset()?;
        }
        Ok(())
    }

    /// Start the turnaround that follows a touchdown at `arrival` (or the
    /// day start): ground ops run for their fixed duration, the main-pack
    /// recharge (`t_charge_hr`) runs in parallel, and the ABU request goes
    /// out as soon as ground ops finish — deliberately overlapping the rest
    /// of the recharge, since waiting on units and charging the pack are
    /// independent.
    ///
    /// If even an immediate, wait-free departure could not touch down inside
    /// the horizon, no request is made: the day is over for the aircraft.
    fn begin_turnaround(&mut self, arrival: SimTime, t_charge_hr: f64) {
        let t_request = arrival + SimTime::from_hours(self.params.t_ground_ops_hr);
        let t_ready =
            arrival + SimTime::from_hours(self.params.t_ground_ops_hr.max(t_charge_hr));

        if t_ready + self.flight_duration > self.horizon {
            return;
        }

        self.pending = Some(PendingFlight {
            flight: FlightId(self.next_flight),
            requested_at: t_request,
            pack_ready: false,
            granted: [None, None],
        });
        self.queue.push(t_request, Event::AttachAttempt);
        self.queue.push(t_ready, Event::PackReady);
    }

    // ── Event application ─────────────────────────────────────────────────

    fn apply<O: SimObserver>(
        &mut self,
        now: SimTime,
        event: Event,
        observer: &mut O,
    ) -> SimResult<()> {
        match event {
            Event::AttachAttempt => self.on_attach_attempt(now, observer)?,

            Event::PackReady => {
                if let Some(p) = self.pending.as_mut() {
                    p.pack_ready = true;
                }
                self.try_depart(now, observer)?;
            }

            Event::Detach { role } => self.on_detach(now, role, observer)?,

            Event::Arrive => self.on_arrive(now, observer)?,

            Event::ReturnComplete { role, unit, flight } => {
                self.on_return_complete(now, role, unit, flight, observer)?;
            }

            Event::ChargeComplete { role, unit, flight } => {
                self.on_charge_complete(now, role, unit, flight, observer)?;
            }
        }
        Ok(())
    }

    /// Ground ops done — ask each active pool for this flight's units.
    fn on_attach_attempt<O: SimObserver>(
        &mut self,
        now: SimTime,
        observer: &mut O,
    ) -> SimResult<()> {
        let Some(flight) = self.pending.as_ref().map(|p| p.flight) else {
            return Ok(());
        };
        for role in PoolRole::ALL {
            let n = self.params.role(role).units_per_flight;
            let Some(pool) = self.pools[role.index()].as_mut() else {
                continue;
            };
            match pool.acquire(flight, n, now)? {
                AcquireOutcome::Granted(units) => {
                    self.record_grant(role, units, now, flight, observer);
                }
                // Stays queued; the grant arrives via a ChargeComplete.
                AcquireOutcome::Queued => {}
            }
        }
        self.try_depart(now, observer)
    }

    /// A unit finished recharging; the pool may unblock the waiting flight.
    fn on_charge_complete<O: SimObserver>(
        &mut self,
        now: SimTime,
        role: PoolRole,
        unit: AbuId,
        flight: FlightId,
        observer: &mut O,
    ) -> SimResult<()> {
        let Some(pool) = self.pools[role.index()].as_mut() else {
            return Ok(());
        };
        let grants = pool.complete_charge(unit)?;
        self.emit(
            observer,
            TimelineEntry {
                actor: ActorKind::from_role(role),
                unit: Some(unit),
                flight: Some(flight),
                time: now,
                tag: EventTag::ChargeDone,
            },
        );
        for grant in grants {
            self.record_grant(role, grant.units, now, grant.flight, observer);
        }
        self.try_depart(now, observer)
    }

    /// Book a per-pool grant on the pending flight and emit attach entries.
    fn record_grant<O: SimObserver>(
        &mut self,
        role: PoolRole,
        units: Vec<AbuId>,
        now: SimTime,
        flight: FlightId,
        observer: &mut O,
    ) {
        for &unit in &units {
            self.emit(
                observer,
                TimelineEntry {
                    actor: ActorKind::from_role(role),
                    unit: Some(unit),
                    flight: Some(flight),
                    time: now,
                    tag: EventTag::Attached,
                },
            );
        }
        if let Some(p) = self.pending.as_mut() {
            debug_assert_eq!(p.flight, flight, "grant for a flight that is not pending");
            p.granted[role.index()] = Some(Granted { units, at: now });
        }
    }

    /// Depart when the pack is ready and every active pool has granted.
    fn try_depart<O: SimObserver>(&mut self, now: SimTime, observer: &mut O) -> SimResult<()> {
        let ready = self.pending.as_ref().is_some_and(|p| {
            p.pack_ready
                && self
                    .params
                    .active_roles()
                    .all(|r| p.granted[r.index()].is_some())
        });
        if !ready {
            return Ok(());
        }
        let Some(p) = self.pending.take() else {
            return Ok(());
        };

        // A late grant can push the departure past the point where the
        // flight could still touch down in time.  The flight is abandoned,
        // not recorded: granted units stay attached and the log simply
        // truncates at the horizon.
        if now + self.flight_duration > self.horizon {
            return Ok(());
        }

        let mut abus: [Vec<AbuId>; 2] = [Vec::new(), Vec::new()];
        let mut wait_hr = [0.0; 2];
        for role in self.params.active_roles() {
            let i = role.index();
            if let Some(g) = &p.granted[i] {
                abus[i] = g.units.clone();
                wait_hr[i] = g.at.saturating_since(p.requested_at).as_hours();
            }
        }

        self.main_pack.draw_kwh(self.params.e_flight_main_kwh)?;
        self.emit(
            observer,
            TimelineEntry {
                actor: ActorKind::Aircraft,
                unit: None,
                flight: Some(p.flight),
                time: now,
                tag: EventTag::Depart,
            },
        );

        for role in PoolRole::ALL {
            let i = role.index();
            if !abus[i].is_empty() {
                self.queue.push(now + self.detach_offset[i], Event::Detach { role });
            }
        }
        self.queue.push(now + self.flight_duration, Event::Arrive);

        self.active = Some(ActiveFlight {
            flight: p.flight,
            depart: now,
            abus,
            wait_hr,
        });
        self.next_flight += 1;
        Ok(())
    }

    /// Shed `role`'s units; each starts its return leg.
    fn on_detach<O: SimObserver>(
        &mut self,
        now: SimTime,
        role: PoolRole,
        observer: &mut O,
    ) -> SimResult<()> {
        let Some(active) = self.active.as_ref() else {
            return Ok(());
        };
        let flight = active.flight;
        let units = active.abus[role.index()].clone();
        let transit = self.transit[role.index()];
        for unit in units {
            if let Some(pool) = self.pools[role.index()].as_mut() {
                pool.release_to_returning(unit, now, transit)?;
            }
            self.emit(
                observer,
                TimelineEntry {
                    actor: ActorKind::from_role(role),
                    unit: Some(unit),
                    flight: Some(flight),
                    time: now,
                    tag: EventTag::Detached,
                },
            );
            self.queue
                .push(now + transit, Event::ReturnComplete { role, unit, flight });
        }
        Ok(())
    }

    /// A unit landed at its pad; plug it in and schedule the completion.
    fn on_return_complete<O: SimObserver>(
        &mut self,
        now: SimTime,
        role: PoolRole,
        unit: AbuId,
        flight: FlightId,
        observer: &mut O,
    ) -> SimResult<()> {
        let i = role.index();
        let Some(soc) = self.post_mission_soc[i] else {
            return Ok(());
        };
        let Some(pool) = self.pools[i].as_mut() else {
            return Ok(());
        };
        let event = pool.complete_return(unit, now, soc)?;
        self.emit(
            observer,
            TimelineEntry {
                actor: ActorKind::from_role(role),
                unit: Some(unit),
                flight: Some(flight),
                time: now,
                tag: EventTag::ReturnDone,
            },
        );
        self.queue.push(
            now + SimTime::from_hours(event.t_total_hr),
            Event::ChargeComplete { role, unit, flight },
        );
        Ok(())
    }

    /// Touchdown: record the flight, start the main-pack recharge, and kick
    /// off the next turnaround.
    fn on_arrive<O: SimObserver>(&mut self, now: SimTime, observer: &mut O) -> SimResult<()> {
        let Some(active) = self.active.take() else {
            return Ok(());
        };
        self.emit(
            observer,
            TimelineEntry {
                actor: ActorKind::Aircraft,
                unit: None,
                flight: Some(active.flight),
                time: now,
                tag: EventTag::Arrive,
            },
        );

        let mut e_abu_kwh = [0.0; 2];
        for role in PoolRole::ALL {
            let i = role.index();
            e_abu_kwh[i] =
                active.abus[i].len() as f64 * self.params.role(role).e_mission_kwh_per_abu;
        }
        let record = FlightRecord {
            flight: active.flight,
            depart: active.depart,
            arrive: now,
            abus: active.abus,
            e_main_kwh: self.params.e_flight_main_kwh,
            e_abu_kwh,
            wait_hr: active.wait_hr,
        };
        observer.on_flight(&record);
        self.flights.push(record);

        // The recharge completes mid-turnaround; nothing reads the pack SOC
        // before the next departure's draw, so book the completion now.
        self.main_pack.set_soc(self.params.soc_target)?;
        self.begin_turnaround(now, self.main_charge.t_total_hr);
        Ok(())
    }

    fn emit<O: SimObserver>(&self, observer: &mut O, entry: TimelineEntry) {
        observer.on_timeline(&entry);
    }

    // ── Result assembly ───────────────────────────────────────────────────

    fn day_result(&self) -> DayResult {
        let t_flight_hr = self.model.flight_duration_hr();
        let t_flight_day_hr: f64 = self
            .flights
            .iter()
            .map(|f| f.arrive.since(f.depart).as_hours())
            .sum();

        let g = self.params.t_ground_ops_hr;
        let ch = self.main_charge.t_total_hr;
        let t_cycle_nominal_hr = t_flight_hr + g.max(ch);
        // Unconstrained day: first departure after ground ops, then one
        // arrival every nominal cycle.
        let h = self.params.horizon_hr;
        let n_flights_nominal_no_abu_limit = if h >= g + t_flight_hr {
            ((h - g - t_flight_hr) / t_cycle_nominal_hr).floor() as usize + 1
        } else {
            0
        };

        DayResult {
            flights: self.flights.clone(),
            n_flights_completed: self.flights.len(),
            horizon: self.horizon,
            t_flight_day_hr,
            t_flight_hr,
            t_charge_hr_main: ch,
            t_cycle_nominal_hr,
            n_flights_nominal_no_abu_limit,
            main_charge: self.main_charge,
            abu_charge: self.abu_charge,
        }
    }
}
