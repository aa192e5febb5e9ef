//! Unit tests for abu-pool.

use abu_charge::{BatteryPack, Charger};
use abu_core::{AbuId, FlightId, SimTime};

use crate::{AbuPool, AbuState, AcquireOutcome, PoolError};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn abu_pack() -> BatteryPack {
    BatteryPack::full(400.0, 50.0, 20.0).unwrap()
}

fn site_charger() -> Charger {
    Charger {
        ac_power_kw: 115.0,
        ac_to_dc_efficiency: 0.95,
        i_term_c: 0.05,
    }
}

fn pool(size: usize) -> AbuPool {
    AbuPool::new(size, abu_pack(), site_charger(), 1.0, 0.8).unwrap()
}

/// Drive `unit` from attached through its return leg into `Charging`.
fn cycle_unit(pool: &mut AbuPool, unit: AbuId, now: SimTime) {
    pool.release_to_returning(unit, now, SimTime::from_hours(0.05))
        .unwrap();
    let back = now + SimTime::from_hours(0.05);
    pool.complete_return(unit, back, 0.58).unwrap();
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use super::*;

    #[test]
    fn zero_size_is_rejected() {
        let err = AbuPool::new(0, abu_pack(), site_charger(), 1.0, 0.8);
        assert!(matches!(err, Err(PoolError::EmptySize(0))));
    }

    #[test]
    fn all_units_start_idle_at_target_soc() {
        let p = pool(3);
        assert_eq!(p.size(), 3);
        for unit in p.units() {
            assert_eq!(unit.state, AbuState::IdleCharged);
            assert!((unit.pack.soc() - 1.0).abs() < 1e-12);
        }
        let c = p.counts();
        assert_eq!(c.idle, 3);
        assert_eq!(c.total(), 3);
    }
}

// ── Acquisition ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod acquisition {
    use super::*;

    #[test]
    fn immediate_grant_uses_ascending_indices() {
        let mut p = pool(3);
        let out = p.acquire(FlightId(0), 2, SimTime::ZERO).unwrap();
        assert_eq!(out, AcquireOutcome::Granted(vec![AbuId(0), AbuId(1)]));
        let c = p.counts();
        assert_eq!((c.attached, c.idle), (2, 1));
    }

    #[test]
    fn request_beyond_pool_size_errors() {
        let mut p = pool(2);
        assert!(matches!(
            p.acquire(FlightId(0), 3, SimTime::ZERO),
            Err(PoolError::RequestExceedsPool { requested: 3, size: 2 })
        ));
    }

    #[test]
    fn exhausted_pool_queues_the_request() {
        let mut p = pool(1);
        assert!(matches!(
            p.acquire(FlightId(0), 1, SimTime::ZERO).unwrap(),
            AcquireOutcome::Granted(_)
        ));
        let out = p
            .acquire(FlightId(1), 1, SimTime::from_hours(0.5))
            .unwrap();
        assert_eq!(out, AcquireOutcome::Queued);
        assert_eq!(p.pending_requests(), 1);
    }

    #[test]
    fn younger_request_cannot_overtake_a_waiting_head() {
        let mut p = pool(2);
        // Take both units, then queue a 2-unit request and a 1-unit request.
        p.acquire(FlightId(0), 2, SimTime::ZERO).unwrap();
        assert_eq!(
            p.acquire(FlightId(1), 2, SimTime(1)).unwrap(),
            AcquireOutcome::Queued
        );
        assert_eq!(
            p.acquire(FlightId(2), 1, SimTime(2)).unwrap(),
            AcquireOutcome::Queued
        );

        // Free one unit: the head still needs two, so nothing is granted —
        // even though the younger 1-unit request could be met.
        cycle_unit(&mut p, AbuId(0), SimTime(10));
        let granted = p.complete_charge(AbuId(0)).unwrap();
        assert!(granted.is_empty());
        assert_eq!(p.pending_requests(), 2);

        // Free the second unit: head (flight 1) gets both, and the pool
        // drains the queue no further because no units remain idle.
        cycle_unit(&mut p, AbuId(1), SimTime(20));
        let granted = p.complete_charge(AbuId(1)).unwrap();
        assert_eq!(granted.len(), 1);
        assert_eq!(granted[0].flight, FlightId(1));
        assert_eq!(granted[0].units, vec![AbuId(0), AbuId(1)]);
        assert_eq!(p.pending_requests(), 1);
    }

    #[test]
    fn grant_preserves_request_timestamp_for_wait_accounting() {
        let mut p = pool(1);
        p.acquire(FlightId(0), 1, SimTime::ZERO).unwrap();
        p.acquire(FlightId(1), 1, SimTime::from_hours(0.25)).unwrap();

        cycle_unit(&mut p, AbuId(0), SimTime::from_hours(0.5));
        let granted = p.complete_charge(AbuId(0)).unwrap();
        assert_eq!(granted[0].requested_at, SimTime::from_hours(0.25));
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use super::*;

    #[test]
    fn full_cycle_returns_to_idle() {
        let mut p = pool(1);
        p.acquire(FlightId(0), 1, SimTime::ZERO).unwrap();
        assert_eq!(p.counts().attached, 1);

        let detach = SimTime::from_hours(0.1);
        p.release_to_returning(AbuId(0), detach, SimTime::from_hours(0.05))
            .unwrap();
        assert_eq!(p.counts().returning, 1);
        assert_eq!(p.unit(AbuId(0)).unwrap().ready_at, SimTime::from_hours(0.15));

        let back = SimTime::from_hours(0.15);
        let ev = p.complete_return(AbuId(0), back, 0.58).unwrap();
        assert_eq!(p.counts().charging, 1);
        assert!(ev.t_total_hr > 0.0);
        assert_eq!(
            p.unit(AbuId(0)).unwrap().ready_at,
            back + SimTime::from_hours(ev.t_total_hr)
        );

        p.complete_charge(AbuId(0)).unwrap();
        let unit = p.unit(AbuId(0)).unwrap();
        assert_eq!(unit.state, AbuState::IdleCharged);
        assert!((unit.pack.soc() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn out_of_order_transitions_are_rejected() {
        let mut p = pool(1);
        // Idle unit: cannot detach or complete anything.
        assert!(p
            .release_to_returning(AbuId(0), SimTime::ZERO, SimTime(1))
            .is_err());
        assert!(p.complete_return(AbuId(0), SimTime::ZERO, 0.5).is_err());
        assert!(p.complete_charge(AbuId(0)).is_err());

        // Attached unit: cannot complete a return it never started.
        p.acquire(FlightId(0), 1, SimTime::ZERO).unwrap();
        assert!(p.complete_return(AbuId(0), SimTime::ZERO, 0.5).is_err());
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let mut p = pool(1);
        assert!(matches!(
            p.complete_charge(AbuId(9)),
            Err(PoolError::UnknownUnit(AbuId(9)))
        ));
    }

    #[test]
    fn reset_restores_day_start_state() {
        let mut p = pool(2);
        p.acquire(FlightId(0), 2, SimTime::ZERO).unwrap();
        p.acquire(FlightId(1), 1, SimTime(5)).unwrap();
        p.reset().unwrap();
        let c = p.counts();
        assert_eq!(c.idle, 2);
        assert_eq!(p.pending_requests(), 0);
    }
}

// ── Conservation ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod conservation {
    use super::*;

    #[test]
    fn unit_count_is_conserved_across_every_transition() {
        for size in 1..=4 {
            let mut p = pool(size);
            assert_eq!(p.counts().total(), size);

            p.acquire(FlightId(0), size, SimTime::ZERO).unwrap();
            assert_eq!(p.counts().total(), size);

            for i in 0..size {
                let id = AbuId(i as u32);
                p.release_to_returning(id, SimTime(10), SimTime(5)).unwrap();
                assert_eq!(p.counts().total(), size);
                p.complete_return(id, SimTime(15), 0.5).unwrap();
                assert_eq!(p.counts().total(), size);
                p.complete_charge(id).unwrap();
                assert_eq!(p.counts().total(), size);
            }
            assert_eq!(p.counts().idle, size);
        }
    }

    #[test]
    fn attached_never_exceeds_pool_size() {
        let mut p = pool(2);
        p.acquire(FlightId(0), 2, SimTime::ZERO).unwrap();
        // Further acquisitions queue instead of over-attaching.
        p.acquire(FlightId(1), 1, SimTime(1)).unwrap();
        p.acquire(FlightId(2), 2, SimTime(2)).unwrap();
        assert_eq!(p.counts().attached, 2);
        assert!(p.counts().attached <= p.size());
    }
}
