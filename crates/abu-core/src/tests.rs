//! Unit tests for abu-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AbuId, FlightId, PoolRole};

    #[test]
    fn index_roundtrip() {
        let id = AbuId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AbuId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(AbuId(0) < AbuId(1));
        assert!(FlightId(100) > FlightId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AbuId::INVALID.0, u32::MAX);
        assert_eq!(FlightId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(AbuId(7).to_string(), "AbuId(7)");
        assert_eq!(PoolRole::Takeoff.to_string(), "takeoff");
        assert_eq!(PoolRole::Cruise.to_string(), "cruise");
    }

    #[test]
    fn role_indices_are_stable() {
        assert_eq!(PoolRole::Takeoff.index(), 0);
        assert_eq!(PoolRole::Cruise.index(), 1);
        assert_eq!(PoolRole::ALL[0], PoolRole::Takeoff);
    }
}

#[cfg(test)]
mod time {
    use crate::SimTime;

    #[test]
    fn hour_conversion_roundtrip() {
        let t = SimTime::from_hours(1.5);
        assert_eq!(t.0, 5_400_000);
        assert!((t.as_hours() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn negative_and_nan_hours_clamp_to_zero() {
        assert_eq!(SimTime::from_hours(-0.25), SimTime::ZERO);
        assert_eq!(SimTime::from_hours(f64::NAN), SimTime::ZERO);
    }

    #[test]
    fn arithmetic() {
        let a = SimTime::from_hours(2.0);
        let b = SimTime::from_hours(0.5);
        assert_eq!((a + b).as_hours(), 2.5);
        assert_eq!(a.since(b).as_hours(), 1.5);
        assert_eq!(b.saturating_since(a), SimTime::ZERO);
        assert_eq!(a.max(b), a);
    }

    #[test]
    fn sum_of_spans() {
        let total: SimTime = [0.25, 0.25, 0.5]
            .iter()
            .map(|&h| SimTime::from_hours(h))
            .sum();
        assert_eq!(total, SimTime::from_hours(1.0));
    }

    #[test]
    fn ordering_is_exact() {
        // Two analytically-derived durations that differ past float-display
        // precision still order deterministically once in integer millis.
        let a = SimTime::from_hours(0.1000001);
        let b = SimTime::from_hours(0.1000009);
        assert!(a < b);
    }
}
