//! Unit tests for abu-charge.

#[cfg(test)]
mod pack {
    use crate::BatteryPack;

    #[test]
    fn construction_validates_fields() {
        assert!(BatteryPack::new(400.0, 50.0, 20.0, 0.5).is_ok());
        assert!(BatteryPack::new(0.0, 50.0, 20.0, 0.5).is_err());
        assert!(BatteryPack::new(400.0, -1.0, 20.0, 0.5).is_err());
        assert!(BatteryPack::new(400.0, 50.0, 0.0, 0.5).is_err());
        assert!(BatteryPack::new(400.0, 50.0, 20.0, 1.5).is_err());
    }

    #[test]
    fn capacity_in_ampere_hours() {
        let pack = BatteryPack::full(400.0, 50.0, 20.0).unwrap();
        assert!((pack.capacity_ah() - 125.0).abs() < 1e-9);
    }

    #[test]
    fn draw_reduces_soc() {
        let mut pack = BatteryPack::full(400.0, 50.0, 20.0).unwrap();
        pack.draw_kwh(25.0).unwrap();
        assert!((pack.soc() - 0.5).abs() < 1e-9);
        assert!((pack.stored_kwh() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn overdraw_is_an_error() {
        let mut pack = BatteryPack::new(400.0, 50.0, 20.0, 0.1).unwrap();
        assert!(pack.draw_kwh(10.0).is_err());
        // SOC untouched by the failed draw.
        assert!((pack.soc() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn set_soc_rejects_out_of_range() {
        let mut pack = BatteryPack::full(400.0, 50.0, 20.0).unwrap();
        assert!(pack.set_soc(-0.01).is_err());
        assert!(pack.set_soc(1.01).is_err());
        assert!(pack.set_soc(0.0).is_ok());
    }
}

#[cfg(test)]
mod model {
    use crate::{charge_time, BatteryPack, Charger};

    /// Common-case ABU pack: 400 V, 50 kWh, 20 C.
    fn abu_pack() -> BatteryPack {
        BatteryPack::full(400.0, 50.0, 20.0).unwrap()
    }

    /// Common-case site charger: 115 kW AC at 95 % conversion.
    fn site_charger() -> Charger {
        Charger {
            ac_power_kw: 115.0,
            ac_to_dc_efficiency: 0.95,
            i_term_c: 0.05,
        }
    }

    #[test]
    fn zero_delta_gives_zero_event() {
        let ev = charge_time(&abu_pack(), &site_charger(), 0.8, 0.8, 0.8).unwrap();
        assert_eq!(ev.t_cc_hr, 0.0);
        assert_eq!(ev.t_cv_hr, 0.0);
        assert_eq!(ev.t_total_hr, 0.0);
    }

    #[test]
    fn start_above_target_gives_zero_event() {
        let ev = charge_time(&abu_pack(), &site_charger(), 0.9, 0.8, 0.8).unwrap();
        assert_eq!(ev.t_total_hr, 0.0);
    }

    #[test]
    fn cc_phase_duration_matches_energy_over_power() {
        // Target below the CC→CV transition: pure CC charge.
        let ev = charge_time(&abu_pack(), &site_charger(), 0.2, 0.8, 0.8).unwrap();
        let expected = 0.6 * 50.0 / (115.0 * 0.95);
        assert!((ev.t_cc_hr - expected).abs() < 1e-9, "got {}", ev.t_cc_hr);
        assert_eq!(ev.t_cv_hr, 0.0);
    }

    #[test]
    fn cv_phase_uses_analytic_taper() {
        // Pure CV: start at the transition SOC.
        let ev = charge_time(&abu_pack(), &site_charger(), 0.8, 1.0, 0.8).unwrap();
        let cap_ah: f64 = 125.0;
        let i_cc = 115.0 * 0.95 * 1_000.0 / 400.0;
        let i_term = 0.05 * cap_ah;
        let tau = 0.2 * cap_ah / (i_cc - i_term);
        let expected = tau * (i_cc / i_term).ln();
        assert_eq!(ev.t_cc_hr, 0.0);
        assert!((ev.t_cv_hr - expected).abs() < 1e-9, "got {}", ev.t_cv_hr);
    }

    #[test]
    fn cc_skipped_when_transition_already_passed() {
        // soc_start past the transition: everything is CV.
        let ev = charge_time(&abu_pack(), &site_charger(), 0.85, 1.0, 0.8).unwrap();
        assert_eq!(ev.t_cc_hr, 0.0);
        assert!(ev.t_cv_hr > 0.0);
    }

    #[test]
    fn charger_limit_indicator_consistency() {
        // 115 kW into a 50 kWh 20 C pack: charger is far below the C-rate
        // ceiling (20 × 50 = 1000 kW), so the charger binds.
        let ev = charge_time(&abu_pack(), &site_charger(), 0.2, 1.0, 0.8).unwrap();
        assert!(ev.charger_limited);
        assert!((ev.p_cc_kw - 115.0 * 0.95).abs() < 1e-9);

        // A 2 MW charger on the same pack: the pack's C-rate binds instead.
        let big = Charger {
            ac_power_kw: 2_000.0,
            ac_to_dc_efficiency: 1.0,
            i_term_c: 0.05,
        };
        let ev = charge_time(&abu_pack(), &big, 0.2, 1.0, 0.8).unwrap();
        assert!(!ev.charger_limited);
        assert!((ev.p_cc_kw - 1_000.0).abs() < 1e-9);
    }

    #[test]
    fn charge_time_monotone_in_soc_delta() {
        let pack = abu_pack();
        let charger = site_charger();
        let mut last = 0.0;
        for target in [0.2, 0.4, 0.6, 0.8, 0.9, 1.0] {
            let ev = charge_time(&pack, &charger, 0.1, target, 0.8).unwrap();
            assert!(
                ev.t_total_hr >= last,
                "t_total regressed at target {target}: {} < {last}",
                ev.t_total_hr
            );
            last = ev.t_total_hr;
        }
    }

    #[test]
    fn out_of_range_soc_is_rejected() {
        let pack = abu_pack();
        let charger = site_charger();
        assert!(charge_time(&pack, &charger, -0.1, 1.0, 0.8).is_err());
        assert!(charge_time(&pack, &charger, 0.2, 1.1, 0.8).is_err());
        assert!(charge_time(&pack, &charger, 0.2, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn deterministic_across_calls() {
        let pack = abu_pack();
        let charger = site_charger();
        let a = charge_time(&pack, &charger, 0.13, 1.0, 0.8).unwrap();
        let b = charge_time(&pack, &charger, 0.13, 1.0, 0.8).unwrap();
        assert_eq!(a, b);
    }
}
