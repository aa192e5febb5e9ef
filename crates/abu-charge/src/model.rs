//! Analytic CC-CV charge-time model.
//!
//! # Design
//!
//! A lithium pack recharges in two phases:
//!
//! 1. **Constant current (CC)** from `soc_start` up to the CC→CV transition
//!    SOC.  The current is the lesser of what the pack's C-rate limit allows
//!    and what the charger can deliver after AC→DC conversion losses.
//! 2. **Constant voltage (CV)** from the transition SOC up to `soc_target`,
//!    during which the current tapers exponentially from the CC current down
//!    to a termination current.
//!
//! The CV duration is computed analytically from the decay time-constant
//! implied by the taper, not integrated step-by-step: the charge delivered by
//! a full taper `i(t) = i_cc · e^(-t/τ)` truncated at `i_term` is
//! `τ·(i_cc − i_term)`, so the time-constant that delivers the required
//! ampere-hours is `τ = Δq / (i_cc − i_term)` and the phase lasts
//! `τ·ln(i_cc / i_term)`.
//!
//! The whole model is a pure function of its arguments — no side effects and
//! no internal state — so the scheduler may evaluate it any number of times
//! during a sweep without state leakage.

use crate::pack::{check_positive, check_soc};
use crate::{BatteryPack, ChargeError, ChargeResult};

// ── Charger ───────────────────────────────────────────────────────────────────

/// Ground-charger electrical parameters, shared by every pack at a site.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Charger {
    /// AC power drawn from the grid [kW].
    pub ac_power_kw: f64,
    /// AC→DC conversion efficiency, fraction in (0, 1].
    pub ac_to_dc_efficiency: f64,
    /// CV termination current as a fraction of the pack's 1C current.
    pub i_term_c: f64,
}

impl Charger {
    /// DC power available at the pack terminals [kW].
    #[inline]
    pub fn dc_power_kw(&self) -> f64 {
        self.ac_power_kw * self.ac_to_dc_efficiency
    }

    fn validate(&self) -> ChargeResult<()> {
        check_positive("charger_ac_power_kw", self.ac_power_kw)?;
        if !self.ac_to_dc_efficiency.is_finite()
            || self.ac_to_dc_efficiency <= 0.0
            || self.ac_to_dc_efficiency > 1.0
        {
            return Err(ChargeError::EfficiencyOutOfRange(self.ac_to_dc_efficiency));
        }
        check_positive("i_term_c", self.i_term_c)?;
        Ok(())
    }
}

// ── ChargeEvent ───────────────────────────────────────────────────────────────

/// Phase breakdown of one recharge.  Derived, never mutated.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargeEvent {
    /// Constant-current phase duration [h].
    pub t_cc_hr: f64,
    /// Constant-voltage phase duration [h].
    pub t_cv_hr: f64,
    /// Total plug-in time [h].
    pub t_total_hr: f64,
    /// Power delivered during the CC phase [kW].
    pub p_cc_kw: f64,
    /// `true` when the charger (rather than the pack's C-rate limit) set the
    /// CC current.
    pub charger_limited: bool,
}

impl ChargeEvent {
    /// The all-zero event returned when no charge is needed.
    fn zero(p_cc_kw: f64, charger_limited: bool) -> Self {
        Self {
            t_cc_hr: 0.0,
            t_cv_hr: 0.0,
            t_total_hr: 0.0,
            p_cc_kw,
            charger_limited,
        }
    }
}

// ── charge_time ───────────────────────────────────────────────────────────────

/// Time to recharge `pack` from `soc_start` to `soc_target` on `charger`,
/// with the CC→CV transition at `soc_cc_to_cv`.
///
/// Edge cases, per the model contract:
/// - `soc_start >= soc_target` → a zero event (already charged).
/// - `soc_cc_to_cv <= soc_start` → the CC phase is skipped (transition
///   already passed); the whole delta is CV.
/// - `soc_target <= soc_cc_to_cv` → the CV phase is skipped; the whole delta
///   is CC.
///
/// Any SOC outside `[0, 1]` is a precondition violation and fails — the
/// model does not clamp silently.
pub fn charge_time(
    pack: &BatteryPack,
    charger: &Charger,
    soc_start: f64,
    soc_target: f64,
    soc_cc_to_cv: f64,
) -> ChargeResult<ChargeEvent> {
    charger.validate()?;
    check_soc("soc_start", soc_start)?;
    check_soc("soc_target", soc_target)?;
    check_soc("soc_cc_to_cv", soc_cc_to_cv)?;

    let capacity_ah = pack.capacity_ah();
    let i_c_rate = pack.max_c_rate * capacity_ah;
    let i_charger = charger.dc_power_kw() * 1_000.0 / pack.nominal_voltage_v;

    let charger_limited = i_charger < i_c_rate;
    let i_cc = if charger_limited { i_charger } else { i_c_rate };
    let p_cc_kw = i_cc * pack.nominal_voltage_v / 1_000.0;

    if soc_start >= soc_target {
        return Ok(ChargeEvent::zero(p_cc_kw, charger_limited));
    }

    // ── CC phase: soc_start → min(transition, target) ─────────────────────
    let soc_cc_end = soc_cc_to_cv.min(soc_target);
    let delta_soc_cc = (soc_cc_end - soc_start).max(0.0);
    let t_cc_hr = delta_soc_cc * capacity_ah / i_cc;

    // ── CV phase: max(start, transition) → target ─────────────────────────
    let soc_cv_start = soc_cc_to_cv.max(soc_start);
    let delta_soc_cv = (soc_target - soc_cv_start).max(0.0);
    let t_cv_hr = if delta_soc_cv > 0.0 {
        let delta_q_ah = delta_soc_cv * capacity_ah;
        let i_term = charger.i_term_c * capacity_ah;
        if i_cc > i_term {
            // Exponential taper i_cc → i_term; duration from the implied
            // time-constant.
            let tau_hr = delta_q_ah / (i_cc - i_term);
            tau_hr * (i_cc / i_term).ln()
        } else {
            // CC current already at/below termination: no taper to model,
            // the remaining charge goes in at i_cc.
            delta_q_ah / i_cc
        }
    } else {
        0.0
    };

    Ok(ChargeEvent {
        t_cc_hr,
        t_cv_hr,
        t_total_hr: t_cc_hr + t_cv_hr,
        p_cc_kw,
        charger_limited,
    })
}
