//! `SimParams` — the single validated configuration struct.
//!
//! Every recognized option is a named field here; nothing is read from
//! globals or defaulted implicitly inside the scheduler.  `validate()` is
//! called by the scheduler constructor and fails fast, before any simulation
//! state exists.  Feasibility (can one flight's energy fit in the packs at
//! all) is a separate check because an infeasible point is an expected
//! outcome of a sweep, not a configuration mistake.

use abu_charge::Charger;
use abu_flight::{AbuKinematics, MissionProfile, SegmentKind};
use abu_core::PoolRole;

use crate::{SimError, SimResult};

// ── AssistMode ────────────────────────────────────────────────────────────────

/// Which ABU pools a flight draws from.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssistMode {
    /// Takeoff-side units only: boost the climb-out, detach after it.
    AssistedTakeoff,
    /// Landing-side units only: carry the cruise, detach before descent.
    ExtendedCruise,
    /// Both pools on every flight.
    Combined,
}

impl AssistMode {
    /// Does this mode fly units of `role`?
    pub fn requires(self, role: PoolRole) -> bool {
        match self {
            AssistMode::AssistedTakeoff => role == PoolRole::Takeoff,
            AssistMode::ExtendedCruise => role == PoolRole::Cruise,
            AssistMode::Combined => true,
        }
    }
}

// ── Per-pack / per-role parameter groups ──────────────────────────────────────

/// Electrical sizing of one pack family (main or ABU).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackSpec {
    pub nominal_voltage_v: f64,
    pub capacity_kwh: f64,
}

/// Everything the scheduler needs to know about one pool's role.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbuRoleParams {
    /// Units stationed at this role's ground node.
    pub pool_size: usize,
    /// Units acquired per flight.
    pub units_per_flight: usize,
    /// Main-pack energy offloaded onto each unit per flight [kWh].
    pub e_mission_kwh_per_abu: f64,
    /// Reserve each unit burns flying itself home [kWh].
    pub e_ops_kwh_per_abu: f64,
    /// Return-flight kinematics.
    pub kinematics: AbuKinematics,
    /// Last mission segment the unit rides; it detaches when this segment
    /// ends.
    pub detach_through: SegmentKind,
}

// ── SimParams ─────────────────────────────────────────────────────────────────

/// Full configuration for one operating-day simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimParams {
    /// Operating-day horizon [h].
    pub horizon_hr: f64,
    /// Fixed ground turnaround (swap, inspection, pax) per cycle [h].
    pub t_ground_ops_hr: f64,
    /// Which pools fly.
    pub mode: AssistMode,

    /// Site charger, shared by main pack and every ABU.
    pub charger: Charger,
    /// Charge-rate ceiling applied to every pack [1/h].
    pub max_c_rate: f64,
    /// SOC every recharge targets.
    pub soc_target: f64,
    /// CC→CV transition SOC.
    pub soc_cc_to_cv: f64,

    /// Main aircraft pack sizing.
    pub main_pack: PackSpec,
    /// ABU pack sizing (identical across both pools).
    pub abu_pack: PackSpec,
    /// Main-pack draw per flight, net of ABU offload [kWh].
    pub e_flight_main_kwh: f64,
    /// Per-segment flight times.
    pub profile: MissionProfile,

    /// Takeoff-side pool parameters (read iff `mode` requires the role).
    pub takeoff: AbuRoleParams,
    /// Landing-side pool parameters (read iff `mode` requires the role).
    pub cruise: AbuRoleParams,

    /// Bottleneck threshold: flag a pool when its average wait exceeds this
    /// fraction of one ground-ops cycle.
    pub bottleneck_wait_frac: f64,
}

impl SimParams {
    /// The role block for `role`.
    pub fn role(&self, role: PoolRole) -> &AbuRoleParams {
        match role {
            PoolRole::Takeoff => &self.takeoff,
            PoolRole::Cruise => &self.cruise,
        }
    }

    /// Mutable access, for sweep drivers that vary one role's energy.
    pub fn role_mut(&mut self, role: PoolRole) -> &mut AbuRoleParams {
        match role {
            PoolRole::Takeoff => &mut self.takeoff,
            PoolRole::Cruise => &mut self.cruise,
        }
    }

    /// Roles this configuration actually flies.
    pub fn active_roles(&self) -> impl Iterator<Item = PoolRole> + '_ {
        PoolRole::ALL
            .into_iter()
            .filter(|&r| self.mode.requires(r))
    }

    // ── Validation (InvalidConfiguration class) ───────────────────────────

    /// Fail fast on anything malformed.  Called by the scheduler
    /// constructor; callers running sweeps should call it once up front.
    pub fn validate(&self) -> SimResult<()> {
        fn positive(name: &str, v: f64) -> SimResult<()> {
            if !v.is_finite() || v <= 0.0 {
                return Err(SimError::Config(format!("{name} = {v} must be positive")));
            }
            Ok(())
        }
        fn soc(name: &str, v: f64) -> SimResult<()> {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(SimError::Config(format!(
                    "{name} = {v} is outside the valid SOC range [0, 1]"
                )));
            }
            Ok(())
        }

        positive("horizon_hr", self.horizon_hr)?;
        positive("t_ground_ops_hr", self.t_ground_ops_hr)?;
        positive("charger_ac_power_kw", self.charger.ac_power_kw)?;
        if !(0.0..=1.0).contains(&self.charger.ac_to_dc_efficiency)
            || self.charger.ac_to_dc_efficiency == 0.0
        {
            return Err(SimError::Config(format!(
                "ac_to_dc_efficiency = {} must be in (0, 1]",
                self.charger.ac_to_dc_efficiency
            )));
        }
        positive("i_term_c", self.charger.i_term_c)?;
        positive("max_c_rate", self.max_c_rate)?;
        soc("soc_target", self.soc_target)?;
        soc("soc_cc_to_cv", self.soc_cc_to_cv)?;
        if self.soc_cc_to_cv > self.soc_target {
            return Err(SimError::Config(format!(
                "soc_cc_to_cv = {} exceeds soc_target = {}",
                self.soc_cc_to_cv, self.soc_target
            )));
        }
        positive("main_pack.nominal_voltage_v", self.main_pack.nominal_voltage_v)?;
        positive("main_pack.capacity_kwh", self.main_pack.capacity_kwh)?;
        positive("abu_pack.nominal_voltage_v", self.abu_pack.nominal_voltage_v)?;
        positive("abu_pack.capacity_kwh", self.abu_pack.capacity_kwh)?;
        positive("e_flight_main_kwh", self.e_flight_main_kwh)?;
        if self.profile.flight_duration_hr() <= 0.0 {
            return Err(SimError::Config(
                "mission profile has no flown segments".into(),
            ));
        }
        positive("bottleneck_wait_frac", self.bottleneck_wait_frac)?;

        for role in self.active_roles() {
            let rp = self.role(role);
            if rp.pool_size == 0 {
                return Err(SimError::Config(format!(
                    "{role} pool size must be at least 1 for mode {:?}",
                    self.mode
                )));
            }
            if rp.units_per_flight == 0 || rp.units_per_flight > rp.pool_size {
                return Err(SimError::Config(format!(
                    "{role} units_per_flight = {} must be in 1..={}",
                    rp.units_per_flight, rp.pool_size
                )));
            }
            positive(
                "e_mission_kwh_per_abu",
                rp.e_mission_kwh_per_abu,
            )?;
            if rp.e_ops_kwh_per_abu < 0.0 || !rp.e_ops_kwh_per_abu.is_finite() {
                return Err(SimError::Config(format!(
                    "{role} e_ops_kwh_per_abu = {} must be non-negative",
                    rp.e_ops_kwh_per_abu
                )));
            }
            positive(
                "abu horizontal return speed",
                rp.kinematics.horizontal_speed_m_p_s,
            )?;
            positive(
                "abu vertical return speed",
                rp.kinematics.vertical_speed_m_p_s,
            )?;
            if rp.kinematics.detach_altitude_m < 0.0 {
                return Err(SimError::Config(format!(
                    "{role} detach altitude = {} must be non-negative",
                    rp.kinematics.detach_altitude_m
                )));
            }
        }
        Ok(())
    }

    // ── Feasibility (InfeasibleMission class) ─────────────────────────────

    /// `Err(Infeasible)` when one flight cannot fit in the packs: the main
    /// draw exceeds what the main pack holds at the target SOC, or an ABU's
    /// mission-plus-ops draw exceeds its pack.
    pub fn check_feasible(&self) -> SimResult<()> {
        let main_available = self.soc_target * self.main_pack.capacity_kwh;
        if self.e_flight_main_kwh > main_available {
            return Err(SimError::Infeasible(format!(
                "main-pack draw {} kWh exceeds available {main_available} kWh",
                self.e_flight_main_kwh
            )));
        }
        let abu_available = self.soc_target * self.abu_pack.capacity_kwh;
        for role in self.active_roles() {
            let rp = self.role(role);
            let draw = rp.e_mission_kwh_per_abu + rp.e_ops_kwh_per_abu;
            if draw > abu_available {
                return Err(SimError::Infeasible(format!(
                    "{role} ABU draw {draw} kWh exceeds available {abu_available} kWh"
                )));
            }
        }
        Ok(())
    }
}

impl Default for SimParams {
    /// The common-case operating point of the feasibility study: 115 kW site
    /// charger at 95 % conversion, 20 C packs, 800 V / 160 kWh main and
    /// 400 V / 50 kWh ABU packs, 17-minute ground turnaround, 24 h horizon,
    /// one takeoff-assist unit per flight detaching at the end of the
    /// acceleration climb.
    fn default() -> Self {
        let profile = MissionProfile::from_segments([
            (SegmentKind::DepartTaxi, 30.0),
            (SegmentKind::HoverClimb, 30.0),
            (SegmentKind::TransClimb, 90.0),
            (SegmentKind::DepartProc, 60.0),
            (SegmentKind::AccelClimb, 120.0),
            (SegmentKind::Cruise, 1_200.0),
            (SegmentKind::DecelDescend, 120.0),
            (SegmentKind::ArriveProc, 60.0),
            (SegmentKind::TransDescend, 90.0),
            (SegmentKind::HoverDescend, 30.0),
            (SegmentKind::ArriveTaxi, 30.0),
        ]);
        let kinematics = AbuKinematics {
            horizontal_speed_m_p_s: 30.0,
            vertical_speed_m_p_s: 5.1,
            detach_altitude_m: 457.2, // 1500 ft
        };
        Self {
            horizon_hr: 24.0,
            t_ground_ops_hr: 0.2833,
            mode: AssistMode::AssistedTakeoff,
            charger: Charger {
                ac_power_kw: 115.0,
                ac_to_dc_efficiency: 0.95,
                i_term_c: 0.05,
            },
            max_c_rate: 20.0,
            soc_target: 1.0,
            soc_cc_to_cv: 0.80,
            main_pack: PackSpec {
                nominal_voltage_v: 800.0,
                capacity_kwh: 160.0,
            },
            abu_pack: PackSpec {
                nominal_voltage_v: 400.0,
                capacity_kwh: 50.0,
            },
            e_flight_main_kwh: 80.0,
            profile,
            takeoff: AbuRoleParams {
                pool_size: 1,
                units_per_flight: 1,
                e_mission_kwh_per_abu: 15.0,
                e_ops_kwh_per_abu: 6.0,
                kinematics,
                detach_through: SegmentKind::AccelClimb,
            },
            cruise: AbuRoleParams {
                pool_size: 1,
                units_per_flight: 1,
                e_mission_kwh_per_abu: 20.0,
                e_ops_kwh_per_abu: 12.0,
                kinematics,
                detach_through: SegmentKind::Cruise,
            },
            bottleneck_wait_frac: 0.5,
        }
    }
}
