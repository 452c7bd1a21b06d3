// SGP4/SDP4 propagator core
// Initialization derives all epoch coefficients once; propagation is a
// straight-line evaluation at any minute offset, forward or backward

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::deep_space::{DeepSpaceState, DeepSpaceTerms};
use crate::elements::{gstime, OperationMode, OrbitalElements};
use crate::error::ErrorCode;
use crate::gravity::{GravityModel, GravityVariant};

const TWO_PI: f64 = 2.0 * PI;

// divisor for the divide-by-zero guard at 180 deg inclination
const TEMP4: f64 = 1.5e-12;

const X2O3: f64 = 2.0 / 3.0;

// =============================================================================
// OUTPUT TYPES
// =============================================================================

/// One propagated state: TEME position and velocity plus the soft error
/// classification for this call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Prediction {
    /// Position in the TEME frame (km)
    pub position: [f64; 3],
    /// Velocity in the TEME frame (km/s)
    pub velocity: [f64; 3],
    pub error: ErrorCode,
}

impl Prediction {
    /// NaN sentinel output for codes that invalidate the vector.
    fn invalid(error: ErrorCode) -> Self {
        Self {
            position: [f64::NAN; 3],
            velocity: [f64::NAN; 3],
            error,
        }
    }
}

/// Singly averaged mean elements recovered on every propagation call,
/// useful for diagnostics and mean-element studies.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MeanElements {
    /// Semi-major axis (Earth radii)
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    /// Inclination (radians)
    pub inclination: f64,
    /// Right ascension of the ascending node (radians)
    pub raan: f64,
    /// Argument of perigee (radians)
    pub arg_perigee: f64,
    /// Mean anomaly (radians)
    pub mean_anomaly: f64,
    /// Mean motion (radians/minute)
    pub mean_motion: f64,
}

// =============================================================================
// METHOD TAG
// =============================================================================

/// Higher-order drag terms, generated only when perigee is at least
/// 220 km; below that the simplified drag model applies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DragSeries {
    pub d2: f64,
    pub d3: f64,
    pub d4: f64,
    pub t3cof: f64,
    pub t4cof: f64,
    pub t5cof: f64,
    pub eta: f64,
    pub cc5: f64,
    pub omgcof: f64,
    pub xmcof: f64,
    pub delmo: f64,
    pub sinmao: f64,
}

/// Which propagation branch a record uses, decided once at
/// initialization by the orbital period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PropagationMethod {
    /// Period under 225 minutes; drag terms present unless the perigee
    /// is low enough to force the simplified model
    NearEarth { drag: Option<DragSeries> },
    /// Period of 225 minutes or more; carries the lunar/solar and
    /// resonance machinery
    DeepSpace(Box<DeepSpaceTerms>),
}

// =============================================================================
// SATELLITE RECORD
// =============================================================================

/// An initialized satellite: the epoch elements plus every derived
/// coefficient the propagator needs. Construction does all the heavy
/// lifting; `propagate` is then cheap and callable in any time order.
///
/// Propagation only mutates the diagnostic fields (`t`, `error`,
/// `mean_elements`), so cloning a record gives an independent
/// propagator with no shared state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Satellite {
    pub elements: OrbitalElements,
    pub gravity: GravityModel,
    pub mode: OperationMode,
    pub method: PropagationMethod,
    /// Soft error from the last call (or from initialization)
    pub error: ErrorCode,
    /// Minutes since epoch of the last call
    pub t: f64,
    /// Brouwer mean motion, Kozai bias removed (rad/min)
    pub no_unkozai: f64,
    /// Greenwich sidereal time at epoch (rad)
    pub gsto: f64,
    /// Semi-major axis at epoch (Earth radii)
    pub a: f64,
    /// Apogee altitude at epoch (Earth radii above the surface)
    pub alta: f64,
    /// Perigee altitude at epoch (Earth radii above the surface)
    pub altp: f64,
    pub mean_elements: MeanElements,
    // near-earth secular and periodic coefficients
    con41: f64,
    cc1: f64,
    cc4: f64,
    x1mth2: f64,
    x7thm1: f64,
    mdot: f64,
    argpdot: f64,
    nodedot: f64,
    nodecf: f64,
    t2cof: f64,
    xlcof: f64,
    aycof: f64,
}

impl Satellite {
    /// Initialize a propagator from mean elements at epoch.
    ///
    /// Always returns a record; inputs that cannot be propagated at all
    /// (non-positive mean motion, eccentricity outside [0, 1)) come
    /// back with the sub-orbital error code set, and every subsequent
    /// call yields the NaN sentinel. Valid records finish with one
    /// propagation to epoch so the derived fields are populated.
    pub fn new(elements: OrbitalElements, variant: GravityVariant, mode: OperationMode) -> Self {
        let gravity = variant.constants();

        let ecco = elements.eccentricity;
        let inclo = elements.inclination;
        let no_kozai = elements.mean_motion;
        let argpo = elements.arg_perigee;
        let mo = elements.mean_anomaly;
        let nodeo = elements.raan;
        let bstar = elements.bstar;
        let epoch1950 = elements.epoch.days_since_1950();

        let mut sat = Satellite {
            elements,
            gravity,
            mode,
            method: PropagationMethod::NearEarth { drag: None },
            error: ErrorCode::None,
            t: 0.0,
            no_unkozai: 0.0,
            gsto: 0.0,
            a: 0.0,
            alta: 0.0,
            altp: 0.0,
            mean_elements: MeanElements::default(),
            con41: 0.0,
            cc1: 0.0,
            cc4: 0.0,
            x1mth2: 0.0,
            x7thm1: 0.0,
            mdot: 0.0,
            argpdot: 0.0,
            nodedot: 0.0,
            nodecf: 0.0,
            t2cof: 0.0,
            xlcof: 0.0,
            aycof: 0.0,
        };

        if no_kozai <= 0.0 || !(0.0..1.0).contains(&ecco) {
            log::warn!(
                "satellite {}: epoch elements cannot be propagated (n = {}, e = {})",
                sat.elements.catalog_number,
                no_kozai,
                ecco
            );
            sat.error = ErrorCode::SubOrbital;
            return sat;
        }

        // auxiliary epoch quantities
        let eccsq = ecco * ecco;
        let omeosq = 1.0 - eccsq;
        let rteosq = omeosq.sqrt();
        let cosio = inclo.cos();
        let cosio2 = cosio * cosio;
        let sinio = inclo.sin();

        // un-kozai the mean motion
        let ak = (gravity.xke / no_kozai).powf(X2O3);
        let d1 = 0.75 * gravity.j2 * (3.0 * cosio2 - 1.0) / (rteosq * omeosq);
        let mut del = d1 / (ak * ak);
        let adel = ak * (1.0 - del * del - del * (1.0 / 3.0 + 134.0 * del * del / 81.0));
        del = d1 / (adel * adel);
        sat.no_unkozai = no_kozai / (1.0 + del);

        let ao = (gravity.xke / sat.no_unkozai).powf(X2O3);
        let po = ao * omeosq;
        let con42 = 1.0 - 5.0 * cosio2;
        sat.con41 = -con42 - cosio2 - cosio2;
        let posq = po * po;
        let rp = ao * (1.0 - ecco);

        sat.gsto = match mode {
            OperationMode::Afspc => {
                // legacy sidereal-time polynomial, counted from 1970
                let ts70 = epoch1950 - 7305.0;
                let ds70 = ((ts70 + 1.0e-8) / 1.0).floor();
                let tfrac = ts70 - ds70;
                let c1 = 1.72027916940703639e-2;
                let thgr70 = 1.7321343856509374;
                let fk5r = 5.07551419432269442e-15;
                let c1p2p = c1 + TWO_PI;
                (thgr70 + c1 * ds70 + c1p2p * tfrac + ts70 * ts70 * fk5r).rem_euclid(TWO_PI)
            }
            OperationMode::Improved => gstime(epoch1950 + 2433281.5),
        };

        sat.a = (sat.no_unkozai * gravity.tumin).powf(-2.0 / 3.0);
        sat.alta = sat.a * (1.0 + ecco) - 1.0;
        sat.altp = sat.a * (1.0 - ecco) - 1.0;

        // atmospheric density profile constants
        let ss = 78.0 / gravity.radius_earth_km + 1.0;
        let qzms2ttemp = (120.0 - 78.0) / gravity.radius_earth_km;
        let qzms2t = qzms2ttemp * qzms2ttemp * qzms2ttemp * qzms2ttemp;

        let low_perigee = rp < 220.0 / gravity.radius_earth_km + 1.0;
        let mut sfour = ss;
        let mut qzms24 = qzms2t;
        let perige = (rp - 1.0) * gravity.radius_earth_km;

        // for perigees below 156 km, s and qoms2t are altered
        if perige < 156.0 {
            sfour = perige - 78.0;
            if perige < 98.0 {
                sfour = 20.0;
            }
            let qzms24temp = (120.0 - sfour) / gravity.radius_earth_km;
            qzms24 = qzms24temp * qzms24temp * qzms24temp * qzms24temp;
            sfour = sfour / gravity.radius_earth_km + 1.0;
        }

        let pinvsq = 1.0 / posq;
        let tsi = 1.0 / (ao - sfour);
        let eta = ao * ecco * tsi;
        let etasq = eta * eta;
        let eeta = ecco * eta;
        let psisq = (1.0 - etasq).abs();
        let coef = qzms24 * tsi.powf(4.0);
        let coef1 = coef / psisq.powf(3.5);
        let cc2 = coef1
            * sat.no_unkozai
            * (ao * (1.0 + 1.5 * etasq + eeta * (4.0 + etasq))
                + 0.375 * gravity.j2 * tsi / psisq
                    * sat.con41
                    * (8.0 + 3.0 * etasq * (8.0 + etasq)));
        sat.cc1 = bstar * cc2;
        let mut cc3 = 0.0;
        if ecco > 1.0e-4 {
            cc3 = -2.0 * coef * tsi * gravity.j3oj2 * sat.no_unkozai * sinio / ecco;
        }
        sat.x1mth2 = 1.0 - cosio2;
        sat.cc4 = 2.0
            * sat.no_unkozai
            * coef1
            * ao
            * omeosq
            * (eta * (2.0 + 0.5 * etasq) + ecco * (0.5 + 2.0 * etasq)
                - gravity.j2 * tsi / (ao * psisq)
                    * (-3.0 * sat.con41 * (1.0 - 2.0 * eeta + etasq * (1.5 - 0.5 * eeta))
                        + 0.75
                            * sat.x1mth2
                            * (2.0 * etasq - eeta * (1.0 + etasq))
                            * (2.0 * argpo).cos()));
        let cc5 = 2.0 * coef1 * ao * omeosq * (1.0 + 2.75 * (etasq + eeta) + eeta * etasq);
        let cosio4 = cosio2 * cosio2;
        let temp1 = 1.5 * gravity.j2 * pinvsq * sat.no_unkozai;
        let temp2 = 0.5 * temp1 * gravity.j2 * pinvsq;
        let temp3 = -0.46875 * gravity.j4 * pinvsq * pinvsq * sat.no_unkozai;
        sat.mdot = sat.no_unkozai
            + 0.5 * temp1 * rteosq * sat.con41
            + 0.0625 * temp2 * rteosq * (13.0 - 78.0 * cosio2 + 137.0 * cosio4);
        sat.argpdot = -0.5 * temp1 * con42
            + 0.0625 * temp2 * (7.0 - 114.0 * cosio2 + 395.0 * cosio4)
            + temp3 * (3.0 - 36.0 * cosio2 + 49.0 * cosio4);
        let xhdot1 = -temp1 * cosio;
        sat.nodedot = xhdot1
            + (0.5 * temp2 * (4.0 - 19.0 * cosio2) + 2.0 * temp3 * (3.0 - 7.0 * cosio2)) * cosio;
        let xpidot = sat.argpdot + sat.nodedot;
        let omgcof = bstar * cc3 * argpo.cos();
        let mut xmcof = 0.0;
        if ecco > 1.0e-4 {
            xmcof = -X2O3 * coef * bstar / eeta;
        }
        sat.nodecf = 3.5 * omeosq * xhdot1 * sat.cc1;
        sat.t2cof = 1.5 * sat.cc1;
        // guard the divide for inclinations at 180 deg
        if (cosio + 1.0).abs() > 1.5e-12 {
            sat.xlcof = -0.25 * gravity.j3oj2 * sinio * (3.0 + 5.0 * cosio) / (1.0 + cosio);
        } else {
            sat.xlcof = -0.25 * gravity.j3oj2 * sinio * (3.0 + 5.0 * cosio) / TEMP4;
        }
        sat.aycof = -0.5 * gravity.j3oj2 * sinio;
        let delmotemp = 1.0 + eta * mo.cos();
        let delmo = delmotemp * delmotemp * delmotemp;
        let sinmao = mo.sin();
        sat.x7thm1 = 7.0 * cosio2 - 1.0;

        if TWO_PI / sat.no_unkozai >= 225.0 {
            // deep space: lunar/solar terms plus resonance classification
            let (mut terms, common) = DeepSpaceTerms::from_epoch_elements(
                epoch1950,
                ecco,
                argpo,
                0.0,
                inclo,
                nodeo,
                sat.no_unkozai,
            );
            terms.init_resonance(
                &common,
                gravity.xke,
                argpo,
                sat.gsto,
                mo,
                sat.mdot,
                sat.no_unkozai,
                nodeo,
                sat.nodedot,
                xpidot,
                ecco,
                eccsq,
                inclo,
            );
            sat.method = PropagationMethod::DeepSpace(Box::new(terms));
        } else if low_perigee {
            sat.method = PropagationMethod::NearEarth { drag: None };
        } else {
            let cc1sq = sat.cc1 * sat.cc1;
            let d2 = 4.0 * ao * tsi * cc1sq;
            let temp = d2 * tsi * sat.cc1 / 3.0;
            let d3 = (17.0 * ao + sfour) * temp;
            let d4 = 0.5 * temp * ao * tsi * (221.0 * ao + 31.0 * sfour) * sat.cc1;
            let t3cof = d2 + 2.0 * cc1sq;
            let t4cof = 0.25 * (3.0 * d3 + sat.cc1 * (12.0 * d2 + 10.0 * cc1sq));
            let t5cof = 0.2
                * (3.0 * d4
                    + 12.0 * sat.cc1 * d3
                    + 6.0 * d2 * d2
                    + 15.0 * cc1sq * (2.0 * d2 + cc1sq));
            sat.method = PropagationMethod::NearEarth {
                drag: Some(DragSeries {
                    d2,
                    d3,
                    d4,
                    t3cof,
                    t4cof,
                    t5cof,
                    eta,
                    cc5,
                    omgcof,
                    xmcof,
                    delmo,
                    sinmao,
                }),
            };
        }

        // propagate to epoch so the derived fields start populated
        sat.propagate(0.0);
        sat
    }

    /// Propagate to an absolute instant given as a split Julian date.
    pub fn propagate_at(&mut self, jd: f64, fraction: f64) -> Prediction {
        let tsince = self.elements.epoch.minutes_to(jd, fraction);
        self.propagate(tsince)
    }

    // =========================================================================
    // PROPAGATION
    // =========================================================================

    /// Propagate to `tsince` minutes after epoch (negative minutes look
    /// backward). Errors are soft: the code rides along in the returned
    /// prediction, and only the decay code leaves the vector usable.
    pub fn propagate(&mut self, tsince: f64) -> Prediction {
        let g = self.gravity;
        let vkmpersec = g.radius_earth_km * g.xke / 60.0;

        self.t = tsince;
        if self.error == ErrorCode::SubOrbital {
            return Prediction::invalid(ErrorCode::SubOrbital);
        }
        self.error = ErrorCode::None;

        let mo = self.elements.mean_anomaly;
        let argpo = self.elements.arg_perigee;
        let nodeo = self.elements.raan;
        let ecco = self.elements.eccentricity;
        let inclo = self.elements.inclination;
        let bstar = self.elements.bstar;

        // secular gravity and atmospheric drag
        let xmdf = mo + self.mdot * tsince;
        let argpdf = argpo + self.argpdot * tsince;
        let nodedf = nodeo + self.nodedot * tsince;
        let mut argpm = argpdf;
        let mut mm = xmdf;
        let t2 = tsince * tsince;
        let mut nodem = nodedf + self.nodecf * t2;
        let mut tempa = 1.0 - self.cc1 * tsince;
        let mut tempe = bstar * self.cc4 * tsince;
        let mut templ = self.t2cof * t2;

        if let PropagationMethod::NearEarth { drag: Some(d) } = &self.method {
            let delomg = d.omgcof * tsince;
            let delmtemp = 1.0 + d.eta * xmdf.cos();
            let delm = d.xmcof * (delmtemp * delmtemp * delmtemp - d.delmo);
            let temp = delomg + delm;
            mm = xmdf + temp;
            argpm = argpdf - temp;
            let t3 = t2 * tsince;
            let t4 = t3 * tsince;
            tempa = tempa - d.d2 * t2 - d.d3 * t3 - d.d4 * t4;
            tempe += bstar * d.cc5 * (mm.sin() - d.sinmao);
            templ += d.t3cof * t3 + t4 * (d.t4cof + tsince * d.t5cof);
        }

        let mut nm = self.no_unkozai;
        let mut em = ecco;
        let mut inclm = inclo;
        if let PropagationMethod::DeepSpace(terms) = &self.method {
            let state = DeepSpaceState {
                em,
                inclm,
                argpm,
                nodem,
                mm,
                nm,
            };
            let out = terms.secular_update(
                tsince,
                self.gsto,
                argpo,
                self.argpdot,
                self.no_unkozai,
                state,
            );
            em = out.em;
            inclm = out.inclm;
            argpm = out.argpm;
            nodem = out.nodem;
            mm = out.mm;
            nm = out.nm;
        }

        if nm <= 0.0 {
            self.error = ErrorCode::MeanMotion;
            return Prediction::invalid(self.error);
        }

        let am = (g.xke / nm).powf(X2O3) * tempa * tempa;
        nm = g.xke / am.powf(1.5);
        em -= tempe;

        if em >= 1.0 || em < -0.001 {
            self.error = ErrorCode::MeanEccentricity;
            return Prediction::invalid(self.error);
        }
        // tolerance to avoid a divide by zero downstream
        if em < 1.0e-6 {
            em = 1.0e-6;
        }
        mm += self.no_unkozai * templ;
        let mut xlm = mm + argpm + nodem;

        // the node keeps its sign through the reduction; the others wrap
        // into [0, 2pi)
        nodem %= TWO_PI;
        argpm = argpm.rem_euclid(TWO_PI);
        xlm = xlm.rem_euclid(TWO_PI);
        mm = (xlm - argpm - nodem).rem_euclid(TWO_PI);

        self.mean_elements = MeanElements {
            semi_major_axis: am,
            eccentricity: em,
            inclination: inclm,
            raan: nodem,
            arg_perigee: argpm,
            mean_anomaly: mm,
            mean_motion: nm,
        };

        let sinim = inclm.sin();
        let cosim = inclm.cos();

        // lunar-solar periodics
        let mut ep = em;
        let mut xincp = inclm;
        let mut argpp = argpm;
        let mut nodep = nodem;
        let mut mp = mm;
        let mut sinip = sinim;
        let mut cosip = cosim;
        let mut aycof = self.aycof;
        let mut xlcof = self.xlcof;
        let mut con41 = self.con41;
        let mut x1mth2 = self.x1mth2;
        let mut x7thm1 = self.x7thm1;

        if let PropagationMethod::DeepSpace(terms) = &self.method {
            let (e_p, i_p, n_p, a_p, m_p) =
                terms.long_period_periodics(tsince, self.mode, ep, xincp, nodep, argpp, mp);
            ep = e_p;
            xincp = i_p;
            nodep = n_p;
            argpp = a_p;
            mp = m_p;
            if xincp < 0.0 {
                xincp = -xincp;
                nodep += PI;
                argpp -= PI;
            }
            if !(0.0..=1.0).contains(&ep) {
                self.error = ErrorCode::PerturbedEccentricity;
                return Prediction::invalid(self.error);
            }
            // the long-period coefficients track the perturbed inclination
            sinip = xincp.sin();
            cosip = xincp.cos();
            aycof = -0.5 * g.j3oj2 * sinip;
            if (cosip + 1.0).abs() > 1.5e-12 {
                xlcof = -0.25 * g.j3oj2 * sinip * (3.0 + 5.0 * cosip) / (1.0 + cosip);
            } else {
                xlcof = -0.25 * g.j3oj2 * sinip * (3.0 + 5.0 * cosip) / TEMP4;
            }
        }

        let axnl = ep * argpp.cos();
        let mut temp = 1.0 / (am * (1.0 - ep * ep));
        let aynl = ep * argpp.sin() + temp * aycof;
        let xl = mp + argpp + nodep + temp * xlcof * axnl;

        // solve kepler's equation
        let u = (xl - nodep).rem_euclid(TWO_PI);
        let (_eo1, sineo1, coseo1) = solve_kepler(u, axnl, aynl);

        // short period preliminary quantities
        let ecose = axnl * coseo1 + aynl * sineo1;
        let esine = axnl * sineo1 - aynl * coseo1;
        let el2 = axnl * axnl + aynl * aynl;
        let pl = am * (1.0 - el2);
        if pl < 0.0 {
            self.error = ErrorCode::SemiLatusRectum;
            return Prediction::invalid(self.error);
        }

        let rl = am * (1.0 - ecose);
        let rdotl = am.sqrt() * esine / rl;
        let rvdotl = pl.sqrt() / rl;
        let betal = (1.0 - el2).sqrt();
        temp = esine / (1.0 + betal);
        let sinu = am / rl * (sineo1 - aynl - axnl * temp);
        let cosu = am / rl * (coseo1 - axnl + aynl * temp);
        let mut su = sinu.atan2(cosu);
        let sin2u = (cosu + cosu) * sinu;
        let cos2u = 1.0 - 2.0 * sinu * sinu;
        temp = 1.0 / pl;
        let temp1 = 0.5 * g.j2 * temp;
        let temp2 = temp1 * temp;

        // short period periodics use the perturbed inclination in deep space
        if matches!(self.method, PropagationMethod::DeepSpace(_)) {
            let cosisq = cosip * cosip;
            con41 = 3.0 * cosisq - 1.0;
            x1mth2 = 1.0 - cosisq;
            x7thm1 = 7.0 * cosisq - 1.0;
        }

        let mrt = rl * (1.0 - 1.5 * temp2 * betal * con41) + 0.5 * temp1 * x1mth2 * cos2u;
        su -= 0.25 * temp2 * x7thm1 * sin2u;
        let xnode = nodep + 1.5 * temp2 * cosip * sin2u;
        let xinc = xincp + 1.5 * temp2 * cosip * sinip * cos2u;
        let mvt = rdotl - nm * temp1 * x1mth2 * sin2u / g.xke;
        let rvdot = rvdotl + nm * temp1 * (x1mth2 * cos2u + 1.5 * con41) / g.xke;

        // orientation vectors
        let sinsu = su.sin();
        let cossu = su.cos();
        let snod = xnode.sin();
        let cnod = xnode.cos();
        let sini = xinc.sin();
        let cosi = xinc.cos();
        let xmx = -snod * cosi;
        let xmy = cnod * cosi;
        let ux = xmx * sinsu + cnod * cossu;
        let uy = xmy * sinsu + snod * cossu;
        let uz = sini * sinsu;
        let vx = xmx * cossu - cnod * sinsu;
        let vy = xmy * cossu - snod * sinsu;
        let vz = sini * cossu;

        // position and velocity in km and km/sec
        let mr = mrt * g.radius_earth_km;
        let position = [mr * ux, mr * uy, mr * uz];
        let velocity = [
            (mvt * ux + rvdot * vx) * vkmpersec,
            (mvt * uy + rvdot * vy) * vkmpersec,
            (mvt * uz + rvdot * vz) * vkmpersec,
        ];

        // an orbital radius under one earth radius means decay; the
        // geometry is still the last valid computation, so keep it
        if mrt < 1.0 {
            self.error = ErrorCode::Decayed;
        }

        Prediction {
            position,
            velocity,
            error: self.error,
        }
    }
}

// =============================================================================
// KEPLER SOLVER
// =============================================================================

/// Newton-Raphson solution of Kepler's equation in the (axnl, aynl)
/// nonsingular form. Returns the converged anomaly together with the
/// sine and cosine from the final iteration, which the short-period
/// evaluation reuses.
///
/// Corrections are clamped to 0.95 rad per step and the iteration is
/// capped at ten rounds, which is always enough at the 1e-12 tolerance
/// for the eccentricities the drag model leaves through.
pub(crate) fn solve_kepler(u: f64, axnl: f64, aynl: f64) -> (f64, f64, f64) {
    let mut eo1 = u;
    let mut tem5 = 9999.9_f64;
    let mut ktr = 1;
    let mut sineo1 = 0.0;
    let mut coseo1 = 1.0;
    while tem5.abs() >= 1.0e-12 && ktr <= 10 {
        sineo1 = eo1.sin();
        coseo1 = eo1.cos();
        tem5 = 1.0 - coseo1 * axnl - sineo1 * aynl;
        tem5 = (u - aynl * coseo1 + axnl * sineo1 - eo1) / tem5;
        if tem5.abs() >= 0.95 {
            tem5 = if tem5 > 0.0 { 0.95 } else { -0.95 };
        }
        eo1 += tem5;
        ktr += 1;
    }
    (eo1, sineo1, coseo1)
}
