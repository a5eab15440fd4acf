//! Ties the grounded engine, easy-case dispatcher, encodings and task
//! solvers together into one entry point per [`Track`]. This is the only
//! place that knows about every track at once; the CLI just calls [`run`]
//! and prints whatever [`Answer`] comes back.

use log::{debug, info};

use crate::dispatch::{self, EasyAnswer};
use crate::error::{ConfigError, DungError, Result};
use crate::grounded::Grounded;
use crate::ideal;
use crate::model::Af;
use crate::sat::SatBackend;
use crate::task::{Answer, Backend, Problem, RunOptions, Semantics, Track};
use crate::tasks::{ce, ds_pr, ea_pr, nested, se_pr, se_sst_stg, single_call};

/// Constructs a fresh, empty SAT backend per `opts.backend`.
pub fn new_backend(opts: &RunOptions) -> Result<Box<dyn SatBackend>> {
    match opts.backend {
        Backend::Embedded => {
            #[cfg(feature = "embedded")]
            {
                Ok(Box::new(crate::sat::embedded::EmbeddedBackend::new()))
            }
            #[cfg(not(feature = "embedded"))]
            {
                Err(DungError::Config(ConfigError::EmbeddedBackendUnavailable))
            }
        }
        Backend::Process => {
            let path = opts.sat_path.clone().ok_or(ConfigError::MissingSatPath)?;
            Ok(Box::new(crate::sat::process::ProcessBackend::new(path)))
        }
    }
}

/// Runs `track` against `af` for the (optional) `query` argument, returning
/// the answer. `opts.witness` controls whether witnesses are computed for
/// decision tracks (single-extension and enumeration tracks always compute
/// theirs, per §6's output contract).
pub fn run(af: &Af, track: Track, query: Option<usize>, opts: &RunOptions) -> Result<Answer> {
    let grounded = Grounded::compute(af);
    info!(
        "grounded extension: {} in, {} out, {} undecided",
        grounded.g_in.count(),
        grounded.g_out.count(),
        af.len() - grounded.g_in.count() - grounded.g_out.count()
    );

    if track.requires_argument() && query.is_none() {
        return Err(DungError::Config(ConfigError::MissingArgument(track.to_string())));
    }

    if let Some(easy) = dispatch::easy_case(af, &grounded, track, query) {
        debug!("easy case resolved {} directly from the grounded extension", track);
        let witness = if opts.witness {
            Some(witness_for(af, &grounded, track, query, opts)?)
        } else {
            None
        };
        return Ok(match easy {
            EasyAnswer::Yes => Answer::Yes(witness),
            EasyAnswer::No => Answer::No(witness),
        });
    }

    use Problem::*;
    use Semantics::*;

    match (track.problem, track.semantics) {
        (Se, Grounded) | (Se, Complete) => Ok(Answer::Extension(Some(grounded.g_in.iter().collect()))),
        (Ee, Grounded) => Ok(Answer::Extension(Some(grounded.g_in.iter().collect()))),

        (Dc, Grounded) | (Ds, Grounded) | (Ds, Complete) => {
            // Dispatch only answers these from the grounded extension;
            // reaching here with a query not already decided means NO.
            Ok(Answer::No(None))
        }

        (Dc, Complete) | (Dc, Preferred) => {
            let q = query.expect("DC tracks require a query");
            let mut sat = new_backend(opts)?;
            let mut growth = new_backend(opts)?;
            let (yes, ext) = single_call::dc_co_pr(af, &grounded, sat.as_mut(), growth.as_mut(), q);
            Ok(decision(yes, opts, ext))
        }

        (Dc, Stable) => {
            let q = query.expect("DC-ST requires a query");
            let mut sat = new_backend(opts)?;
            let (yes, ext) = single_call::dc_st(af, &grounded, sat.as_mut(), q);
            Ok(decision(yes, opts, ext))
        }
        (Se, Stable) => {
            let mut sat = new_backend(opts)?;
            match single_call::se_st(af, &grounded, sat.as_mut()) {
                Some(ext) => Ok(Answer::Extension(Some(ext))),
                None => Ok(Answer::Extension(None)),
            }
        }
        (Ds, Stable) => {
            let q = query.expect("DS-ST requires a query");
            let mut sat = new_backend(opts)?;
            let (yes, witness) = single_call::ds_st(af, &grounded, sat.as_mut(), q);
            Ok(if yes {
                Answer::Yes(if opts.witness { witness } else { None })
            } else {
                Answer::No(if opts.witness { witness } else { None })
            })
        }

        (Se, Preferred) => {
            let mut sat = new_backend(opts)?;
            Ok(Answer::Extension(Some(se_pr::solve(af, &grounded, sat.as_mut(), &[]))))
        }
        (Ds, Preferred) => {
            let q = query.expect("DS-PR requires a query");
            let mut adm = new_backend(opts)?;
            let mut att_adm = new_backend(opts)?;
            let mut witness = new_backend(opts)?;
            let (yes, ext) = ds_pr::solve(
                af,
                &grounded,
                ds_pr::DsPrSessions {
                    adm: adm.as_mut(),
                    att_adm: att_adm.as_mut(),
                    witness: witness.as_mut(),
                },
                q,
                &[],
            );
            Ok(decision(yes, opts, ext))
        }

        (Se, SemiStable) => {
            let mut sat = new_backend(opts)?;
            Ok(Answer::Extension(Some(se_sst_stg::solve_se_sst(af, &grounded, sat.as_mut()))))
        }
        (Se, Stage) => {
            let mut sat = new_backend(opts)?;
            Ok(Answer::Extension(Some(se_sst_stg::solve_se_stg(af, &grounded, sat.as_mut()))))
        }
        (Dc, SemiStable) | (Ds, SemiStable) => {
            let q = query.expect("SST tracks require a query");
            let mut outer = new_backend(opts)?;
            let mut inner = new_backend(opts)?;
            let assume_positive = track.problem == Dc;
            let (answer, ext) = nested::solve(af, &grounded, outer.as_mut(), inner.as_mut(), true, q, assume_positive);
            Ok(decision(answer, opts, ext))
        }
        (Dc, Stage) | (Ds, Stage) => {
            let q = query.expect("STG tracks require a query");
            let mut outer = new_backend(opts)?;
            let mut inner = new_backend(opts)?;
            let assume_positive = track.problem == Dc;
            let (answer, ext) = nested::solve(af, &grounded, outer.as_mut(), inner.as_mut(), false, q, assume_positive);
            Ok(decision(answer, opts, ext))
        }

        (Se, Ideal) => {
            let mut sat = new_backend(opts)?;
            Ok(Answer::Extension(Some(ideal::compute(af, &grounded, sat.as_mut()))))
        }
        (Dc, Ideal) | (Ds, Ideal) => {
            let q = query.expect("ID tracks require a query");
            let mut sat = new_backend(opts)?;
            let ext = ideal::compute(af, &grounded, sat.as_mut());
            let yes = ext.contains(&q);
            Ok(decision(yes, opts, ext))
        }

        (Ce, Complete) => {
            let mut sat = new_backend(opts)?;
            Ok(Answer::Count(ce::count_co(af, &grounded, sat.as_mut())))
        }
        (Ce, Stable) => {
            let mut sat = new_backend(opts)?;
            Ok(Answer::Count(ce::count_st(af, &grounded, sat.as_mut())))
        }
        (Ce, Preferred) => {
            let mut sat = new_backend(opts)?;
            let mut growth = new_backend(opts)?;
            Ok(Answer::Count(ce::count_pr(af, &grounded, sat.as_mut(), growth.as_mut())))
        }

        (Ea, Preferred) => {
            let mut psc = new_backend(opts)?;
            let mut strong = new_backend(opts)?;
            let mut ds_adm = new_backend(opts)?;
            let mut ds_att_adm = new_backend(opts)?;
            let mut witness = new_backend(opts)?;
            let ext = ea_pr::solve(
                af,
                &grounded,
                ea_pr::EaPrSessions {
                    psc: psc.as_mut(),
                    strong: strong.as_mut(),
                    ds_adm: ds_adm.as_mut(),
                    ds_att_adm: ds_att_adm.as_mut(),
                    witness: witness.as_mut(),
                },
            );
            Ok(Answer::Extension(Some(ext)))
        }

        _ => Err(DungError::Config(ConfigError::UnknownTrack(track.to_string()))),
    }
}

fn decision(yes: bool, opts: &RunOptions, witness: Vec<usize>) -> Answer {
    let w = if opts.witness { Some(witness) } else { None };
    if yes {
        Answer::Yes(w)
    } else {
        Answer::No(w)
    }
}

/// Produces a witness for an easy-case answer by running the cheapest
/// task that is guaranteed to reproduce the right kind of extension.
fn witness_for(af: &Af, grounded: &Grounded, track: Track, query: Option<usize>, opts: &RunOptions) -> Result<Vec<usize>> {
    use Semantics::*;

    match track.semantics {
        Grounded | Complete => Ok(grounded.g_in.iter().collect()),
        Preferred => {
            let mut sat = new_backend(opts)?;
            let seed: Vec<usize> = query.into_iter().collect();
            Ok(se_pr::solve(af, grounded, sat.as_mut(), &seed))
        }
        Stable => {
            let mut sat = new_backend(opts)?;
            match query {
                Some(q) => Ok(single_call::dc_st(af, grounded, sat.as_mut(), q).1),
                None => Ok(single_call::se_st(af, grounded, sat.as_mut()).unwrap_or_default()),
            }
        }
        SemiStable => {
            let mut sat = new_backend(opts)?;
            Ok(se_sst_stg::solve_se_sst(af, grounded, sat.as_mut()))
        }
        Stage => {
            let mut sat = new_backend(opts)?;
            Ok(se_sst_stg::solve_se_stg(af, grounded, sat.as_mut()))
        }
        Ideal => {
            let mut sat = new_backend(opts)?;
            Ok(ideal::compute(af, grounded, sat.as_mut()))
        }
    }
}
