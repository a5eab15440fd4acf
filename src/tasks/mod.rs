//! One module per task family. Each function is a thin program over the
//! [`crate::encodings`] clause generators and a [`crate::sat::SatBackend`];
//! [`crate::engine`] is what stitches these (plus [`crate::dispatch`] and
//! [`crate::grounded`]) into the answer for a given [`crate::task::Track`].

pub mod ce;
pub mod ds_pr;
pub mod ea_pr;
pub mod nested;
pub mod se_pr;
pub mod se_sst_stg;
pub mod single_call;
