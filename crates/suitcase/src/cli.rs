//! Definition of command line interface.

mod args;
mod exit_status;

pub use self::{
    args::{Args, ColorConfig},
    exit_status::ExitStatus,
};
