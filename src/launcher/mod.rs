mod core;
mod config;
mod directive;
mod error;
mod request;

#[cfg(test)]
mod launch_tests;

pub use config::{DESCRIPTION, DISPLAY_NAME, LauncherConfig};
pub use core::{CommandRunner, Delivery, Launcher, ProcessRunner};
pub use directive::{Directive, InvokeMode};
pub use error::LaunchError;
pub use request::LaunchRequest;
