pub mod launcher;

pub use launcher::{
    CommandRunner, DESCRIPTION, DISPLAY_NAME, Delivery, Directive, InvokeMode, LaunchError,
    LaunchRequest, Launcher, LauncherConfig, ProcessRunner,
};
