//! The OS tag consumed by [`crate::ops::misc::breakpoint`] (spec §3/§6).

/// Target OS, affecting only [`crate::ops::misc::breakpoint`]'s encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetOs {
    /// Linux: `breakpoint` emits the kernel's native Thumb trap, `0xDE01`.
    Linux,
    /// Android: same trap encoding as Linux.
    Android,
    /// Any other target: `breakpoint` emits `bkpt #0` followed by `bx lr`.
    #[default]
    Other,
}

impl TargetOs {
    /// The tag matching the host this crate is compiled for, used to seed
    /// a freshly reset [`crate::Writer`] (spec §4.4).
    #[must_use]
    pub fn host() -> Self {
        if cfg!(target_os = "android") {
            TargetOs::Android
        } else if cfg!(target_os = "linux") {
            TargetOs::Linux
        } else {
            TargetOs::Other
        }
    }
}

#[test]
fn host_defaults_match_build_target() {
    let expected = if cfg!(target_os = "android") {
        TargetOs::Android
    } else if cfg!(target_os = "linux") {
        TargetOs::Linux
    } else {
        TargetOs::Other
    };
    assert_eq!(TargetOs::host(), expected);
}
