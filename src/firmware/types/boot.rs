/// Why the chip came out of reset.
///
/// Only [`ResetCause::PowerOn`] counts towards the restart recovery counter;
/// every other cause is a restart the firmware itself (or its watchdogs) asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetCause {
    PowerOn,
    Software,
    Panic,
    Watchdog,
    Brownout,
    DeepSleep,
    External,
    Unknown,
}

impl ResetCause {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PowerOn => "power_on",
            Self::Software => "software",
            Self::Panic => "panic",
            Self::Watchdog => "watchdog",
            Self::Brownout => "brownout",
            Self::DeepSleep => "deep_sleep",
            Self::External => "external",
            Self::Unknown => "unknown",
        }
    }

    pub const fn is_power_on(self) -> bool {
        matches!(self, Self::PowerOn)
    }
}
