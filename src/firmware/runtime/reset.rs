use esp_hal::{
    rtc_cntl::{reset_reason, SocResetReason},
    system::Cpu,
};

use crate::firmware::types::ResetCause;

pub(super) fn boot_reset_cause() -> ResetCause {
    let reason = reset_reason(Cpu::ProCpu);
    log::debug!("boot: soc reset_reason={:?}", reason);
    match reason {
        Some(SocResetReason::ChipPowerOn) => ResetCause::PowerOn,
        Some(SocResetReason::CoreSw | SocResetReason::Cpu0Sw) => ResetCause::Software,
        Some(SocResetReason::CoreDeepSleep) => ResetCause::DeepSleep,
        Some(
            SocResetReason::CoreMwdt0
            | SocResetReason::CoreMwdt1
            | SocResetReason::CoreRtcWdt
            | SocResetReason::Cpu0Mwdt0
            | SocResetReason::Cpu0RtcWdt
            | SocResetReason::SysRtcWdt,
        ) => ResetCause::Watchdog,
        Some(SocResetReason::SysBrownOut) => ResetCause::Brownout,
        _ => ResetCause::Unknown,
    }
}
