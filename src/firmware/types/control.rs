pub(crate) const BASS_CORNER_HZ: f32 = 300.0;
pub(crate) const TREBLE_CORNER_HZ: f32 = 4_000.0;

/// Gains posted to the control endpoint. Keys missing from the query stay 0.0.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GainUpdate {
    pub gain_1: f32,
    pub gain_2: f32,
    pub gain_3: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DspFlow {
    EqBassTreble,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterParams {
    pub flow: DspFlow,
    pub fc_1: f32,
    pub gain_1: f32,
    pub fc_3: f32,
    pub gain_3: f32,
}

impl FilterParams {
    /// Two-band shelf EQ. The middle gain is accepted by the endpoint but not applied.
    pub const fn bass_treble(update: GainUpdate) -> Self {
        Self {
            flow: DspFlow::EqBassTreble,
            fc_1: BASS_CORNER_HZ,
            gain_1: update.gain_1,
            fc_3: TREBLE_CORNER_HZ,
            gain_3: update.gain_3,
        }
    }
}
