use crate::firmware::types::{FilterParams, GainUpdate};

/// Receiver of new EQ settings, normally the DSP pipeline.
pub trait FilterSink {
    fn update_filter_params(&mut self, params: &FilterParams);
}

/// Used on boards built without the DSP stage.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingFilterSink;

impl FilterSink for LoggingFilterSink {
    fn update_filter_params(&mut self, params: &FilterParams) {
        log::info!(
            "dsp: {:?} fc_1={} gain_1={} fc_3={} gain_3={}",
            params.flow,
            params.fc_1,
            params.gain_1,
            params.fc_3,
            params.gain_3
        );
    }
}

pub fn apply_gain_update<S: FilterSink>(sink: &mut S, update: GainUpdate) -> FilterParams {
    log::info!(
        "ui_http: gain_1={} gain_2={} gain_3={}",
        update.gain_1,
        update.gain_2,
        update.gain_3
    );
    let params = FilterParams::bass_treble(update);
    sink.update_filter_params(&params);
    params
}
