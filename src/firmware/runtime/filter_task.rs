use crate::firmware::{
    config::channels::GAIN_UPDATES,
    control::{apply_gain_update, LoggingFilterSink},
};

#[embassy_executor::task]
pub(super) async fn filter_task() {
    let mut sink = LoggingFilterSink;
    loop {
        let update = GAIN_UPDATES.receive().await;
        apply_gain_update(&mut sink, update);
    }
}
