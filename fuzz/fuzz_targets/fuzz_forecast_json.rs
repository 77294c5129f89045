#![no_main]

use barotrend::events::EventPipeline;
use barotrend::series::{parse_forecast, IngestOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(body) = std::str::from_utf8(data) else {
        return;
    };

    // Any body must either parse or fail with an error, never panic
    for options in [IngestOptions::default(), IngestOptions::strict()] {
        if let Ok(series) = parse_forecast(body, &options) {
            // Whatever ingestion accepts, the pipeline must handle
            let snapshot = EventPipeline::default().run(&series);
            assert!(snapshot.events.len() <= series.len());
        }
    }
});
