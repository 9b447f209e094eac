#![no_main]

use libfuzzer_sys::fuzz_target;
use problem_details::Problem;

fuzz_target!(|data: &[u8]| {
    // Limit input size to avoid OOM on pathological inputs
    if data.len() > 4096 {
        return;
    }
    // Rejections are expected; accepted documents must survive a round trip
    if let Ok(problem) = Problem::from_slice(data) {
        let text = problem.to_json();
        let back = Problem::from_json(&text).expect("serialized problem must parse");
        assert_eq!(back, problem);
    }
});
