#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 4096 {
        return;
    }

    if let Ok(line) = std::str::from_utf8(data) {
        let _ = yolo2csv::ir::io_yolo::fuzz_parse_annotation_line(line);
    }
});
