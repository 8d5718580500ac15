#![no_main]

use ezview_ppm::ezview_core::bytestream::ByteCursor;
use ezview_ppm::ezview_core::options::DecoderOptions;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // keep allocations bounded, headers can claim huge images
    let options = DecoderOptions::default()
        .set_max_width(1024)
        .set_max_height(1024);

    let mut decoder = ezview_ppm::PpmDecoder::new_with_options(options, ByteCursor::new(data));

    if let Ok(image) = decoder.decode() {
        let (width, height) = image.dimensions();
        assert_eq!(image.pixels().len(), width * height);
    }
});
