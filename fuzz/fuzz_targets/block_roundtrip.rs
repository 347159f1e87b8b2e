#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > lz4::LZ4_MAX_INPUT_SIZE {
        return;
    }

    let bound = lz4::compress_bound(data.len() as i32);
    if bound <= 0 {
        return;
    }
    let mut compressed = vec![0u8; bound as usize];
    let csize = match lz4::compress_default(data, &mut compressed) {
        Ok(n) => n,
        Err(_) => return,
    };
    compressed.truncate(csize);

    let mut recovered = vec![0u8; data.len()];
    let n = lz4::decompress_safe(&compressed, &mut recovered)
        .expect("decompress_safe must accept our own compressed output");
    assert_eq!(n, data.len());
    assert_eq!(
        recovered, data,
        "block round-trip mismatch: compressed {} bytes back to {} bytes (expected {})",
        csize,
        n,
        data.len()
    );
});
