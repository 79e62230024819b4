//! End-to-end behaviour of the Huffman codec on representative inputs.

use std::sync::Arc;
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use huffpack::header::header_size;
use huffpack::{decode, encode, EncodedStream, Error, HuffmanCodec};
use huffpack_core::{Codec, CodecConfig, Compressor, Decompressor, Metrics};

fn assert_roundtrip(data: &[u8]) {
    let stream = encode(data).unwrap();
    assert_eq!(decode(&stream).unwrap(), data);
}

#[test]
fn test_roundtrip_repeated_byte() {
    assert_roundtrip(b"aaaaaaaa");
}

#[test]
fn test_roundtrip_all_byte_values() {
    let data: Vec<u8> = (0..=255u8).collect();
    assert_roundtrip(&data);

    let stream = encode(&data).unwrap();
    let parsed = EncodedStream::parse(&stream).unwrap();
    assert_eq!(parsed.frequencies.distinct(), 256);
    // Uniform over 256 symbols: every code is exactly 8 bits.
    assert_eq!(parsed.data_bits(), 256 * 8);
}

#[test]
fn test_roundtrip_random_binary() {
    let mut rng = StdRng::seed_from_u64(42);
    for size in [1usize, 2, 3, 17, 255, 4096, 65536] {
        let mut data = vec![0u8; size];
        rng.fill(&mut data[..]);
        assert_roundtrip(&data);
    }
}

#[test]
fn test_roundtrip_skewed_text() {
    assert_roundtrip(b"aaaaaaaab");
    assert_roundtrip("The quick brown fox jumps over the lazy dog. ".repeat(50).as_bytes());
}

#[test]
fn test_single_symbol_one_bit_path() {
    let stream = encode(b"xxxx").unwrap();
    let parsed = EncodedStream::parse(&stream).unwrap();

    assert_eq!(parsed.frequencies.distinct(), 1);
    assert_eq!(parsed.data_bits(), 4);
    assert_eq!(parsed.padding, 4);
    assert_eq!(decode(&stream).unwrap(), b"xxxx");
}

#[test]
fn test_empty_input_rejected() {
    assert!(matches!(encode(b""), Err(Error::EmptyInput)));
}

#[test]
fn test_padding_zero_on_byte_boundary() {
    // Two equally frequent symbols get 1-bit codes: 8 symbols, 8 bits.
    let stream = encode(b"abababab").unwrap();
    assert_eq!(stream[header_size(2)], 0);

    let parsed = EncodedStream::parse(&stream).unwrap();
    assert_eq!(parsed.padding, 0);
    assert_eq!(parsed.data.len(), 1);

    // A single symbol repeated 16 times: 16 bits.
    let stream = encode(&[b'z'; 16]).unwrap();
    assert_eq!(stream[header_size(1)], 0);
    assert_eq!(decode(&stream).unwrap(), vec![b'z'; 16]);
}

#[test]
fn test_truncated_payload_is_corrupt() {
    for data in [
        b"aaaaaaaab".to_vec(),
        b"xxxx".to_vec(),
        b"abababab".to_vec(),
        (0..=255u8).collect(),
    ] {
        let stream = encode(&data).unwrap();
        let result = decode(&stream[..stream.len() - 1]);
        assert!(
            matches!(result, Err(Error::CorruptStream { .. })),
            "{data:?}: expected CorruptStream, got {result:?}"
        );
    }
}

#[test]
fn test_truncated_header_is_malformed() {
    let stream = encode(b"header truncation").unwrap();
    let distinct = EncodedStream::parse(&stream).unwrap().frequencies.distinct();

    for cut in [0, 3, 5, header_size(distinct) - 1] {
        assert!(
            matches!(decode(&stream[..cut]), Err(Error::MalformedHeader { .. })),
            "cut at {cut}"
        );
    }
}

#[test]
fn test_flipped_payload_bit_never_panics() {
    let data = "mississippi river banks".repeat(8);
    let stream = encode(data.as_bytes()).unwrap();
    let header_len = EncodedStream::parse(&stream).unwrap().header_len;

    for index in header_len + 1..stream.len() {
        for bit in 0..8 {
            let mut corrupted = stream.clone();
            corrupted[index] ^= 1 << bit;
            match decode(&corrupted) {
                Ok(output) => assert_eq!(output.len(), data.len()),
                Err(err) => assert!(matches!(err, Error::CorruptStream { .. })),
            }
        }
    }
}

#[test]
fn test_deterministic_output() {
    let data = b"determinism check: same input, same bytes";
    assert_eq!(encode(data).unwrap(), encode(data).unwrap());
    assert_eq!(
        HuffmanCodec::new().compress(data).unwrap(),
        HuffmanCodec::new().compress(data).unwrap()
    );
}

#[test]
fn test_compression_on_small_alphabet() {
    let mut rng = StdRng::seed_from_u64(7);
    let data: Vec<u8> = (0..1000)
        .map(|_| match rng.gen_range(0..100) {
            0..=59 => b'A',
            60..=84 => b'C',
            85..=94 => b'G',
            _ => b'T',
        })
        .collect();

    let stream = encode(&data).unwrap();
    let parsed = EncodedStream::parse(&stream).unwrap();
    assert!(parsed.payload_len() < data.len());
    assert!(stream.len() < data.len());
    assert_eq!(decode(&stream).unwrap(), data);
}

#[test]
fn test_wrong_format_input() {
    let gzip_magic = [0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00];
    assert!(matches!(
        decode(&gzip_magic),
        Err(Error::MalformedHeader { .. })
    ));
}

#[test]
fn test_shared_codec_across_threads() {
    let codec = Arc::new(HuffmanCodec::with_config(CodecConfig::default()));
    let handles: Vec<_> = (0..4u8)
        .map(|i| {
            let codec = Arc::clone(&codec);
            thread::spawn(move || {
                let data: Vec<u8> = (0..2000u32).map(|j| (j % (7 + i as u32)) as u8).collect();
                let stream = codec.compress(&data).unwrap();
                assert_eq!(codec.decompress(&stream).unwrap(), data);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_metrics_over_operations() {
    let codec = <HuffmanCodec as Codec>::new();
    let mut metrics = Metrics::new();

    for input in [&b"first input"[..], &b"second, longer input text"[..], &b""[..]] {
        match codec.compress_with_stats(input) {
            Ok((_, stats)) => metrics.record(&stats),
            Err(_) => metrics.record_error(),
        }
    }

    assert_eq!(metrics.total_operations, 3);
    assert_eq!(metrics.error_count, 1);
    assert_eq!(metrics.total_bytes_in, 11 + 25);
}
