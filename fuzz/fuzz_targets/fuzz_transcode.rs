#![no_main]
use std::cell::RefCell;

use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use wtf8::{DecodeOptions, EncodeOptions, LoneSurrogateMode, PassthroughMode};

const HEADER: usize = 1; // 1 flag byte

thread_local! {
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Code units the byte-level mutator rarely produces on its own: both
/// surrogate halves, their boundaries, and units just outside them.
static INTERESTING_UNITS: &[u16] = &[
    0x0000, 0x007F, 0x0080, 0x07FF, 0x0800, 0xD7FF, 0xD800, 0xDBFF, 0xDC00, 0xDFFF, 0xE000,
    0xFEFF, 0xFFFD, 0xFFFF,
];

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(4) {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x03);

        let mut written = HEADER;
        while written + 2 <= max_size.min(HEADER + 2 * 64) {
            let unit = with_rng(|rng| {
                if rng.random_bool(0.5) {
                    INTERESTING_UNITS[rng.random_range(0..INTERESTING_UNITS.len())]
                } else {
                    rng.random::<u16>()
                }
            });
            data[written..written + 2].copy_from_slice(&unit.to_le_bytes());
            written += 2;
            if with_rng(|rng| rng.random_ratio(1, 16)) {
                break;
            }
        }
        written
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

/// Input split into its flag byte and a code-unit view of the remainder.
#[derive(Debug)]
struct Case {
    flags: u8,
    units: Vec<u16>,
}

fn transcode(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }
    let case = Case {
        flags: data[0],
        units: data[HEADER..]
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect(),
    };
    let raw = &data[HEADER..];

    let encode_options = EncodeOptions {
        lone_surrogates: if case.flags & 1 != 0 {
            LoneSurrogateMode::Preserve
        } else {
            LoneSurrogateMode::Replace
        },
    };
    let decode_options = DecodeOptions {
        passthrough: if case.flags & 2 != 0 {
            PassthroughMode::Latin1
        } else {
            PassthroughMode::Utf8
        },
    };

    // Arbitrary bytes always decode, to no more units than there were bytes.
    let decoded = wtf8::decode_with(raw, decode_options);
    assert!(decoded.len() <= raw.len());

    let bytes = wtf8::encode_with(&case.units, encode_options);
    let well_formed = char::decode_utf16(case.units.iter().copied()).all(|r| r.is_ok());

    if encode_options.lone_surrogates == LoneSurrogateMode::Preserve {
        assert_eq!(wtf8::decode(&bytes), case.units);
    } else {
        assert!(std::str::from_utf8(&bytes).is_ok());
        if well_formed {
            assert_eq!(wtf8::decode(&bytes), case.units);
        }
    }

    assert_eq!(wtf8::try_encode(&case.units).is_ok(), well_formed);
}

fuzz_target!(|data: &[u8]| transcode(data));
