use std::io::{self, Cursor, Read};

use lowpass::filter::{NoTrace, WriterTrace, SAMPLE_BYTES};
use lowpass::{run, ConfigError, LowpassFilter, OscillatorState, Sample};

fn bytes(samples: &[Sample]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

fn samples(bytes: &[u8]) -> Vec<Sample> {
    bytes
        .chunks_exact(SAMPLE_BYTES)
        .map(|b| Sample::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

/// Reader that returns reads of varying, deliberately misaligned lengths
struct Fragmented {
    data: Vec<u8>,
    pos: usize,
    sizes: Vec<usize>,
    turn: usize,
}

impl Fragmented {
    fn new(data: Vec<u8>, sizes: &[usize]) -> Self {
        Fragmented {
            data,
            pos: 0,
            sizes: sizes.to_vec(),
            turn: 0,
        }
    }
}

impl Read for Fragmented {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let want = self.sizes[self.turn % self.sizes.len()];
        self.turn += 1;
        let n = want.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

fn signal(len: usize) -> Vec<Sample> {
    // Deterministic pseudo-random drive with large swings
    let mut x: u32 = 0x1234_5678;
    (0..len)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            (x as Sample) >> 8
        })
        .collect()
}

fn filter_all<R: Read>(input: R, state: OscillatorState, block_samples: usize) -> (Vec<Sample>, String) {
    let mut filter = LowpassFilter::new(state, WriterTrace::new(Vec::new()));
    let mut out = Vec::new();
    run(input, &mut out, &mut filter, block_samples).unwrap();
    let (_, trace) = filter.into_parts();
    (samples(&out), String::from_utf8(trace.into_inner()).unwrap())
}

fn damped() -> OscillatorState {
    OscillatorState::initialize(-40, 300, 17, 3, 8).unwrap()
}

#[test]
fn repeated_runs_are_identical() {
    let input = bytes(&signal(5000));
    let first = filter_all(Cursor::new(input.clone()), damped(), 1023);
    let second = filter_all(Cursor::new(input), damped(), 1023);
    assert_eq!(first, second);
    assert_eq!(first.0.len(), 4999);
    assert_eq!(first.1.lines().count(), 4999);
}

#[test]
fn output_is_independent_of_block_size() {
    let input = bytes(&signal(777));
    let (reference, reference_trace) = filter_all(Cursor::new(input.clone()), damped(), 1 << 12);

    for block_samples in [1, 2, 3, 7, 64, 776, 777, 778] {
        let (out, trace) = filter_all(Cursor::new(input.clone()), damped(), block_samples);
        assert_eq!(out, reference, "block size {}", block_samples);
        assert_eq!(trace, reference_trace, "block size {}", block_samples);
    }

    let read_patterns: [&[usize]; 4] = [&[1], &[3, 5, 2], &[4095, 1, 6], &[13]];
    for sizes in read_patterns {
        let (out, _) = filter_all(Fragmented::new(input.clone(), sizes), damped(), 5);
        assert_eq!(out, reference, "read sizes {:?}", sizes);
    }
}

#[test]
fn output_length_is_one_less_than_input() {
    for n in [0usize, 1, 2, 3, 1023, 1024, 1025, 4096] {
        let input = bytes(&signal(n));
        let (out, _) = filter_all(Fragmented::new(input, &[7, 1, 300]), OscillatorState::default(), 100);
        assert_eq!(out.len(), n.saturating_sub(1), "{} input samples", n);
    }
}

#[test]
fn zero_input_gives_zero_output() {
    for (f2inv, rp, rq) in [(301, 0, 1), (1, 1, 1), (-5, 9, 2), (Sample::MIN, Sample::MAX, -1)] {
        let state = OscillatorState::initialize(0, 0, f2inv, rp, rq).unwrap();
        let (out, trace) = filter_all(Cursor::new(vec![0u8; 400 * SAMPLE_BYTES]), state, 33);
        assert_eq!(out.len(), 399);
        assert!(out.iter().all(|&y| y == 0));
        assert!(trace.lines().all(|line| line == "0\t0"));
    }
}

#[test]
fn golden_single_step() {
    let state = OscillatorState::initialize(0, 10, 301, 0, 1).unwrap();
    let (out, trace) = filter_all(Cursor::new(bytes(&[0, 0])), state, 1023);
    assert_eq!(out, vec![10]);
    assert_eq!(trace, "10\t10\n");
}

#[test]
fn golden_driven_step() {
    let state = OscillatorState::initialize(1000, 0, 4, 1, 2).unwrap();
    let (out, trace) = filter_all(Cursor::new(bytes(&[100, 51])), state, 1023);
    assert_eq!(out, vec![931]);
    assert_eq!(trace, "931\t-134\n");
}

#[test]
fn zero_divisors_are_rejected_before_filtering() {
    assert_eq!(
        OscillatorState::initialize(0, 0, 0, 0, 1).unwrap_err(),
        ConfigError::ZeroInverseFrequencySquared
    );
    assert_eq!(
        OscillatorState::initialize(0, 0, 301, 0, 0).unwrap_err(),
        ConfigError::ZeroDampingDenominator
    );
    assert_eq!(
        ConfigError::ZeroDampingDenominator.to_string(),
        "damping denominator must be non-zero"
    );
}

#[test]
fn truncated_trailing_sample_is_dropped() {
    let mut input = bytes(&signal(10));
    input.extend_from_slice(&[0xaa, 0xbb]);

    let mut filter = LowpassFilter::new(damped(), NoTrace);
    let mut out = Vec::new();
    let summary = run(Fragmented::new(input, &[3]), &mut out, &mut filter, 4).unwrap();

    assert_eq!(summary.samples_in, 10);
    assert_eq!(summary.samples_out, 9);
    assert_eq!(summary.dropped_bytes, 2);
    assert_eq!(out.len(), 9 * SAMPLE_BYTES);

    let (expected, _) = filter_all(Cursor::new(bytes(&signal(10))), damped(), 4);
    assert_eq!(samples(&out), expected);
}
