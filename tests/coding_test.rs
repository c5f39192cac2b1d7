//! Tests for preferred sample coding

use trs_trace::{uniform_coding, Encoding, Error, Trace};

#[test]
fn test_byte_range() {
    let trace = Trace::new(&[0.0, 1.0, 2.0, 127.0]);
    assert_eq!(trace.preferred_coding(), Encoding::Byte);
}

#[test]
fn test_short_range() {
    // 200 exceeds i8::MAX
    let trace = Trace::new(&[0.0, 1.0, 200.0]);
    assert_eq!(trace.preferred_coding(), Encoding::Short);
}

#[test]
fn test_int_range() {
    // 40000 exceeds i16::MAX
    let trace = Trace::new(&[0.0, 40_000.0]);
    assert_eq!(trace.preferred_coding(), Encoding::Int);
}

#[test]
fn test_float_for_fraction() {
    let trace = Trace::new(&[0.5, 1.0]);
    assert_eq!(trace.preferred_coding(), Encoding::Float);
}

#[test]
fn test_illegal_for_nan() {
    let trace = Trace::new(&[1.0, f32::NAN]);
    assert_eq!(trace.preferred_coding(), Encoding::Illegal);
}

#[test]
fn test_illegal_beats_forced_float() {
    let mut trace = Trace::new(&[1.0, f32::INFINITY]);
    trace.force_float_coding();
    assert_eq!(trace.preferred_coding(), Encoding::Illegal);

    let trace = Trace::builder(vec![f32::NEG_INFINITY]).force_float().build().unwrap();
    assert!(trace.is_float_coding_forced());
    assert_eq!(trace.preferred_coding(), Encoding::Illegal);
}

#[test]
fn test_forced_float_on_integral_samples() {
    let trace = Trace::builder(vec![1.0, 2.0, 3.0]).force_float().build().unwrap();
    assert_eq!(trace.preferred_coding(), Encoding::Float);
}

#[test]
fn test_empty_is_byte() {
    let trace = Trace::new(&[]);
    assert_eq!(trace.preferred_coding(), Encoding::Byte);
    assert!((trace.envelope().min() - 0.0).abs() < f32::EPSILON);
    assert!((trace.envelope().max() - 0.0).abs() < f32::EPSILON);
}

#[test]
fn test_all_negative_compared_against_zero() {
    // max stays at the 0.0 seed
    let trace = Trace::new(&[-100.0, -50.0]);
    assert!((trace.envelope().max() - 0.0).abs() < f32::EPSILON);
    assert_eq!(trace.preferred_coding(), Encoding::Byte);

    let trace = Trace::new(&[-40_000.0, -1.0]);
    assert_eq!(trace.preferred_coding(), Encoding::Int);
}

#[test]
fn test_query_is_idempotent() {
    let trace = Trace::new(&[0.0, -300.0]);
    assert!(!trace.is_coding_cached());

    let first = trace.preferred_coding();
    let envelope = *trace.envelope();
    let second = trace.preferred_coding();

    assert_eq!(first, Encoding::Short);
    assert_eq!(first, second);
    assert_eq!(envelope, *trace.envelope());
}

#[test]
fn test_invalidate_forces_rescan() {
    let mut trace = Trace::new(&[1.0]);
    let _ = trace.preferred_coding();
    assert!(trace.is_coding_cached());

    trace.invalidate_coding();
    assert!(!trace.is_coding_cached());
    assert_eq!(trace.preferred_coding(), Encoding::Byte);
    assert!(trace.is_coding_cached());
}

#[test]
fn test_uniform_coding_widens() {
    let traces = vec![
        Trace::new(&[1.0]),
        Trace::new(&[300.0]),
        Trace::new(&[-2.0]),
    ];
    assert_eq!(uniform_coding(&traces).unwrap(), Encoding::Short);

    let traces = vec![Trace::new(&[1.0]), Trace::new(&[0.25])];
    assert_eq!(uniform_coding(&traces).unwrap(), Encoding::Float);
}

#[test]
fn test_uniform_coding_empty_set() {
    let traces: Vec<Trace> = Vec::new();
    assert_eq!(uniform_coding(&traces).unwrap(), Encoding::Byte);
}

#[test]
fn test_uniform_coding_reports_illegal_trace() {
    let traces = vec![Trace::new(&[1.0]), Trace::new(&[f32::NAN])];
    match uniform_coding(&traces) {
        Err(Error::IllegalSamples { index }) => assert_eq!(index, 1),
        other => panic!("expected illegal samples error, got {other:?}"),
    }
}

#[test]
fn test_encode_with_preferred_coding() {
    let trace = Trace::new(&[0.0, -1.0, 200.0]);
    let coding = trace.preferred_coding();

    let mut out = Vec::new();
    coding.encode_samples(trace.samples(), &mut out).unwrap();

    assert_eq!(out.len(), trace.number_of_samples() * coding.sample_size());
    assert_eq!(out, vec![0x00, 0x00, 0xff, 0xff, 0xc8, 0x00]);
}

#[test]
fn test_two_pow_31_saturates_in_int_coding() {
    // 2^31 survives the integrality check but not the i32 write
    let trace = Trace::new(&[2_147_483_648.0]);
    assert_eq!(trace.preferred_coding(), Encoding::Int);

    let mut out = Vec::new();
    Encoding::Int.encode_samples(trace.samples(), &mut out).unwrap();
    assert_eq!(out, vec![0xff, 0xff, 0xff, 0x7f]);

    let trace = Trace::new(&[-2_147_483_648.0]);
    let mut out = Vec::new();
    trace.preferred_coding().encode_samples(trace.samples(), &mut out).unwrap();
    assert_eq!(out, vec![0x00, 0x00, 0x00, 0x80]);
}

#[test]
fn test_encoding_display() {
    assert_eq!(Encoding::Short.to_string(), "short");
    assert_eq!(format!("{}", Encoding::Illegal), "illegal");
}

#[test]
fn test_encoding_json() {
    let json = serde_json::to_string(&Encoding::Float).unwrap();
    assert_eq!(json, "\"Float\"");
    let back: Encoding = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Encoding::Float);
}
