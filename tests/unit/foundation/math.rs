use super::*;

#[test]
fn fnv_chunked_writes_match_one_shot() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"advblend");
    let mut b = Fnv1a64::new_default();
    b.write_bytes(b"a");
    b.write_bytes(b"dvblend");
    assert_eq!(a.finish(), b.finish());
    assert_eq!(name_seed("advblend"), a.finish());
    assert_ne!(name_seed("ops"), name_seed("coherent"));
}

#[test]
fn splitmix_is_deterministic_and_bounded() {
    let mut a = SplitMix64::new(7);
    let mut b = SplitMix64::new(7);
    for _ in 0..64 {
        let x = a.index_inclusive(45);
        assert_eq!(x, b.index_inclusive(45));
        assert!(x <= 45);
    }
}

#[test]
fn unorm8_quantization_clamps_and_rounds() {
    assert_eq!(quantize_unorm8(-0.125), 0.0);
    assert_eq!(quantize_unorm8(1.125), 1.0);
    assert_eq!(quantize_unorm8(0.5), 128.0 / 255.0);
    assert_eq!(quantize_unorm8(f32::NAN), 0.0);
}
