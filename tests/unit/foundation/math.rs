use super::*;

#[test]
fn fnv_seeded_hash_is_stable() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"strokes");
    let mut b = Fnv1a64::new_default();
    b.write_u8(b's');
    b.write_bytes(b"trokes");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn sample_seed_is_deterministic_and_spread() {
    assert_eq!(sample_seed(7, 3), sample_seed(7, 3));
    assert_ne!(sample_seed(7, 3), sample_seed(7, 4));
    assert_ne!(sample_seed(7, 3), sample_seed(8, 3));

    let seeds = (0..64).map(|i| sample_seed(1, i)).collect::<std::collections::HashSet<_>>();
    assert_eq!(seeds.len(), 64);
}
