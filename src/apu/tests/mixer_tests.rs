// Mixer range tests

use crate::apu::Apu;

fn apu() -> Apu {
    Apu::new(44_100, 4096)
}

#[test]
fn test_mixed_output_in_unit_range_for_all_combinations() {
    let apu = apu();

    // Every reachable mixer input: pulse sums 0-30 (two 0-15 channels)
    // against all tnd sums 0-202 (3*15 + 2*15 + 127)
    for pulse_sum in 0..=30 {
        for tnd_sum in 0..=202 {
            let mixed = apu.pulse_table[pulse_sum] + apu.tnd_table[tnd_sum];
            assert!(
                (0.0..1.0).contains(&mixed),
                "mix({}, {}) = {} out of range",
                pulse_sum,
                tnd_sum,
                mixed
            );
        }
    }
}

#[test]
fn test_silence_mixes_to_zero() {
    let apu = apu();
    assert_eq!(apu.output(), 0.0);
}

#[test]
fn test_pulse_curve_is_monotonic() {
    let apu = apu();
    for n in 1..31 {
        assert!(apu.pulse_table[n] > apu.pulse_table[n - 1]);
    }
}

#[test]
fn test_tnd_curve_is_monotonic() {
    let apu = apu();
    for n in 1..204 {
        assert!(apu.tnd_table[n] > apu.tnd_table[n - 1]);
    }
}

#[test]
fn test_known_table_values() {
    let apu = apu();

    // Spot checks against the transfer functions
    let expected_pulse = 95.52 / (8128.0 / 16.0 + 100.0);
    assert!((apu.pulse_table[16] - expected_pulse).abs() < 1e-6);

    let expected_tnd = 163.67 / (24329.0 / 100.0 + 100.0);
    assert!((apu.tnd_table[100] - expected_tnd).abs() < 1e-6);
}
