//! Channel downmixing and sample-rate conversion.
//!
//! The microphone delivers whatever the device natively produces; Whisper
//! wants 16 kHz mono.  [`downmix_mono`] averages interleaved channels and
//! [`resample`] converts between arbitrary rates with linear interpolation,
//! which is plenty for speech into a 16 kHz recognizer.

/// Average interleaved multi-channel audio down to mono.
///
/// Output length is `samples.len() / channels`.  Mono input is returned as
/// an owned copy without touching the values; zero channels yields an empty
/// vector.
pub fn downmix_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    match channels {
        0 => Vec::new(),
        1 => samples.to_vec(),
        n => {
            let n = usize::from(n);
            samples
                .chunks_exact(n)
                .map(|frame| frame.iter().sum::<f32>() / n as f32)
                .collect()
        }
    }
}

/// Convert `samples` from `from_hz` to `to_hz` by linear interpolation.
///
/// Equal rates short-circuit to a copy.  Output length is
/// `round(samples.len() * to_hz / from_hz)` within one sample.
pub fn resample(samples: &[f32], from_hz: u32, to_hz: u32) -> Vec<f32> {
    if from_hz == to_hz || samples.is_empty() {
        return samples.to_vec();
    }

    let step = from_hz as f64 / to_hz as f64;
    let out_len = (samples.len() as f64 / step).round() as usize;
    let mut out = Vec::with_capacity(out_len);

    for i in 0..out_len {
        let pos = i as f64 * step;
        let idx = pos as usize;
        let frac = (pos - idx as f64) as f32;

        let sample = match (samples.get(idx), samples.get(idx + 1)) {
            (Some(&a), Some(&b)) => a + (b - a) * frac,
            (Some(&a), None) => a,
            _ => break,
        };
        out.push(sample);
    }

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- downmix_mono ------------------------------------------------------

    #[test]
    fn mono_passes_through() {
        let input = vec![0.1_f32, 0.2, 0.3];
        assert_eq!(downmix_mono(&input, 1), input);
    }

    #[test]
    fn stereo_frames_are_averaged() {
        let input = vec![1.0_f32, -1.0, 0.5, 0.5];
        let out = downmix_mono(&input, 2);
        assert_eq!(out.len(), 2);
        assert!((out[0]).abs() < 1e-6);
        assert!((out[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn zero_channels_yields_empty() {
        assert!(downmix_mono(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn trailing_partial_frame_is_dropped() {
        // 5 samples at 2 channels: the dangling sample must not panic.
        let input = vec![0.2_f32; 5];
        assert_eq!(downmix_mono(&input, 2).len(), 2);
    }

    // ---- resample ----------------------------------------------------------

    #[test]
    fn equal_rates_are_a_noop() {
        let input: Vec<f32> = (0..100).map(|i| i as f32 / 100.0).collect();
        assert_eq!(resample(&input, 16_000, 16_000), input);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(resample(&[], 48_000, 16_000).is_empty());
    }

    #[test]
    fn downsample_48k_to_16k_thirds_the_length() {
        let input = vec![0.5_f32; 480]; // 10 ms @ 48 kHz
        assert_eq!(resample(&input, 48_000, 16_000).len(), 160);
    }

    #[test]
    fn upsample_8k_to_16k_doubles_the_length() {
        let input = vec![0.0_f32; 80]; // 10 ms @ 8 kHz
        assert_eq!(resample(&input, 8_000, 16_000).len(), 160);
    }

    #[test]
    fn odd_ratio_length_is_within_one_sample() {
        let input = vec![0.0_f32; 44_100]; // 1 s @ 44.1 kHz
        let out = resample(&input, 44_100, 16_000);
        assert!(out.len().abs_diff(16_000) <= 1, "got {}", out.len());
    }

    #[test]
    fn dc_signal_keeps_its_amplitude() {
        let input = vec![0.5_f32; 480];
        for s in resample(&input, 48_000, 16_000) {
            assert!((s - 0.5).abs() < 1e-5, "amplitude drift: {s}");
        }
    }
}
