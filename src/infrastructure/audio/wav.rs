use std::io::Cursor;
use std::path::Path;

/// Sample format the recognition engine expects.
pub const CANONICAL_SAMPLE_RATE: u32 = 16_000;
pub const CANONICAL_BITS_PER_SAMPLE: u16 = 16;

/// Fixed PCM assumptions for raw uploads: 44-byte header, 16 kHz, 16-bit, mono.
const WAV_HEADER_BYTES: u64 = 44;
const PCM_BYTES_PER_SECOND: u64 = 32_000;

#[derive(Debug, thiserror::Error)]
pub enum WavError {
    #[error("malformed wav: {0}")]
    Malformed(String),
    #[error("encode failed: {0}")]
    EncodeFailed(String),
}

/// Decoded WAV audio, downmixed to mono and normalized to `f32` samples.
#[derive(Debug, Clone)]
pub struct DecodedWav {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl DecodedWav {
    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Decode a WAV container into mono `f32` samples.
pub fn decode_wav(data: &[u8]) -> Result<DecodedWav, WavError> {
    let mut reader = hound::WavReader::new(Cursor::new(data))
        .map_err(|e| WavError::Malformed(format!("header: {}", e)))?;

    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| WavError::Malformed(format!("samples: {}", e)))?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()
                .map_err(|e| WavError::Malformed(format!("samples: {}", e)))?
        }
    };

    // Downmix to mono if multi-channel
    let samples = if channels > 1 {
        interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        interleaved
    };

    tracing::debug!(
        samples = samples.len(),
        sample_rate = spec.sample_rate,
        channels = channels,
        "WAV decoded to mono PCM"
    );

    Ok(DecodedWav {
        samples,
        sample_rate: spec.sample_rate,
    })
}

/// Re-encode decoded audio as a canonical 16 kHz mono 16-bit PCM WAV file.
pub fn write_canonical_wav(path: &Path, decoded: &DecodedWav) -> Result<(), WavError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: CANONICAL_SAMPLE_RATE,
        bits_per_sample: CANONICAL_BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    };

    let samples = if decoded.sample_rate == CANONICAL_SAMPLE_RATE {
        decoded.samples.clone()
    } else {
        resample_linear(&decoded.samples, decoded.sample_rate, CANONICAL_SAMPLE_RATE)
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| WavError::EncodeFailed(format!("create: {}", e)))?;

    for sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer
            .write_sample(value)
            .map_err(|e| WavError::EncodeFailed(format!("write: {}", e)))?;
    }

    writer
        .finalize()
        .map_err(|e| WavError::EncodeFailed(format!("finalize: {}", e)))?;

    Ok(())
}

/// Duration estimate for a raw upload, assuming the fixed PCM format.
///
/// `44 + 32000 * k` bytes map to exactly `k` seconds; anything at or below
/// the header size counts as zero.
pub fn estimate_duration_secs(total_bytes: u64) -> f64 {
    total_bytes.saturating_sub(WAV_HEADER_BYTES) as f64 / PCM_BYTES_PER_SECOND as f64
}

fn resample_linear(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if samples.is_empty() {
        return Vec::new();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let out_len = (samples.len() as f64 / ratio).round() as usize;
    let mut output = Vec::with_capacity(out_len);

    for i in 0..out_len {
        let pos = i as f64 * ratio;
        let idx = pos as usize;
        let frac = (pos - idx as f64) as f32;
        let a = samples[idx.min(samples.len() - 1)];
        let b = samples[(idx + 1).min(samples.len() - 1)];
        output.push(a + (b - a) * frac);
    }

    output
}
