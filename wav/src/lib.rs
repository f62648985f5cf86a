//! WAV container encode/decode for f32 PCM samples.
//!
//! Audio is stored as mono 32-bit float PCM, which round-trips `f32`
//! sample buffers bit-exactly. Encoding rejects an empty sample buffer;
//! every other failure comes from the underlying container library.
//!
//! # Example
//!
//! ```rust,no_run
//! let samples = vec![0.0f32; 24000];
//! murmur_wav::encode("out.wav", &samples, 24000)?;
//! let (decoded, rate) = murmur_wav::decode_file("out.wav")?;
//! assert_eq!(rate, 24000);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::Read;
use std::path::Path;

use thiserror::Error;

/// Error type for WAV encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The sample buffer was empty.
    #[error("no samples to encode")]
    Empty,

    /// The container library rejected the data.
    #[error("wav write failed: {0}")]
    Wav(#[from] hound::Error),
}

/// Error type for WAV decoding.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The container library could not parse the input.
    #[error("wav read failed: {0}")]
    Wav(#[from] hound::Error),

    /// The file is valid WAV but not mono 32-bit float.
    #[error("unsupported wav layout: {channels} channel(s), {bits} bits {format:?}")]
    Unsupported {
        channels: u16,
        bits: u16,
        format: hound::SampleFormat,
    },
}

fn float_spec(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    }
}

/// Writes mono f32 samples to `path` as a 32-bit float WAV file.
///
/// Fails with [`EncodeError::Empty`] if `samples` is empty; a zero-length
/// audio file is never produced.
pub fn encode<P: AsRef<Path>>(path: P, samples: &[f32], sample_rate: u32) -> Result<(), EncodeError> {
    if samples.is_empty() {
        return Err(EncodeError::Empty);
    }

    let mut writer = hound::WavWriter::create(path, float_spec(sample_rate))?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Reads a mono 32-bit float WAV stream, returning the samples and rate.
pub fn decode<R: Read>(reader: R) -> Result<(Vec<f32>, u32), DecodeError> {
    let mut reader = hound::WavReader::new(reader)?;
    let spec = reader.spec();
    if spec.channels != 1 || spec.bits_per_sample != 32 || spec.sample_format != hound::SampleFormat::Float {
        return Err(DecodeError::Unsupported {
            channels: spec.channels,
            bits: spec.bits_per_sample,
            format: spec.sample_format,
        });
    }

    let samples = reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?;
    Ok((samples, spec.sample_rate))
}

/// Reads a mono 32-bit float WAV file from disk.
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, u32), DecodeError> {
    let file = std::fs::File::open(path).map_err(hound::Error::IoError)?;
    decode(std::io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.wav");
        let samples = vec![0.0f32, 0.25, -0.25, 1.0, -1.0, 0.5, f32::MIN_POSITIVE];

        encode(&path, &samples, 24000).unwrap();
        let (decoded, rate) = decode_file(&path).unwrap();

        assert_eq!(rate, 24000);
        assert_eq!(decoded, samples);
    }

    #[test]
    fn test_empty_samples_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.wav");

        let err = encode(&path, &[], 24000).unwrap_err();
        assert!(matches!(err, EncodeError::Empty));
        assert!(!path.exists());
    }

    #[test]
    fn test_one_second_of_silence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("silence.wav");
        let samples = vec![0.0f32; 24000];

        encode(&path, &samples, 24000).unwrap();
        let (decoded, rate) = decode_file(&path).unwrap();

        assert_eq!(rate, 24000);
        assert_eq!(decoded.len(), 24000);
        assert!(decoded.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_decode_rejects_int_pcm() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("int16.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 24000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        writer.write_sample(0i16).unwrap();
        writer.finalize().unwrap();

        let err = decode_file(&path).unwrap_err();
        assert!(matches!(err, DecodeError::Unsupported { .. }));
    }
}
