/// Colour family of a video format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ColorFamily {
    /// Single luma plane.
    Gray,
    /// Planar RGB.
    Rgb,
    /// Planar YUV.
    Yuv,
    /// Legacy packed layouts (RGB32, YUY2). They need conversion before any mixing.
    Compat,
}

/// Storage type of one sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SampleType {
    /// Integer samples.
    Integer,
    /// IEEE float samples.
    Float,
}

/// Pixel format descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct VideoFormat {
    /// Stable host-assigned identifier.
    pub id: u32,
    /// Colour family.
    pub color_family: ColorFamily,
    /// Sample storage type.
    pub sample_type: SampleType,
    /// Significant bits per sample.
    pub bits_per_sample: u8,
    /// Storage bytes per sample.
    pub bytes_per_sample: u8,
    /// log2 horizontal chroma subsampling.
    pub sub_sampling_w: u8,
    /// log2 vertical chroma subsampling.
    pub sub_sampling_h: u8,
    /// Plane count.
    pub num_planes: u8,
}

impl VideoFormat {
    /// 8-bit 4:2:0 planar YUV.
    pub const YUV420P8: Self = Self {
        id: 3_000_010,
        color_family: ColorFamily::Yuv,
        sample_type: SampleType::Integer,
        bits_per_sample: 8,
        bytes_per_sample: 1,
        sub_sampling_w: 1,
        sub_sampling_h: 1,
        num_planes: 3,
    };

    /// 8-bit planar RGB.
    pub const RGB24: Self = Self {
        id: 2_000_010,
        color_family: ColorFamily::Rgb,
        sample_type: SampleType::Integer,
        bits_per_sample: 8,
        bytes_per_sample: 1,
        sub_sampling_w: 0,
        sub_sampling_h: 0,
        num_planes: 3,
    };

    /// 8-bit gray.
    pub const GRAY8: Self = Self {
        id: 1_000_010,
        color_family: ColorFamily::Gray,
        sample_type: SampleType::Integer,
        bits_per_sample: 8,
        bytes_per_sample: 1,
        sub_sampling_w: 0,
        sub_sampling_h: 0,
        num_planes: 1,
    };

    /// Legacy packed BGRA.
    pub const COMPAT_BGR32: Self = Self {
        id: 9_000_010,
        color_family: ColorFamily::Compat,
        sample_type: SampleType::Integer,
        bits_per_sample: 32,
        bytes_per_sample: 4,
        sub_sampling_w: 0,
        sub_sampling_h: 0,
        num_planes: 1,
    };

    /// Byte dimensions `(row_bytes, rows)` of `plane` for a `width`x`height` frame.
    pub fn plane_dims(&self, plane: usize, width: u32, height: u32) -> (usize, usize) {
        let (w, h) = if plane == 0 {
            (width, height)
        } else {
            (width >> self.sub_sampling_w, height >> self.sub_sampling_h)
        };
        (
            w as usize * usize::from(self.bytes_per_sample),
            h as usize,
        )
    }
}

/// Audio sample format descriptor, including the fixed frame chunk size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AudioFormat {
    /// Sample storage type.
    pub sample_type: SampleType,
    /// Significant bits per sample.
    pub bits_per_sample: u8,
    /// Storage bytes per sample.
    pub bytes_per_sample: u8,
    /// Channel count.
    pub num_channels: u16,
    /// Channel layout bitmask.
    pub channel_layout: u64,
    /// Capacity of every audio frame, in samples per channel.
    pub samples_per_frame: u32,
}

impl AudioFormat {
    /// Host default chunk size.
    pub const DEFAULT_SAMPLES_PER_FRAME: u32 = 3072;

    /// 16-bit integer stereo.
    pub fn stereo_i16() -> Self {
        Self {
            sample_type: SampleType::Integer,
            bits_per_sample: 16,
            bytes_per_sample: 2,
            num_channels: 2,
            channel_layout: 0b11,
            samples_per_frame: Self::DEFAULT_SAMPLES_PER_FRAME,
        }
    }

    /// 32-bit float stereo.
    pub fn stereo_f32() -> Self {
        Self {
            sample_type: SampleType::Float,
            bits_per_sample: 32,
            bytes_per_sample: 4,
            num_channels: 2,
            channel_layout: 0b11,
            samples_per_frame: Self::DEFAULT_SAMPLES_PER_FRAME,
        }
    }

    /// Same format with a different chunk size.
    pub fn with_samples_per_frame(self, samples_per_frame: u32) -> Self {
        Self {
            samples_per_frame,
            ..self
        }
    }

    /// Byte size of `samples` samples in one channel.
    pub fn bytes_for(&self, samples: usize) -> usize {
        samples * usize::from(self.bytes_per_sample)
    }
}
