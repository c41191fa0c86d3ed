use arbitrary::Arbitrary;
use clap::ValueEnum;
use image::imageops::FilterType;
use std::fmt;

/// Resampling filter used when shrinking a source image
#[derive(ValueEnum, Arbitrary, Clone, Copy, Default, PartialEq, Eq, Debug)]
pub enum ResampleFilter {
    /// Nearest neighbour; fastest, blocky
    Nearest,
    /// Linear
    Triangle,
    /// Cubic
    CatmullRom,
    /// Gaussian
    Gaussian,
    /// Lanczos with window 3; sharpest antialiasing
    #[default]
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => write!(f, "{self:?}"),
        }
    }
}
