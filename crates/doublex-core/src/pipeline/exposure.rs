//! Per-exposure transforms and the double exposure blend.
//!
//! Both sides of a pair are normalized to the same 8-bit color mode before
//! anything else happens, so the channel-wise add is always well defined.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, ImageBuffer, Pixel, RgbImage};

/// One decoded side of a pair in its working color mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Exposure {
    /// Single-channel luminance
    Luma(GrayImage),
    /// 8-bit RGB
    Rgb(RgbImage),
}

impl Exposure {
    /// Normalize a decoded image: luminance when `greyscale`, RGB otherwise.
    pub fn from_image(image: DynamicImage, greyscale: bool) -> Self {
        if greyscale {
            Exposure::Luma(image.to_luma8())
        } else {
            Exposure::Rgb(image.to_rgb8())
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Exposure::Luma(buf) => buf.dimensions(),
            Exposure::Rgb(buf) => buf.dimensions(),
        }
    }

    pub fn longest_edge(&self) -> u32 {
        let (w, h) = self.dimensions();
        w.max(h)
    }

    pub fn is_greyscale(&self) -> bool {
        matches!(self, Exposure::Luma(_))
    }

    /// Shrink so neither edge exceeds `max_edge`, keeping the aspect ratio.
    ///
    /// Images already within bounds are returned untouched.
    pub fn downsample(self, max_edge: u32) -> Self {
        let (w, h) = self.dimensions();
        let (nw, nh) = fit_within(w, h, max_edge);
        if (nw, nh) == (w, h) {
            return self;
        }
        match self {
            Exposure::Luma(buf) => {
                Exposure::Luma(imageops::resize(&buf, nw, nh, FilterType::Lanczos3))
            }
            Exposure::Rgb(buf) => {
                Exposure::Rgb(imageops::resize(&buf, nw, nh, FilterType::Lanczos3))
            }
        }
    }

    /// Multiply every channel by `factor`, truncating toward zero.
    pub fn scale_brightness(&mut self, factor: f32) {
        match self {
            Exposure::Luma(buf) => scale_channels(buf, factor),
            Exposure::Rgb(buf) => scale_channels(buf, factor),
        }
    }

    /// Channel-wise saturating add of two exposures.
    ///
    /// The result covers the top-left aligned intersection of both images.
    /// Returns `None` when the color modes differ.
    pub fn add(&self, other: &Exposure) -> Option<Exposure> {
        match (self, other) {
            (Exposure::Luma(a), Exposure::Luma(b)) => Some(Exposure::Luma(saturating_add(a, b))),
            (Exposure::Rgb(a), Exposure::Rgb(b)) => Some(Exposure::Rgb(saturating_add(a, b))),
            _ => None,
        }
    }

    pub fn into_dynamic(self) -> DynamicImage {
        match self {
            Exposure::Luma(buf) => DynamicImage::ImageLuma8(buf),
            Exposure::Rgb(buf) => DynamicImage::ImageRgb8(buf),
        }
    }
}

/// Longest-edge bound for a resized pair:
/// `floor(min(longest(a), longest(b)) / divisor)`, at least 1.
pub fn resize_target(a: (u32, u32), b: (u32, u32), divisor: u32) -> u32 {
    let shorter_longest = a.0.max(a.1).min(b.0.max(b.1));
    (shorter_longest / divisor.max(1)).max(1)
}

/// Dimensions of `w`x`h` scaled down to fit in a `max_edge` square.
pub fn fit_within(w: u32, h: u32, max_edge: u32) -> (u32, u32) {
    let longest = w.max(h);
    if longest <= max_edge || longest == 0 {
        return (w, h);
    }
    let scale = max_edge as f64 / longest as f64;
    let shrink = |edge: u32| ((edge as f64 * scale).round() as u32).clamp(1, max_edge);
    (shrink(w), shrink(h))
}

fn scale_channel(value: u8, factor: f32) -> u8 {
    (value as f32 * factor).clamp(0.0, 255.0) as u8
}

fn scale_channels<P>(buf: &mut ImageBuffer<P, Vec<u8>>, factor: f32)
where
    P: Pixel<Subpixel = u8>,
{
    for value in buf.iter_mut() {
        *value = scale_channel(*value, factor);
    }
}

fn saturating_add<P>(a: &ImageBuffer<P, Vec<u8>>, b: &ImageBuffer<P, Vec<u8>>) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    let width = a.width().min(b.width());
    let height = a.height().min(b.height());
    ImageBuffer::from_fn(width, height, |x, y| {
        a.get_pixel(x, y)
            .map2(b.get_pixel(x, y), |ca, cb| ca.saturating_add(cb))
    })
}
