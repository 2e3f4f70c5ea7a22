// SPDX-License-Identifier: GPL-3.0-only

//! Still-capture pipeline
//!
//! Applies the active exposure multiplier as a brightness transform, mirrors
//! the frame horizontally for the self-facing camera, and encodes the result
//! as a JPEG still. Codec selection is out of scope; encoding is delegated to
//! the `image` crate the same way the original delegates to the device APIs.

use crate::constants::JPEG_QUALITY;
use crate::errors::CaptureError;
use crate::capture::device::Frame;
use image::codecs::jpeg::JpegEncoder;
use image::{imageops, RgbaImage};

/// Apply the exposure multiplier and optional mirror to a raw frame
pub fn process_frame(
    frame: &Frame,
    exposure: f32,
    mirror: bool,
) -> Result<RgbaImage, CaptureError> {
    let mut img = RgbaImage::from_raw(frame.width, frame.height, frame.rgba.clone())
        .ok_or_else(|| {
            CaptureError::NoFrameAvailable("frame buffer does not match dimensions".to_string())
        })?;

    if (exposure - 1.0).abs() > f32::EPSILON {
        for pixel in img.pixels_mut() {
            for channel in 0..3 {
                let value = f32::from(pixel[channel]) * exposure;
                pixel[channel] = value.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    if mirror {
        img = imageops::flip_horizontal(&img);
    }

    Ok(img)
}

/// Encode a processed frame as a JPEG still
pub fn encode_jpeg(img: &RgbaImage) -> Result<Vec<u8>, CaptureError> {
    let rgb = image::DynamicImage::ImageRgba8(img.clone()).to_rgb8();
    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    encoder
        .encode_image(&rgb)
        .map_err(|e| CaptureError::EncodingFailed(e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(width: u32, height: u32, rgb: [u8; 3]) -> Frame {
        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..(width * height) {
            rgba.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
        Frame {
            width,
            height,
            rgba,
        }
    }

    #[test]
    fn test_exposure_scales_brightness() {
        let frame = solid_frame(2, 2, [100, 100, 100]);
        let brighter = process_frame(&frame, 2.0, false).unwrap();
        assert_eq!(brighter.get_pixel(0, 0)[0], 200);

        let darker = process_frame(&frame, 0.5, false).unwrap();
        assert_eq!(darker.get_pixel(0, 0)[0], 50);
    }

    #[test]
    fn test_exposure_clamps_at_white() {
        let frame = solid_frame(1, 1, [200, 200, 200]);
        let img = process_frame(&frame, 2.5, false).unwrap();
        assert_eq!(img.get_pixel(0, 0)[0], 255);
    }

    #[test]
    fn test_mirror_flips_horizontally() {
        let frame = Frame {
            width: 2,
            height: 1,
            rgba: vec![255, 0, 0, 255, 0, 255, 0, 255],
        };
        let img = process_frame(&frame, 1.0, true).unwrap();
        assert_eq!(img.get_pixel(0, 0)[1], 255, "green pixel moved to the left");
        assert_eq!(img.get_pixel(1, 0)[0], 255, "red pixel moved to the right");
    }

    #[test]
    fn test_encode_produces_jpeg_magic() {
        let frame = solid_frame(4, 4, [10, 20, 30]);
        let img = process_frame(&frame, 1.0, false).unwrap();
        let bytes = encode_jpeg(&img).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8], "JPEG SOI marker");
    }

    #[test]
    fn test_bad_frame_buffer_is_rejected() {
        let frame = Frame {
            width: 4,
            height: 4,
            rgba: vec![0; 3],
        };
        assert!(process_frame(&frame, 1.0, false).is_err());
    }
}
