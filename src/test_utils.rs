//! Fixture builders shared by unit tests.
//!
//! The EXIF fixtures are minimal little-endian TIFF structures, small enough
//! to lay out by hand and wrap in a JPEG APP1 segment.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

const TIFF_SHORT: u16 = 3;
const TIFF_ASCII: u16 = 2;
const TIFF_LONG: u16 = 4;
const TIFF_RATIONAL: u16 = 5;

fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([180, 40, 40]));
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)
        .expect("failed to encode test jpeg");
    buf
}

/// Writes a small JPEG with no EXIF block.
pub fn write_plain_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, jpeg_bytes(width, height)).expect("failed to write test jpeg");
    path
}

/// Writes a 64x32 JPEG whose APP1 segment carries `tiff`.
pub fn write_jpeg_with_exif(dir: &Path, name: &str, tiff: &[u8]) -> PathBuf {
    let jpeg = jpeg_bytes(64, 32);
    let segment_len = (2 + 6 + tiff.len()) as u16;

    let mut data = Vec::with_capacity(jpeg.len() + tiff.len() + 10);
    data.extend_from_slice(&jpeg[..2]); // SOI
    data.extend_from_slice(&[0xFF, 0xE1]);
    data.extend_from_slice(&segment_len.to_be_bytes());
    data.extend_from_slice(b"Exif\0\0");
    data.extend_from_slice(tiff);
    data.extend_from_slice(&jpeg[2..]);

    let path = dir.join(name);
    fs::write(&path, data).expect("failed to write test jpeg");
    path
}

/// Writes bytes that no decoder accepts, under an image extension.
pub fn write_corrupt_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"fake image data").expect("failed to write test file");
    path
}

fn push_u16(buf: &mut Vec<u8>, v: u16) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn push_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn push_entry(buf: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: u32) {
    push_u16(buf, tag);
    push_u16(buf, kind);
    push_u32(buf, count);
    push_u32(buf, value);
}

/// TIFF block with IFD0 pointing at a GPS IFD holding latitude/longitude and
/// their reference letters.
pub fn gps_tiff(lat_ref: u8, lat: [u32; 3], lon_ref: u8, lon: [u32; 3]) -> Vec<u8> {
    // header (8) + IFD0 with one entry (2 + 12 + 4)
    const GPS_IFD: u32 = 26;
    // GPS IFD with four entries (2 + 4 * 12 + 4)
    const LAT_DATA: u32 = GPS_IFD + 54;
    const LON_DATA: u32 = LAT_DATA + 24;

    let mut buf = Vec::new();
    buf.extend_from_slice(b"II");
    push_u16(&mut buf, 42);
    push_u32(&mut buf, 8);

    push_u16(&mut buf, 1);
    push_entry(&mut buf, 0x8825, TIFF_LONG, 1, GPS_IFD);
    push_u32(&mut buf, 0);

    push_u16(&mut buf, 4);
    push_entry(&mut buf, 0x0001, TIFF_ASCII, 2, u32::from_le_bytes([lat_ref, 0, 0, 0]));
    push_entry(&mut buf, 0x0002, TIFF_RATIONAL, 3, LAT_DATA);
    push_entry(&mut buf, 0x0003, TIFF_ASCII, 2, u32::from_le_bytes([lon_ref, 0, 0, 0]));
    push_entry(&mut buf, 0x0004, TIFF_RATIONAL, 3, LON_DATA);
    push_u32(&mut buf, 0);

    for &v in lat.iter().chain(lon.iter()) {
        push_u32(&mut buf, v);
        push_u32(&mut buf, 1);
    }
    buf
}

/// TIFF block with only an orientation tag in IFD0.
pub fn orientation_tiff(orientation: u16) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"II");
    push_u16(&mut buf, 42);
    push_u32(&mut buf, 8);

    push_u16(&mut buf, 1);
    push_entry(&mut buf, 0x0112, TIFF_SHORT, 1, orientation as u32);
    push_u32(&mut buf, 0);
    buf
}

/// EXIF without a GPS IFD: an upright orientation tag and nothing else.
pub fn tiff_without_gps() -> Vec<u8> {
    orientation_tiff(1)
}
