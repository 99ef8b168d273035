//! Saving the paint layer as a PNG. Lossless: decoding an export yields
//! the exact bytes of the layer it came from.

use std::io::Cursor;
use std::path::Path;

use image::{ImageError, ImageFormat, RgbaImage};

fn to_image(paint: &crate::raster::Raster) -> RgbaImage {
    RgbaImage::from_raw(paint.width(), paint.height(), paint.data().to_vec())
        .expect("raster buffer length matches its dimensions")
}

/// Encode the paint layer to an in-memory PNG.
pub fn encode_png(paint: &crate::raster::Raster) -> Result<Vec<u8>, ImageError> {
    let mut buf = Vec::new();
    to_image(paint).write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

/// Write the paint layer to disk as PNG.
pub fn save_png(paint: &crate::raster::Raster, path: &Path) -> Result<(), ImageError> {
    let png = encode_png(paint)?;
    std::fs::write(path, png)?;
    log::info!("saved {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{rgba, Raster, WHITE};

    #[test]
    fn png_round_trip_is_pixel_identical() {
        let mut paint = Raster::new(64, 40);
        paint.clear(WHITE);
        // Some recognizable content, including partial alpha.
        paint.fill_ellipse(20.0, 20.0, 10.0, 6.0, 0.4, rgba(200, 30, 60, 255));
        paint.erase_ellipse(40.0, 15.0, 8.0, 5.0, 0.6);

        let png = encode_png(&paint).expect("encode");
        let decoded = image::load_from_memory(&png).expect("decode").to_rgba8();

        assert_eq!(decoded.width(), paint.width());
        assert_eq!(decoded.height(), paint.height());
        assert_eq!(decoded.as_raw().as_slice(), paint.data());
    }
}
