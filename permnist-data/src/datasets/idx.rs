// IDX file format
//
// All header values are big-endian u32:
//   images: magic(2051) | count | rows | cols | pixel_data(u8...)
//   labels: magic(2049) | count | label_data(u8...)

use permnist_core::PermnistError;

pub const IMAGES_MAGIC: u32 = 2051;
pub const LABELS_MAGIC: u32 = 2049;

const IMAGES_HEADER_LEN: usize = 16;
const LABELS_HEADER_LEN: usize = 8;

/// Images parsed from an IDX3 file.
#[derive(Debug, Clone, PartialEq)]
pub struct IdxImages {
    pub images: Vec<Vec<u8>>,
    pub rows: usize,
    pub cols: usize,
}

/// Parses an IDX3 image file.
///
/// Trailing bytes past the declared image count are ignored. A header with a
/// zero row or column count is rejected with `InvalidImageDims`.
pub fn parse_images(data: &[u8]) -> Result<IdxImages, PermnistError> {
    check_len("IDX3 header", IMAGES_HEADER_LEN, data.len())?;
    check_magic(IMAGES_MAGIC, read_u32_be(data, 0))?;

    let count = read_u32_be(data, 4) as usize;
    let rows = read_u32_be(data, 8) as usize;
    let cols = read_u32_be(data, 12) as usize;
    // Empty images would let any count pass the length check below.
    if rows == 0 || cols == 0 {
        return Err(PermnistError::InvalidImageDims { rows, cols });
    }
    let pixels_per_image = rows.saturating_mul(cols);

    check_len(
        "IDX3 pixel data",
        count
            .saturating_mul(pixels_per_image)
            .saturating_add(IMAGES_HEADER_LEN),
        data.len(),
    )?;

    let images = (0..count)
        .map(|i| {
            let start = IMAGES_HEADER_LEN + i * pixels_per_image;
            data[start..start + pixels_per_image].to_vec()
        })
        .collect();

    Ok(IdxImages { images, rows, cols })
}

/// Parses an IDX1 label file.
pub fn parse_labels(data: &[u8]) -> Result<Vec<u8>, PermnistError> {
    check_len("IDX1 header", LABELS_HEADER_LEN, data.len())?;
    check_magic(LABELS_MAGIC, read_u32_be(data, 0))?;

    let count = read_u32_be(data, 4) as usize;
    check_len("IDX1 label data", count.saturating_add(LABELS_HEADER_LEN), data.len())?;

    Ok(data[LABELS_HEADER_LEN..LABELS_HEADER_LEN + count].to_vec())
}

/// Encodes images as an IDX3 file.
pub fn encode_images(images: &[&[u8]], rows: u32, cols: u32) -> Vec<u8> {
    let mut buf = Vec::with_capacity(IMAGES_HEADER_LEN + images.iter().map(|i| i.len()).sum::<usize>());
    buf.extend_from_slice(&IMAGES_MAGIC.to_be_bytes());
    buf.extend_from_slice(&(images.len() as u32).to_be_bytes());
    buf.extend_from_slice(&rows.to_be_bytes());
    buf.extend_from_slice(&cols.to_be_bytes());
    for img in images {
        buf.extend_from_slice(img);
    }
    buf
}

/// Encodes labels as an IDX1 file.
pub fn encode_labels(labels: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(LABELS_HEADER_LEN + labels.len());
    buf.extend_from_slice(&LABELS_MAGIC.to_be_bytes());
    buf.extend_from_slice(&(labels.len() as u32).to_be_bytes());
    buf.extend_from_slice(labels);
    buf
}

fn check_magic(expected: u32, got: u32) -> Result<(), PermnistError> {
    if got != expected {
        return Err(PermnistError::InvalidMagic { expected, got });
    }
    Ok(())
}

fn check_len(what: &str, expected: usize, actual: usize) -> Result<(), PermnistError> {
    if actual < expected {
        return Err(PermnistError::Truncated {
            what: what.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

/// Big-endian u32 at byte offset `off`; callers check bounds first.
fn read_u32_be(data: &[u8], off: usize) -> u32 {
    u32::from_be_bytes([data[off], data[off + 1], data[off + 2], data[off + 3]])
}

#[cfg(test)]
#[path = "idx_test.rs"]
mod tests;
