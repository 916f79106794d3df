use image::{GrayImage, RgbImage};
use ndarray::ArrayView3;

use crate::shared::region::Region;

/// A decoded image or video frame: contiguous RGB bytes in row-major order.
///
/// `index` is the frame's position in the sequence it was read from (the
/// sorted image list in classification mode, 0 for standalone crops).
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: usize,
}

pub const CHANNELS: usize = 3;

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * CHANNELS,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
            index,
        }
    }

    pub fn from_rgb_image(image: RgbImage, index: usize) -> Self {
        let (width, height) = image.dimensions();
        Self::new(image.into_raw(), width, height, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Whether the region lies entirely inside the frame with positive size.
    pub fn contains(&self, region: &Region) -> bool {
        !region.is_degenerate()
            && region.x >= 0
            && region.y >= 0
            && region.right() <= self.width as i64
            && region.bottom() <= self.height as i64
    }

    /// Copies the pixels bounded by `region`, or `None` when the region is
    /// degenerate or leaves the frame.
    pub fn crop(&self, region: &Region) -> Option<Frame> {
        if !self.contains(region) {
            return None;
        }
        let x1 = region.x as usize;
        let y1 = region.y as usize;
        let w = region.width as usize;
        let h = region.height as usize;
        let row_bytes = self.width as usize * CHANNELS;

        let mut data = Vec::with_capacity(w * h * CHANNELS);
        for row in y1..y1 + h {
            let start = row * row_bytes + x1 * CHANNELS;
            data.extend_from_slice(&self.data[start..start + w * CHANNELS]);
        }
        Some(Frame::new(data, w as u32, h as u32, 0))
    }

    /// Luma transform of the whole frame.
    pub fn to_gray(&self) -> GrayImage {
        let pixels = self.as_ndarray();
        GrayImage::from_fn(self.width, self.height, |x, y| {
            let (row, col) = (y as usize, x as usize);
            let r = pixels[[row, col, 0]] as f64;
            let g = pixels[[row, col, 1]] as f64;
            let b = pixels[[row, col, 2]] as f64;
            image::Luma([(0.299 * r + 0.587 * g + 0.114 * b).round() as u8])
        })
    }

    pub fn to_rgb_image(&self) -> Option<RgbImage> {
        RgbImage::from_raw(self.width, self.height, self.data.clone())
    }

    fn shape(&self) -> (usize, usize, usize) {
        (self.height as usize, self.width as usize, CHANNELS)
    }
}
