//! Bounding box types: normalized center boxes in, truncated pixel boxes out.

use serde::Serialize;
use thiserror::Error;

// 2^63: the first value past the end of the i64 range.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// A pixel value that cannot be stored as an `i64`.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
#[error("{field} = {value} does not fit in a pixel coordinate")]
pub struct CoordinateOutOfRange {
    pub field: &'static str,
    pub value: f64,
}

/// Image size in pixels, as read from the image header.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageDimensions {
    pub width: f64,
    pub height: f64,
}

impl ImageDimensions {
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A YOLO box: class id plus center and extent as fractions of the image size.
///
/// This type does NOT enforce that the fractions lie in `[0, 1]`. Boxes
/// hanging over the image edge are carried through unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedBox {
    pub class_id: i64,
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

impl NormalizedBox {
    #[inline]
    pub fn new(class_id: i64, center_x: f64, center_y: f64, width: f64, height: f64) -> Self {
        Self {
            class_id,
            center_x,
            center_y,
            width,
            height,
        }
    }

    /// Converts to absolute pixel bounds for an image of the given size.
    ///
    /// Every output value is truncated toward zero on its own, so
    /// `xmax - xmin` may differ from `width` by one pixel. No clamping to the
    /// image bounds is performed.
    ///
    /// # Errors
    /// Fails if any value overflows to infinity or falls outside the `i64`
    /// range.
    pub fn to_absolute(
        &self,
        dims: ImageDimensions,
    ) -> Result<AbsoluteBox, CoordinateOutOfRange> {
        let box_width = self.width * dims.width;
        let box_height = self.height * dims.height;
        let abs_x = self.center_x * dims.width;
        let abs_y = self.center_y * dims.height;

        Ok(AbsoluteBox {
            xmin: truncate("xmin", abs_x - box_width / 2.0)?,
            ymin: truncate("ymin", abs_y - box_height / 2.0)?,
            xmax: truncate("xmax", abs_x + box_width / 2.0)?,
            ymax: truncate("ymax", abs_y + box_height / 2.0)?,
            width: truncate("width", box_width)?,
            height: truncate("height", box_height)?,
        })
    }
}

/// An axis-aligned box in integer pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AbsoluteBox {
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
    pub width: i64,
    pub height: i64,
}

impl AbsoluteBox {
    /// Returns true if the box is properly ordered (min <= max for both axes).
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.xmin <= self.xmax && self.ymin <= self.ymax
    }
}

/// Converts a normalized box to pixel bounds. See [`NormalizedBox::to_absolute`].
#[inline]
pub fn transform(
    bbox: &NormalizedBox,
    dims: ImageDimensions,
) -> Result<AbsoluteBox, CoordinateOutOfRange> {
    bbox.to_absolute(dims)
}

// Truncation toward zero, not rounding. Existing labels.csv consumers
// depend on these exact integers.
#[inline]
fn truncate(field: &'static str, value: f64) -> Result<i64, CoordinateOutOfRange> {
    let truncated = value.trunc();
    if truncated.is_finite() && (-I64_BOUND..I64_BOUND).contains(&truncated) {
        Ok(truncated as i64)
    } else {
        Err(CoordinateOutOfRange { field, value })
    }
}
