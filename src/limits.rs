/// Parse-time resource limits.
///
/// All fields default to `None` (no limit). Checked between DIB decode and
/// layout validation, before any row walk or pixel read.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum backing store size in bytes.
    pub max_file_bytes: Option<u64>,
}

impl Limits {
    /// Check dimensions against limits. Returns Ok(()) or LimitExceeded error.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), crate::BmpError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(crate::BmpError::LimitExceeded(format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(crate::BmpError::LimitExceeded(format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(crate::BmpError::LimitExceeded(format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check the backing store size before any bytes are read.
    pub(crate) fn check_file_bytes(&self, bytes: u64) -> Result<(), crate::BmpError> {
        if let Some(max_bytes) = self.max_file_bytes {
            if bytes > max_bytes {
                return Err(crate::BmpError::LimitExceeded(format!(
                    "file size {bytes} bytes exceeds limit {max_bytes}"
                )));
            }
        }
        Ok(())
    }
}
