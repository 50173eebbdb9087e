use std::path::PathBuf;

use crate::error::Result;

/// One raw pointer sample together with the rendered size of the surface at
/// the moment it was captured.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PointerSample {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// What an input surface reports. A frontend maps its native pointer events
/// onto these once at startup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    StrokeStart(PointerSample),
    StrokePoint(PointerSample),
    StrokeEnd,
    PointerLeave,
    GhostClick(PointerSample),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

pub trait ImageSource {
    fn load(&self) -> Result<ImageInfo>;
}

pub struct FileImageSource {
    path: PathBuf,
}

impl FileImageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ImageSource for FileImageSource {
    fn load(&self) -> Result<ImageInfo> {
        let (width, height) = image::image_dimensions(&self.path)?;
        log::info!(
            "Loaded floorplan {} ({width}x{height})",
            self.path.display()
        );
        Ok(ImageInfo { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    #[test]
    fn file_source_reads_natural_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.png");
        image::RgbImage::new(64, 48).save(&path).unwrap();
        let info = FileImageSource::new(&path).load().unwrap();
        assert_eq!(info, ImageInfo { width: 64, height: 48 });
    }

    #[test]
    fn file_source_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileImageSource::new(dir.path().join("missing.png")).load();
        assert!(matches!(result, Err(ClientError::Image(_))));
    }
}
