use std::path::{Path, PathBuf};

use crate::shared::frame::Frame;
use crate::tracking::domain::frame_provider::FrameProvider;
use crate::video::domain::image_loader::ImageLoader;

/// Serves frames extracted once per second as `frame_{sec:04}.jpg`.
pub struct FrameDirectory {
    dir: PathBuf,
    loader: Box<dyn ImageLoader>,
}

impl FrameDirectory {
    pub fn new(dir: &Path, loader: Box<dyn ImageLoader>) -> Self {
        Self {
            dir: dir.to_path_buf(),
            loader,
        }
    }

    pub fn path_for(&self, sec: u32) -> PathBuf {
        self.dir.join(format!("frame_{sec:04}.jpg"))
    }
}

impl FrameProvider for FrameDirectory {
    fn frame_at(&mut self, sec: u32) -> Result<Frame, Box<dyn std::error::Error>> {
        let path = self.path_for(sec);
        self.loader.load(&path, sec as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct RecordingLoader {
        requested: Arc<Mutex<Vec<PathBuf>>>,
    }

    impl ImageLoader for RecordingLoader {
        fn load(&self, path: &Path, index: usize) -> Result<Frame, Box<dyn std::error::Error>> {
            self.requested.lock().unwrap().push(path.to_path_buf());
            Ok(Frame::new(vec![0; 3], 1, 1, index))
        }
    }

    #[test]
    fn test_path_for_pads_seconds() {
        let frames = FrameDirectory::new(
            Path::new("/data/frames"),
            Box::new(RecordingLoader {
                requested: Arc::new(Mutex::new(Vec::new())),
            }),
        );
        assert_eq!(frames.path_for(7), PathBuf::from("/data/frames/frame_0007.jpg"));
        assert_eq!(frames.path_for(12345), PathBuf::from("/data/frames/frame_12345.jpg"));
    }

    #[test]
    fn test_frame_at_loads_resolved_path() {
        let requested = Arc::new(Mutex::new(Vec::new()));
        let mut frames = FrameDirectory::new(
            Path::new("/data/frames"),
            Box::new(RecordingLoader {
                requested: requested.clone(),
            }),
        );
        let frame = frames.frame_at(109).unwrap();
        assert_eq!(frame.index(), 109);
        assert_eq!(
            requested.lock().unwrap()[0],
            PathBuf::from("/data/frames/frame_0109.jpg")
        );
    }

    #[test]
    fn test_missing_frame_file_propagates_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut frames = FrameDirectory::new(
            dir.path(),
            Box::new(crate::video::infrastructure::image_file_loader::ImageFileLoader::new()),
        );
        assert!(frames.frame_at(1).is_err());
    }
}
