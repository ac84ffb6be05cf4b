//! Capture the rendered instance buffers so a run can be replayed elsewhere

use log::info;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::frame::Frame;

pub struct CaptureModule {
    pub enabled: bool,

    path: PathBuf,
    buffer_file: BufWriter<File>,
    frames: u64,
}

impl CaptureModule {
    /// Creates the capture file, replacing an old one.
    pub fn new(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove old `{}`", path.display()))?;
        }

        let file = File::create(&path)
            .with_context(|| format!("Failed to create `{}`", path.display()))?;
        info!("Capturing frames to {}", path.display());

        Ok(Self {
            enabled: true,

            path,
            buffer_file: BufWriter::new(file),
            frames: 0,
        })
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Appends one record: tick, instance count, instance bytes.
    pub fn write_frame(&mut self, frame: &Frame) -> anyhow::Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let instances = frame.instances();
        let count = instances.len() as u32;
        self.write(&frame.tick.to_le_bytes())?;
        self.write(&count.to_le_bytes())?;
        self.write(bytemuck::cast_slice(&instances))?;

        self.frames += 1;
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.buffer_file
            .write_all(bytes)
            .with_context(|| format!("Failed to write to `{}`", self.path.display()))
    }

    pub fn finish(mut self) -> anyhow::Result<u64> {
        self.buffer_file
            .flush()
            .with_context(|| format!("Failed to flush `{}`", self.path.display()))?;
        info!("Captured {} frames to {}", self.frames, self.path.display());
        Ok(self.frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        frame::ParticleInstance,
        particle::{ParticleInit, ParticleSet},
        types::{Kind, PALETTE},
    };
    use glam::Vec2;

    #[test]
    fn test_capture_records() {
        let path = std::env::temp_dir().join(format!("capture-{}.bin", std::process::id()));
        let mut capture = CaptureModule::new(&path).unwrap();

        let mut set = ParticleSet::new(4);
        for i in 0..3 {
            set.insert(ParticleInit {
                position: Vec2::splat(i as f32),
                velocity: Vec2::ZERO,
                size: 2.0,
                max_life: 10,
                color: PALETTE[i],
                kind: Kind::Sparkle,
            });
        }
        capture
            .write_frame(&Frame {
                tick: 7,
                particles: set.to_vec(),
                ..Default::default()
            })
            .unwrap();
        capture.write_frame(&Frame::default()).unwrap();

        capture.enabled = false;
        capture.write_frame(&Frame::default()).unwrap();
        assert_eq!(capture.finish().unwrap(), 2);

        let bytes = std::fs::read(&path).unwrap();
        let record = 12 + 3 * std::mem::size_of::<ParticleInstance>();
        assert_eq!(bytes.len(), record + 12);
        assert_eq!(u64::from_le_bytes(bytes[..8].try_into().unwrap()), 7);
        assert_eq!(u32::from_le_bytes(bytes[8..12].try_into().unwrap()), 3);

        std::fs::remove_file(path).unwrap();
    }
}
