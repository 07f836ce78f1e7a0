//! Atomic, verified persistence of a container.
//!
//! The artifact is written next to its destination, read back and checked,
//! and only then renamed over the destination. Readers of the destination
//! path see either the previous file or the complete new one.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, error, info};
use tempfile::NamedTempFile;

use crate::error::VeilError;
use crate::media::metadata::CryptoParams;
use crate::media::types::Container;
use crate::result::Result;

pub trait Persist {
    fn save_as(&self, _: &Path) -> Result<()>;
}

impl Persist for Container {
    fn save_as(&self, file: &Path) -> Result<()> {
        commit(self, file)
    }
}

/// writes the container to `destination` atomically, after proving the written file reads back
pub fn commit(container: &Container, destination: &Path) -> Result<()> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| VeilError::WriteError { source })?;
    }

    let mut tmp = tempfile::Builder::new()
        .prefix(".pngveil-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|source| VeilError::WriteError { source })?;
    write_to(container, &mut tmp)?;

    // on error `tmp` is dropped here, which removes the file
    verify(tmp.path(), container)?;

    tmp.persist(destination).map_err(|e| {
        error!("Error renaming artifact to {destination:?}: {}", e.error);
        VeilError::WriteError { source: e.error }
    })?;
    info!("committed {destination:?}");

    Ok(())
}

fn write_to(container: &Container, tmp: &mut NamedTempFile) -> Result<()> {
    let mut writer = BufWriter::new(tmp.as_file_mut());
    container.save_to_writer(&mut writer)?;
    writer
        .flush()
        .map_err(|source| VeilError::WriteError { source })?;
    drop(writer);

    tmp.as_file()
        .sync_all()
        .map_err(|source| VeilError::WriteError { source })
}

/// reopens a written artifact and checks it against the container it was made from
pub fn verify(path: &Path, expected: &Container) -> Result<()> {
    let file = File::open(path).map_err(|source| VeilError::ReadError { source })?;
    let mut reader = png::Decoder::new(BufReader::new(file))
        .read_info()
        .map_err(|e| VeilError::VerificationFailed(format!("unreadable png: {e}")))?;

    let mut pixels = vec![0; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut pixels)
        .map_err(|e| VeilError::VerificationFailed(format!("corrupt pixel data: {e}")))?;
    pixels.truncate(frame.buffer_size());

    if frame.color_type != png::ColorType::Rgb || frame.bit_depth != png::BitDepth::Eight {
        return Err(VeilError::VerificationFailed(format!(
            "expected 8-bit RGB, found {:?} with {:?}",
            frame.color_type, frame.bit_depth
        )));
    }
    if (frame.width, frame.height) != (expected.width(), expected.height()) {
        return Err(VeilError::VerificationFailed(format!(
            "expected {}x{} pixels, found {}x{}",
            expected.width(),
            expected.height(),
            frame.width,
            frame.height
        )));
    }
    if pixels.as_slice() != expected.image().as_raw().as_slice() {
        return Err(VeilError::VerificationFailed(
            "pixel data differs from what was written".to_owned(),
        ));
    }

    let written = Container::with_text_of(expected.image().clone(), reader.info())?;
    let params = CryptoParams::read(&written)?;
    if Some(params) != CryptoParams::read(expected).ok() {
        return Err(VeilError::VerificationFailed(
            "crypto parameters differ from what was written".to_owned(),
        ));
    }
    if written != *expected {
        return Err(VeilError::VerificationFailed(
            "text fields differ from what was written".to_owned(),
        ));
    }
    debug!("verified {path:?}");

    Ok(())
}
