// crates/locodb-core/src/loader/common_io.rs
use crate::error::{LocoError, Result};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// A missing dataset is `NotFound`; anything else stays an I/O error.
fn open_error(path: &Path, e: io::Error) -> LocoError {
    match e.kind() {
        io::ErrorKind::NotFound => {
            LocoError::NotFound(format!("dataset not found at {}: {}", path.display(), e))
        }
        _ => LocoError::Io(e),
    }
}

/// Opens a file, buffers it, and wraps it in a gzip decoder when the name
/// ends in `.gz`.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let reader = BufReader::new(file);

    if !is_gzip(path) {
        return Ok(Box::new(reader));
    }

    #[cfg(feature = "compact")]
    {
        Ok(Box::new(GzDecoder::new(reader)))
    }

    #[cfg(not(feature = "compact"))]
    {
        Err(LocoError::InvalidArgument(format!(
            "{} is gzip-compressed; enable the `compact` feature",
            path.display()
        )))
    }
}
