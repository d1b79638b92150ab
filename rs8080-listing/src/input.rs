use crate::Error;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Loads the whole file at `path`.
pub fn read_input<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, Error> {
    let path = path.as_ref();
    let unavailable = |source| Error::InputUnavailable {
        path: Some(path.to_path_buf()),
        source,
    };
    let mut bytes = Vec::new();
    BufReader::new(File::open(path).map_err(unavailable)?)
        .read_to_end(&mut bytes)
        .map_err(unavailable)?;
    Ok(bytes)
}
