use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{VqeError, VqeResult};
use crate::scaling::ScalingPoint;

/// Writes `shots,energy,error` rows, ready for a log-log error plot.
pub fn write_scaling_csv(path: impl AsRef<Path>, points: &[ScalingPoint]) -> VqeResult<()> {
    let path = path.as_ref();
    write_rows(path, points).map_err(|source| VqeError::Output {
        path: path.display().to_string(),
        source,
    })
}

fn write_rows(path: &Path, points: &[ScalingPoint]) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "shots,energy,error")?;
    for p in points {
        writeln!(w, "{},{},{}", p.shots, p.energy, p.error)?;
    }
    w.flush()
}
