//! Mesh loader: vertex records of an OBJ-like file into a 3×V matrix.
//!
//! Format
//! - A vertex record is a line starting with `v`, whose first token is
//!   exactly `v`, followed by three whitespace-separated finite floats.
//! - Reading stops at the first line that does not start with `v`; OBJ files
//!   list vertices before faces. `vn`/`vt`/`vp` records are parse errors.
//! - No validity checks beyond token count and float syntax.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use nalgebra::{Matrix3xX, Vector3};

use crate::error::{HpsError, Result};

/// Ordered vertex set stored column-wise (`3×V`).
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    coords: Matrix3xX<f64>,
}

impl Mesh {
    pub fn from_vertices(vertices: &[Vector3<f64>]) -> Self {
        let coords =
            Matrix3xX::from_iterator(vertices.len(), vertices.iter().flat_map(|v| v.iter().copied()));
        Self { coords }
    }

    #[inline]
    pub fn coords(&self) -> &Matrix3xX<f64> {
        &self.coords
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.coords.ncols()
    }

    #[inline]
    pub fn vertex(&self, i: usize) -> Vector3<f64> {
        self.coords.column(i).into_owned()
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vector3<f64>> + '_ {
        self.coords.column_iter().map(|c| c.into_owned())
    }

    /// Write the vertices as `v x y z` records.
    ///
    /// Uses shortest round-trip float formatting, so `parse_obj` recovers the
    /// exact coordinates.
    pub fn write_obj<W: Write>(&self, mut w: W) -> std::io::Result<()> {
        for v in self.vertices() {
            writeln!(w, "v {} {} {}", v.x, v.y, v.z)?;
        }
        Ok(())
    }
}

/// Load a mesh from `path`.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| HpsError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    parse_lines(BufReader::new(file)).map_err(|e| match e {
        LineError::Io(source) => HpsError::Read {
            path: path.to_path_buf(),
            source,
        },
        LineError::Parse(e) => e,
    })
}

/// Parse vertex records from any buffered reader.
pub fn parse_obj<R: BufRead>(reader: R) -> Result<Mesh> {
    parse_lines(reader).map_err(|e| match e {
        LineError::Io(source) => HpsError::Read {
            path: "<reader>".into(),
            source,
        },
        LineError::Parse(e) => e,
    })
}

enum LineError {
    Io(std::io::Error),
    Parse(HpsError),
}

fn parse_lines<R: BufRead>(reader: R) -> std::result::Result<Mesh, LineError> {
    let mut vertices = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(LineError::Io)?;
        match parse_vertex(&line, idx + 1).map_err(LineError::Parse)? {
            Some(v) => vertices.push(v),
            None => break,
        }
    }
    Ok(Mesh::from_vertices(&vertices))
}

/// `Ok(None)` for a line that does not start with `v` (end of the vertex block).
///
/// Any other `v*` record (`vn`, `vt`, `vp`) is rejected rather than treated as
/// the end of the block, so a mesh cannot be silently truncated.
fn parse_vertex(line: &str, line_no: usize) -> Result<Option<Vector3<f64>>> {
    let line = line.trim_end_matches('\r');
    if !line.starts_with('v') {
        return Ok(None);
    }
    let parse_err = |reason: String| HpsError::Parse {
        line: line_no,
        content: line.to_string(),
        reason,
    };
    let mut tokens = line.split_whitespace();
    let tag = tokens.next().unwrap_or_default();
    if tag != "v" {
        return Err(parse_err(format!("unsupported record `{tag}`")));
    }
    let mut xyz = [0.0f64; 3];
    let mut count = 0usize;
    for tok in tokens {
        let val: f64 = tok
            .parse()
            .map_err(|e| parse_err(format!("bad number `{tok}` ({e})")))?;
        if !val.is_finite() {
            return Err(parse_err(format!("non-finite coordinate `{tok}`")));
        }
        if count < 3 {
            xyz[count] = val;
        }
        count += 1;
    }
    if count != 3 {
        return Err(parse_err(format!("expected 3 coordinates, found {count}")));
    }
    Ok(Some(Vector3::new(xyz[0], xyz[1], xyz[2])))
}
