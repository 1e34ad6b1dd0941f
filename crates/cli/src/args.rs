//! Positional argument resolution: `hps [MESH] [SAMPLES]`.
//!
//! - none: default mesh, default samples
//! - one: plain digits are the sample count, anything else is the mesh path
//! - two: mesh path, then sample count

use std::path::PathBuf;

use hps::aggregate::DEFAULT_SAMPLES;
use hps::HpsError;

pub const DEFAULT_MESH: &str = "meshes/in.obj";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub mesh: PathBuf,
    pub samples: usize,
}

pub fn resolve(first: Option<&str>, second: Option<&str>) -> Result<Invocation, HpsError> {
    match (first, second) {
        (None, None) => Ok(Invocation {
            mesh: DEFAULT_MESH.into(),
            samples: DEFAULT_SAMPLES,
        }),
        (Some(arg), None) if is_digits(arg) => Ok(Invocation {
            mesh: DEFAULT_MESH.into(),
            samples: parse_samples(arg)?,
        }),
        (Some(mesh), None) => Ok(Invocation {
            mesh: mesh.into(),
            samples: DEFAULT_SAMPLES,
        }),
        (Some(mesh), Some(samples)) => Ok(Invocation {
            mesh: mesh.into(),
            samples: parse_samples(samples)?,
        }),
        (None, Some(_)) => Err(HpsError::InvalidArgument(
            "sample count given without a mesh path".into(),
        )),
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_samples(s: &str) -> Result<usize, HpsError> {
    let n: usize = s
        .parse()
        .map_err(|_| HpsError::InvalidArgument(format!("sample count `{s}` is not an integer")))?;
    if n == 0 {
        return Err(HpsError::InvalidArgument(
            "sample count must be at least 1".into(),
        ));
    }
    Ok(n)
}
