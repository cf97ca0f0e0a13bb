use super::nearest_neighbor_resample;
use crate::error::RasterError;
use std::convert::TryFrom;
use std::path::Path;

/// The categorical marker of one geometry raster cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum GeometryMarker {
    NoSlip = 0,
    FreeSlip = 1,
    Outflow = 2,
    Inflow = 3,
    Fluid = 4,
    NoSlipHot = 5,
    NoSlipCold = 6,
    NoSlipCoupling = 7,
}

impl TryFrom<u8> for GeometryMarker {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        match value {
            0 => Ok(GeometryMarker::NoSlip),
            1 => Ok(GeometryMarker::FreeSlip),
            2 => Ok(GeometryMarker::Outflow),
            3 => Ok(GeometryMarker::Inflow),
            4 => Ok(GeometryMarker::Fluid),
            5 => Ok(GeometryMarker::NoSlipHot),
            6 => Ok(GeometryMarker::NoSlipCold),
            7 => Ok(GeometryMarker::NoSlipCoupling),
            _ => Err(value),
        }
    }
}

/// A 2D raster of geometry markers describing a cross-section of the domain.
///
/// Markers are stored row-major, `markers[y * width + x]`, with `y` pointing upwards (the
/// direction of the solver's `j` index).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct GeometryRaster {
    width: usize,
    height: usize,
    markers: Vec<u8>,
}

impl GeometryRaster {
    pub fn new(width: usize, height: usize, markers: Vec<u8>) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::Empty { width, height });
        }

        if markers.len() != width * height {
            return Err(RasterError::Malformed(format!(
                "expected {} markers for a {}x{} raster, found {}",
                width * height,
                width,
                height,
                markers.len()
            )));
        }

        Ok(Self {
            width,
            height,
            markers,
        })
    }

    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> GeometryMarker,
    ) -> Result<Self, RasterError> {
        let mut markers = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                markers.push(f(x, y) as u8);
            }
        }
        Self::new(width, height, markers)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn raw_markers(&self) -> &[u8] {
        &self.markers
    }

    /// The markers, validated. Any value outside of the marker table is an error.
    pub fn markers(&self) -> Result<Vec<GeometryMarker>, RasterError> {
        self.markers
            .iter()
            .enumerate()
            .map(|(id, marker)| {
                GeometryMarker::try_from(*marker).map_err(|marker| RasterError::UnknownMarker {
                    marker,
                    x: id % self.width,
                    y: id / self.width,
                })
            })
            .collect()
    }

    /// This raster resampled to `width x height` by nearest-neighbor sampling.
    pub fn resampled(&self, width: usize, height: usize) -> Result<Self, RasterError> {
        let markers =
            nearest_neighbor_resample(&self.markers, self.width, self.height, width, height);
        Self::new(width, height, markers)
    }

    /// Loads a PGM (`P2` or `P5`) image whose gray values are the geometry markers.
    pub fn load_pgm(path: impl AsRef<Path>) -> Result<Self, RasterError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| RasterError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let raster = Self::from_pgm_bytes(&bytes)?;
        info!(
            "Loaded {}x{} geometry raster from \"{}\".",
            raster.width,
            raster.height,
            path.display()
        );
        Ok(raster)
    }

    /// Parses a PGM image. The first image row is the top of the domain cross-section.
    pub fn from_pgm_bytes(bytes: &[u8]) -> Result<Self, RasterError> {
        let mut reader = PgmReader { bytes, pos: 0 };

        let binary = match reader.token() {
            Some(b"P2") => false,
            Some(b"P5") => true,
            _ => {
                return Err(RasterError::Malformed(
                    "missing the P2 or P5 magic number".to_string(),
                ))
            }
        };

        let width = reader.number("width")?;
        let height = reader.number("height")?;
        let max_value = reader.number("maximum gray value")?;

        if width == 0 || height == 0 {
            return Err(RasterError::Empty { width, height });
        }

        if max_value == 0 || max_value > 255 {
            return Err(RasterError::Malformed(format!(
                "unsupported maximum gray value {}",
                max_value
            )));
        }

        let num_pixels = width.checked_mul(height).ok_or_else(|| {
            RasterError::Malformed(format!("resolution {}x{} is too large", width, height))
        })?;

        let rows = if binary {
            // Exactly one whitespace character separates the header from the pixels.
            let start = reader.pos + 1;
            let end = start.checked_add(num_pixels).filter(|end| *end <= bytes.len());
            let end = end.ok_or_else(|| {
                RasterError::Malformed(format!(
                    "expected {} pixels, the file is too short",
                    num_pixels
                ))
            })?;
            bytes[start..end].to_vec()
        } else {
            // Every ASCII gray value takes at least two bytes.
            let mut rows = Vec::with_capacity(num_pixels.min(bytes.len() / 2));
            for _ in 0..num_pixels {
                let value = reader.number("gray value")?;
                if value > max_value {
                    return Err(RasterError::Malformed(format!(
                        "gray value {} exceeds the maximum {}",
                        value, max_value
                    )));
                }
                rows.push(value as u8);
            }
            rows
        };

        // Flip the rows so that `y` points upwards.
        let markers = rows
            .chunks(width)
            .rev()
            .flat_map(|row| row.iter().copied())
            .collect();

        Self::new(width, height, markers)
    }
}

struct PgmReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> PgmReader<'a> {
    fn skip_whitespaces_and_comments(&mut self) {
        while let Some(b) = self.bytes.get(self.pos) {
            if *b == b'#' {
                while let Some(c) = self.bytes.get(self.pos) {
                    self.pos += 1;
                    if *c == b'\n' {
                        break;
                    }
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn token(&mut self) -> Option<&'a [u8]> {
        self.skip_whitespaces_and_comments();
        let start = self.pos;

        while let Some(b) = self.bytes.get(self.pos) {
            if b.is_ascii_whitespace() {
                break;
            }
            self.pos += 1;
        }

        if start == self.pos {
            None
        } else {
            Some(&self.bytes[start..self.pos])
        }
    }

    fn number(&mut self, what: &str) -> Result<usize, RasterError> {
        let token = self
            .token()
            .ok_or_else(|| RasterError::Malformed(format!("missing {}", what)))?;

        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                RasterError::Malformed(format!(
                    "invalid {} \"{}\"",
                    what,
                    String::from_utf8_lossy(token)
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{GeometryMarker, GeometryRaster};
    use crate::error::RasterError;

    #[test]
    fn ascii_pgm_rows_are_flipped() {
        let pgm = b"P2\n# channel\n3 2\n7\n0 0 0\n4 4 3\n";
        let raster = GeometryRaster::from_pgm_bytes(pgm).unwrap();
        assert_eq!(raster.width(), 3);
        assert_eq!(raster.height(), 2);
        assert_eq!(raster.raw_markers(), &[4, 4, 3, 0, 0, 0]);
        assert_eq!(raster.markers().unwrap()[2], GeometryMarker::Inflow);
    }

    #[test]
    fn binary_pgm() {
        let mut pgm = b"P5 2 2 255\n".to_vec();
        pgm.extend_from_slice(&[4, 0, 1, 2]);
        let raster = GeometryRaster::from_pgm_bytes(&pgm).unwrap();
        assert_eq!(raster.raw_markers(), &[1, 2, 4, 0]);
    }

    #[test]
    fn truncated_files_are_rejected() {
        assert!(GeometryRaster::from_pgm_bytes(b"P2 2 2 7 4 4 4").is_err());
        assert!(GeometryRaster::from_pgm_bytes(b"P5 2 2 255\n\x04").is_err());
        assert!(GeometryRaster::from_pgm_bytes(b"P3 1 1 255 0 0 0").is_err());
        assert!(GeometryRaster::from_pgm_bytes(b"P2 0 2 7").is_err());
    }

    #[test]
    fn oversized_headers_are_rejected() {
        // The pixel count overflows.
        let overflow = GeometryRaster::from_pgm_bytes(b"P5 4294967296 4294967297 255\n");
        assert!(matches!(overflow, Err(RasterError::Malformed(_))));

        // The pixel count fits but the file holds almost no pixels.
        let huge_binary = GeometryRaster::from_pgm_bytes(b"P5 100000 100000 255\n\x04\x04");
        assert!(matches!(huge_binary, Err(RasterError::Malformed(_))));
        let huge_ascii = GeometryRaster::from_pgm_bytes(b"P2 100000 100000 7\n4 4");
        assert!(matches!(huge_ascii, Err(RasterError::Malformed(_))));
    }

    #[test]
    fn unknown_markers_are_reported() {
        let raster = GeometryRaster::new(2, 1, vec![4, 9]).unwrap();
        match raster.markers() {
            Err(RasterError::UnknownMarker { marker, x, y }) => {
                assert_eq!((marker, x, y), (9, 1, 0));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = GeometryRaster::load_pgm("this/geometry/does/not/exist.pgm");
        assert!(matches!(result, Err(RasterError::Io { .. })));
    }
}
