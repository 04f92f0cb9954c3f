use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::info;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PolarError {
    #[error("I/O error on polar file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polar file is empty")]
    Empty,

    #[error("Bad number {value:?} on line {line}")]
    BadNumber { line: usize, value: String },

    #[error("Line {line} has {got} speeds, header has {expected}")]
    RaggedRow {
        line: usize,
        got: usize,
        expected: usize,
    },
}

/// Boat speed table indexed by true wind angle and true wind speed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolarData {
    /// True wind speeds, header columns
    pub tws: Vec<f32>,
    /// True wind angles (degrees), one per row
    pub twa: Vec<f32>,
    /// Boat speeds: speeds[twa_idx][tws_idx]
    pub speeds: Vec<Vec<f32>>,
}

fn parse_number(value: &str, line: usize) -> Result<f32, PolarError> {
    value.trim().parse().map_err(|_| PolarError::BadNumber {
        line,
        value: value.to_string(),
    })
}

impl PolarData {
    /// Reads a "twa/tws" CSV: header of wind speeds, then one row per wind angle.
    pub fn load_from_csv<P: AsRef<Path>>(path: P) -> Result<Self, PolarError> {
        info!("Loading polar data from CSV: {:?}", path.as_ref());

        let reader = BufReader::new(File::open(path)?);
        let mut lines = reader.lines();

        let header = lines.next().ok_or(PolarError::Empty)??;
        let tws = header
            .split(',')
            .skip(1)
            .map(|val| parse_number(val, 1))
            .collect::<Result<Vec<f32>, _>>()?;

        let mut twa = Vec::new();
        let mut speeds = Vec::new();

        for (idx, line_result) in lines.enumerate() {
            let line_no = idx + 2;
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }
            let mut parts = line.split(',');
            let angle = parse_number(parts.next().unwrap_or_default(), line_no)?;
            let row = parts
                .map(|val| parse_number(val, line_no))
                .collect::<Result<Vec<f32>, _>>()?;
            if row.len() != tws.len() {
                return Err(PolarError::RaggedRow {
                    line: line_no,
                    got: row.len(),
                    expected: tws.len(),
                });
            }
            twa.push(angle);
            speeds.push(row);
        }

        info!("Polar loaded: {} TWA x {} TWS", twa.len(), tws.len());
        Ok(Self { tws, twa, speeds })
    }

    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), PolarError> {
        info!("Writing polar data to CSV: {:?}", path.as_ref());
        let mut out = BufWriter::new(File::create(path)?);

        let header: Vec<String> = self.tws.iter().map(|v| v.to_string()).collect();
        writeln!(out, "twa/tws,{}", header.join(","))?;

        for (angle, row) in self.twa.iter().zip(&self.speeds) {
            let cells: Vec<String> = row.iter().map(|v| format!("{:.3}", v)).collect();
            writeln!(out, "{},{}", angle, cells.join(","))?;
        }
        out.flush()?;
        Ok(())
    }

    /// Bilinear interpolation of boat speed, clamped to the table's range.
    pub fn get_speed(&self, target_tws: f32, target_twa: f32) -> f32 {
        let (Some(&tws_first), Some(&tws_last)) = (self.tws.first(), self.tws.last()) else {
            return 0.0;
        };
        let (Some(&twa_first), Some(&twa_last)) = (self.twa.first(), self.twa.last()) else {
            return 0.0;
        };

        let tws_clamped = target_tws.clamp(tws_first, tws_last);
        let twa_clamped = target_twa.clamp(twa_first, twa_last);

        let (tws_idx0, tws_idx1) = bracket(&self.tws, tws_clamped);
        let (twa_idx0, twa_idx1) = bracket(&self.twa, twa_clamped);

        let val00 = self.speeds[twa_idx0][tws_idx0];
        let val01 = self.speeds[twa_idx0][tws_idx1];
        let val10 = self.speeds[twa_idx1][tws_idx0];
        let val11 = self.speeds[twa_idx1][tws_idx1];

        let tws_frac = fraction(self.tws[tws_idx0], self.tws[tws_idx1], tws_clamped);
        let twa_frac = fraction(self.twa[twa_idx0], self.twa[twa_idx1], twa_clamped);

        let val0 = val00 * (1.0 - tws_frac) + val01 * tws_frac;
        let val1 = val10 * (1.0 - tws_frac) + val11 * tws_frac;

        val0 * (1.0 - twa_frac) + val1 * twa_frac
    }
}

/// Indices of the two axis entries surrounding `value`.
fn bracket(axis: &[f32], value: f32) -> (usize, usize) {
    axis.windows(2)
        .position(|pair| value >= pair[0] && value <= pair[1])
        .map(|i| (i, i + 1))
        .unwrap_or((0, axis.len() - 1))
}

fn fraction(lo: f32, hi: f32, value: f32) -> f32 {
    if lo == hi { 0.0 } else { (value - lo) / (hi - lo) }
}
