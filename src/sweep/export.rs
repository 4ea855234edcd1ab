//! Export sweep results to CSV format for spreadsheet analysis
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::runner::CaseResult;
use crate::error::Result;
use crate::units::kilopascals_to_atmospheres;

const HEADER: &str = "case_id,width_pm,volume_pm3,particles,temperature_K,pressure_kPa,pressure_atm,ideal_pressure_kPa,pv_over_nkt,lid_on";

/// Write one header line and one row per case.
pub fn write_results_csv<W: Write>(writer: &mut W, results: &[CaseResult]) -> Result<()> {
    writeln!(writer, "{HEADER}")?;
    for r in results {
        write!(
            writer,
            "{},{:.1},{:.6e},{},{:.3},{:.3},{:.5},{:.3},",
            r.case_id,
            r.width,
            r.volume,
            r.particles,
            r.temperature,
            r.pressure_kpa,
            kilopascals_to_atmospheres(r.pressure_kpa),
            r.ideal_pressure_kpa,
        )?;
        if let Some(ratio) = r.pv_over_nkt {
            write!(writer, "{ratio:.4}")?;
        }
        writeln!(writer, ",{}", r.lid_on)?;
    }
    Ok(())
}

/// Write `<output_dir>/<study_name>.csv`, creating the directory if needed.
pub fn export_results_to_csv<P: AsRef<Path>>(
    study_name: &str,
    results: &[CaseResult],
    output_dir: P,
) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(format!("{study_name}.csv"));
    let mut writer = BufWriter::new(File::create(&path)?);
    write_results_csv(&mut writer, results)?;
    writer.flush()?;
    tracing::info!(path = %path.display(), rows = results.len(), "sweep results exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(case_id: &str, ratio: Option<f64>) -> CaseResult {
        CaseResult {
            case_id: case_id.to_string(),
            width: 10000.0,
            volume: 7.65625e11,
            particles: 100,
            temperature: 300.0,
            pressure_kpa: 540.0,
            ideal_pressure_kpa: 541.0,
            pv_over_nkt: ratio,
            lid_on: true,
        }
    }

    #[test]
    fn rows_follow_header() {
        let mut out = Vec::new();
        write_results_csv(&mut out, &[result("a", Some(0.998)), result("b", None)]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        let columns = HEADER.split(',').count();
        for line in &lines {
            assert_eq!(line.split(',').count(), columns);
        }
        assert!(lines[1].starts_with("a,10000.0,"));
        assert!(lines[1].contains(",0.9980,true"));
        assert!(lines[2].ends_with(",,true"));
    }

    #[test]
    fn export_creates_directory_and_file() {
        let dir = std::env::temp_dir().join(format!("gas_sweep_export_{}", std::process::id()));
        let path = export_results_to_csv("study", &[result("a", Some(1.0))], &dir).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("case_id,"));
        fs::remove_dir_all(&dir).unwrap();
    }
}
