//! Report Output
//!
//! Tab-separated evaluation report followed by the analogy answers.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::eval::{round4, AnalogyQuery, AnalogyResult, Evaluation};

pub const EVALUATION_HEADER: &str = "# Word 1\tWord 2\tHuman (mean)\tMachine";
pub const ANALOGY_HEADER: &str = "# Analogies";

/// Shortest decimal form, always with a fractional part (`7.5`, `10.0`)
pub fn format_number(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 {
        format!("{:.1}", x)
    } else {
        format!("{}", x)
    }
}

/// Write the scored pairs and the correlation trailer
///
/// `correlation` is `None` when it could not be computed.
pub fn write_evaluation<W: Write>(
    w: &mut W,
    eval: &Evaluation,
    correlation: Option<f64>,
) -> Result<()> {
    writeln!(w, "{}", EVALUATION_HEADER)?;
    for scored in &eval.scored {
        let pair = &scored.pair;
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}",
            pair.tag,
            pair.word_a,
            pair.word_b,
            pair.raw_score
                .clone()
                .unwrap_or_else(|| format_number(pair.human_score)),
            format_number(round4(f64::from(scored.machine_score)))
        )?;
    }
    match correlation {
        Some(r) => writeln!(w, "# Correlation = {}", format_number(round4(r)))?,
        None => writeln!(w, "# Correlation = nan")?,
    }
    Ok(())
}

/// Write one `a:b::c:d` line per query
pub fn write_analogies<W: Write>(
    w: &mut W,
    queries: &[AnalogyQuery],
    results: &[Result<AnalogyResult>],
) -> Result<()> {
    writeln!(w, "{}", ANALOGY_HEADER)?;
    for (query, result) in queries.iter().zip(results) {
        match result {
            Ok(result) => writeln!(
                w,
                "{}:{}",
                query,
                result.best_term.as_deref().unwrap_or("")
            )?,
            Err(e) => writeln!(w, "# {}:? ({})", query, e)?,
        }
    }
    Ok(())
}

/// Create (or truncate) `path` and write the evaluation report
pub fn write_evaluation_file<P: AsRef<Path>>(
    path: P,
    eval: &Evaluation,
    correlation: Option<f64>,
) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_evaluation(&mut writer, eval, correlation)?;
    writer.flush()?;
    Ok(())
}

/// Append the analogy section to `path`
pub fn append_analogies_file<P: AsRef<Path>>(
    path: P,
    queries: &[AnalogyQuery],
    results: &[Result<AnalogyResult>],
) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);
    write_analogies(&mut writer, queries, results)?;
    writer.flush()?;
    Ok(())
}
