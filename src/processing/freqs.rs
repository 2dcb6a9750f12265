/*! Frequency lists

Conversion of count lists into frequencies, and merging of frequency lists from several sources.
!*/
use std::{
    collections::{HashMap, HashSet},
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use log::info;

use crate::error::Error;

use super::count::TOTAL_KEY;

/// Minimum number of lists [merge_freqs] accepts.
pub const MIN_MERGED_LISTS: usize = 3;

/// Share of the probability mass given to the merged vocabulary.
/// The rest accounts for out-of-vocabulary tokens.
pub const MERGED_MASS: f64 = 0.99;

/// Frequencies lower than this are not written.
pub const MIN_WRITTEN_FREQUENCY: f64 = 1e-9;

const SIGNIFICANT_DIGITS: usize = 5;

pub type Frequencies = HashMap<String, f64>;

/// Divide each count of a count list by its `__total__`.
///
/// # Errors
/// [Error::MissingTotal] if a count comes before the total line, [Error::ZeroTotal] if it follows a total of 0,
/// [Error::MalformedCountLine] if a line is not a `word\tcount` pair.
pub fn counts_to_freqs<R: BufRead>(reader: R) -> Result<Frequencies, Error> {
    let mut total: Option<u64> = None;
    let mut freqs = Frequencies::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let (word, count) = line
            .split_once('\t')
            .ok_or_else(|| Error::MalformedCountLine(line.to_string()))?;
        let count: u64 = count
            .trim()
            .parse()
            .map_err(|_| Error::MalformedCountLine(line.to_string()))?;

        if word == TOTAL_KEY {
            total = Some(count);
        } else {
            let total = match total {
                None => return Err(Error::MissingTotal),
                Some(0) => return Err(Error::ZeroTotal),
                Some(total) => total,
            };
            freqs.insert(word.to_string(), count as f64 / total as f64);
        }
    }
    Ok(freqs)
}

/// Merge frequency lists, giving each word the "figure skating average" of its frequencies:
/// the highest and lowest values are dropped, the rest is averaged.
/// A word missing from a list has a frequency of 0 there.
///
/// Merged frequencies are scaled to add up to [MERGED_MASS].
pub fn merge_freqs(lists: &[Frequencies]) -> Result<Frequencies, Error> {
    if lists.len() < MIN_MERGED_LISTS {
        return Err(Error::NotEnoughFrequencyLists(lists.len()));
    }

    let vocab: HashSet<&str> = lists
        .iter()
        .flat_map(|list| list.keys().map(String::as_str))
        .collect();

    let mut merged = Frequencies::with_capacity(vocab.len());
    let mut values = Vec::with_capacity(lists.len());
    for term in vocab {
        values.clear();
        values.extend(lists.iter().map(|list| list.get(term).copied().unwrap_or(0.)));
        values.sort_by(f64::total_cmp);

        let inliers = &values[1..values.len() - 1];
        let mean = inliers.iter().sum::<f64>() / inliers.len() as f64;
        if mean > 0. {
            merged.insert(term.to_string(), mean);
        }
    }

    let total: f64 = merged.values().sum();
    for freq in merged.values_mut() {
        *freq = *freq / total * MERGED_MASS;
    }
    Ok(merged)
}

/// Write frequencies by decreasing frequency (ties by decreasing word), up to [MIN_WRITTEN_FREQUENCY].
pub fn write_frequency_file<W: Write>(freqs: &Frequencies, mut writer: W) -> Result<(), Error> {
    let mut items: Vec<(&str, f64)> = freqs.iter().map(|(w, f)| (w.as_str(), *f)).collect();
    items.sort_unstable_by(|(wa, fa), (wb, fb)| fb.total_cmp(fa).then_with(|| wb.cmp(wa)));

    for (word, freq) in items {
        if freq < MIN_WRITTEN_FREQUENCY {
            break;
        }
        writeln!(writer, "{word}\t{}", format_significant(freq, SIGNIFICANT_DIGITS))?;
    }
    writer.flush()?;
    Ok(())
}

/// Read count files, merge them and write the merged frequency list to `dst`.
pub fn merge_count_files(inputs: &[PathBuf], dst: &Path) -> Result<(), Error> {
    let lists = inputs
        .iter()
        .map(|path| {
            info!("reading counts from {path:?}");
            counts_to_freqs(BufReader::new(File::open(path)?))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let merged = merge_freqs(&lists)?;
    info!("writing {} merged frequencies to {dst:?}", merged.len());
    write_frequency_file(&merged, BufWriter::new(File::create(dst)?))
}

/// Format `value` with `digits` significant digits, like C's `%.{digits}g`.
fn format_significant(value: f64, digits: usize) -> String {
    if value == 0. || !value.is_finite() {
        return value.to_string();
    }
    let precision = digits.saturating_sub(1);

    // rounding may bump the exponent, so it is taken from the rounded scientific form
    let scientific = format!("{value:.precision$e}");
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - exponent).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

/// Remove trailing zeros of the fractional part, and the point if nothing remains.
fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
